use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use tilebound::engine::game_loop::{TickClock, TICKS_PER_SECOND};
use tilebound::engine::input::{Action, InputManager};
use tilebound::game::characters::{CharacterRecord, TypeCatalog};
use tilebound::game::control::SimpleCompiler;
use tilebound::game::level::{Level, TileMap};

const CHARACTERS: &str = include_str!("../assets/characters.json");
const DEMO_LEVEL: &str = include_str!("../assets/demo_level.json");

/// Level file: tile rows plus the actors placed on them
#[derive(Debug, Deserialize)]
struct LevelFile {
    tile_size: i32,
    #[serde(default)]
    air_resistance: i32,
    rows: Vec<String>,
    actors: Vec<CharacterRecord>,
}

fn load_level(catalog: &TypeCatalog) -> Result<Level> {
    let file: LevelFile = serde_json::from_str(DEMO_LEVEL).context("parsing demo level")?;
    let rows: Vec<&str> = file.rows.iter().map(String::as_str).collect();
    let terrain = TileMap::from_ascii(file.tile_size, &rows)?;

    let mut level = Level::new(terrain).with_air_resistance(file.air_resistance);
    for record in &file.actors {
        let id = level
            .spawn_record(record, catalog, &SimpleCompiler)
            .with_context(|| format!("spawning {}", record.type_id))?;
        level.settle(id);
    }

    info!("Level loaded with {} actors", level.count());
    Ok(level)
}

/// Show the player's state in the title bar
fn update_title(window: &Window, level: &Level, paused: bool) {
    let status = match level.player() {
        Some(player) => format!(
            "hp {}/{}  {}  ({}, {})",
            player.hitpoints(),
            player.max_hitpoints(),
            player.frame_kind().name(),
            player.x(),
            player.y()
        ),
        None => "game over".to_string(),
    };
    let pause = if paused { "  [paused]" } else { "" };
    window.set_title(&format!("Tilebound  {}{}", status, pause));
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tilebound...");

    let catalog = TypeCatalog::from_json(CHARACTERS)?;
    let mut level = load_level(&catalog)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Tilebound")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::new();
    let mut clock = TickClock::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::NewEvents(_) => elwt.set_control_flow(ControlFlow::Poll),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_event(button, state),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::AboutToWait => {
                if input.just_pressed(Action::Menu) {
                    info!("Menu requested, shutting down...");
                    elwt.exit();
                    return;
                }
                if input.just_pressed(Action::Pause) {
                    clock.toggle_pause();
                    input.update();
                    update_title(&window, &level, clock.is_paused());
                }

                for _ in 0..clock.begin_frame() {
                    level.set_player_keys(input.control_keys());
                    level.tick();
                    input.update();

                    for sound in level.take_sounds() {
                        debug!("Sound: {}", sound);
                    }
                    if level.tick_count() % u64::from(TICKS_PER_SECOND) == 0 {
                        update_title(&window, &level, clock.is_paused());
                    }
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
