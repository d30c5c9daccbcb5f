// Control layer
//
// A strategy turns either player input or scripted formulas into intents
// on the actor it drives. Exactly one strategy is active per actor.

pub mod formula;
pub mod interactive;
pub mod scripted;

use crate::engine::physics::LevelQuery;
use crate::game::characters::Character;

pub use formula::{Formula, FormulaCompiler, FormulaRef, SimpleCompiler, SimpleFormula};
pub use interactive::InteractiveControl;
pub use scripted::ScriptedControl;

/// Decides what an actor wants to do this tick
pub trait ControlStrategy {
    fn drive(&mut self, actor: &mut Character, level: &dyn LevelQuery);
}
