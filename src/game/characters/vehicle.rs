// Vehicle composition: a driven vehicle owns its driver and carries the
// human control strategy while the ride lasts

use log::info;

use crate::core::math::weighted_mix;

use super::character::Character;
use super::frame::FrameKind;

/// Velocity (x100) given to a rider jumping out of a vehicle
const UNBOARD_LAUNCH: i32 = 600;

impl Character {
    pub fn driver(&self) -> Option<&Character> {
        self.driver.as_deref()
    }

    pub fn is_driven(&self) -> bool {
        self.driver.is_some()
    }

    /// Put a rider into a copy of `vehicle`. The rider's control strategy
    /// moves to the vehicle and the rider snaps to its stand frame.
    pub fn board(vehicle: &Character, mut rider: Character) -> Character {
        info!("Actor {} boards vehicle {}", rider.id, vehicle.id);

        rider.state.reset_to(FrameKind::Stand);
        let control = rider.interactive.take().unwrap_or_default();

        let mut driven = vehicle.clone();
        driven.interactive = Some(control);
        driven.events.clear();
        driven.passengers.clear();
        driven.driver = Some(Box::new(rider));
        driven.set_driver_position();
        driven
    }

    /// Eject the driver. Returns the now empty vehicle and the rider launched
    /// up and forward, or the vehicle unchanged if nobody was driving.
    pub fn unboard(mut self) -> Result<(Character, Character), Character> {
        let Some(rider) = self.driver.take() else {
            return Err(self);
        };
        let mut rider = *rider;

        info!("Actor {} leaves vehicle {}", rider.id, self.id);

        rider.interactive = self.interactive.take();
        rider.face_right = self.face_right;
        rider.set_velocity(UNBOARD_LAUNCH * self.face_dir(), -UNBOARD_LAUNCH);
        Ok((self, rider))
    }

    /// Seat the driver at the passenger offset, sliding across the vehicle
    /// while it plays its turn frame
    pub(crate) fn set_driver_position(&mut self) {
        let Some(driver_width) = self.driver.as_ref().map(|d| d.frame().width) else {
            return;
        };

        let stats = self.kind.stats();
        let width = self.frame().width;
        let pos_right = self.pos.x + stats.passenger_x;
        let pos_left = self.pos.x + width - driver_width - stats.passenger_x;
        let y = self.pos.y + stats.passenger_y;

        let x = if self.state.is(FrameKind::Turn) {
            // Halfway through the turn the driver is centred
            let duration = self.frame().duration;
            let progress = self.state.time_in_frame();
            let (from, to) = if self.face_right {
                (pos_left, pos_right)
            } else {
                (pos_right, pos_left)
            };
            weighted_mix(from, duration - progress, to, progress)
        } else if self.face_right {
            pos_right
        } else {
            pos_left
        };

        let face_right = self.face_right;
        if let Some(driver) = self.driver.as_mut() {
            driver.pos.x = x;
            driver.pos.y = y;
            driver.face_right = face_right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::ActorEvent;
    use crate::game::testing::{self, HeightField, GROUND_Y};

    fn cart_and_rider() -> (Character, Character) {
        let cart = Character::new(testing::cart_type(), 200, GROUND_Y - 24, true);
        let rider = Character::new(testing::hero_type(), 208, 40, true).with_interactive_control();
        (cart, rider)
    }

    #[test]
    fn test_board_moves_control_to_vehicle() {
        let (cart, mut rider) = cart_and_rider();
        rider.change_frame(FrameKind::Fall);
        let driven = Character::board(&cart, rider);

        assert!(driven.is_human());
        assert!(!driven.body_passthrough());
        assert!(driven.body_harmful());
        let driver = driven.driver().unwrap();
        assert!(!driver.is_human());
        assert_eq!(driver.frame_kind(), FrameKind::Stand);
        assert_eq!(driver.x(), 200 + 4);
        assert_eq!(driver.y(), GROUND_Y - 24 - 20);
    }

    #[test]
    fn test_driver_sits_mirrored_when_facing_left() {
        let (mut cart, rider) = cart_and_rider();
        cart.face_right = false;
        let driven = Character::board(&cart, rider);
        let driver = driven.driver().unwrap();
        // 48 wide cart, 32 wide driver, offset 4 from the far side
        assert_eq!(driver.x(), 200 + 48 - 32 - 4);
        assert!(!driver.face_right());
    }

    #[test]
    fn test_driver_slides_across_during_turn() {
        let (cart, rider) = cart_and_rider();
        let level = HeightField::flat(GROUND_Y);
        let mut driven = Character::board(&cart, rider);
        driven.set_face_right(&level, false);
        assert_eq!(driven.frame_kind(), FrameKind::Turn);

        driven.state.advance(driven.frame().duration);
        driven.state.advance(driven.frame().duration);
        driven.set_driver_position();
        // Turn lasts 4 ticks: two ticks in is halfway between both seats
        let driver_x = driven.driver().unwrap().x();
        assert_eq!(driver_x, (204 + 212) / 2);
    }

    #[test]
    fn test_unboard_launches_rider() {
        let (cart, rider) = cart_and_rider();
        let driven = Character::board(&cart, rider);
        let (vehicle, rider) = driven.unboard().unwrap();

        assert!(vehicle.driver().is_none());
        assert!(!vehicle.is_human());
        assert!(vehicle.boardable_vehicle());
        assert!(rider.is_human());
        assert_eq!(rider.velocity_x(), 600);
        assert_eq!(rider.velocity_y(), -600);
    }

    #[test]
    fn test_unboard_without_driver_returns_vehicle() {
        let (cart, _) = cart_and_rider();
        assert!(cart.unboard().is_err());
    }

    #[test]
    fn test_jump_down_from_vehicle_requests_unboard() {
        let (cart, rider) = cart_and_rider();
        let level = HeightField::flat(GROUND_Y);
        let mut driven = Character::board(&cart, rider);
        driven.jump_down(&level);
        assert_eq!(driven.take_events(), vec![ActorEvent::Unboard]);
    }
}
