//! Player steering and edge correction for the truck.

use glam::Vec2;
use boxtruck_engine::EngineContext;

use crate::assembly::{TruckAssembly, TRUCK_WIDTH};
use crate::input::KeyState;

pub const STEER_FORCE: f32 = 5_000.0;
pub const WHEEL_SPIN: f32 = 6.0;
pub const BOUNDARY_FORCE: f32 = 20_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Left,
    Right,
}

impl Steering {
    fn sign(self) -> f32 {
        match self {
            Steering::Left => -1.0,
            Steering::Right => 1.0,
        }
    }
}

/// Direction the player is steering. Left wins when both keys are held.
pub fn steering(keys: &KeyState) -> Option<Steering> {
    if keys.left {
        Some(Steering::Left)
    } else if keys.right {
        Some(Steering::Right)
    } else {
        None
    }
}

/// Horizontal force pushing the truck back inside the world, if it has
/// crossed half its width from either edge.
pub fn boundary_push(truck_x: f32, world_width: f32, truck_width: f32) -> Option<f32> {
    let half = truck_width / 2.0;
    if truck_x < half {
        Some(BOUNDARY_FORCE)
    } else if truck_x > world_width - half {
        Some(-BOUNDARY_FORCE)
    } else {
        None
    }
}

/// Apply this step's steering and boundary forces. Forces are additive.
pub fn step(ctx: &mut EngineContext, truck: &TruckAssembly, keys: &KeyState, world_width: f32) {
    if let Some(dir) = steering(keys) {
        ctx.apply_force(truck.body, Vec2::new(dir.sign() * STEER_FORCE, 0.0));
        for wheel in truck.wheels {
            ctx.set_angular_velocity(wheel, dir.sign() * WHEEL_SPIN);
        }
    }

    let x = truck.x(ctx);
    if let Some(push) = boundary_push(x, world_width, TRUCK_WIDTH) {
        ctx.apply_force(truck.body, Vec2::new(push, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtruck_engine::api::types::EntityId;
    use boxtruck_engine::components::entity::Entity;
    use boxtruck_engine::{BodyDesc, ColliderDesc, ColliderMaterial};
    use crate::assembly::{spawn_ground, WORLD_W};

    const BOTH: KeyState = KeyState { left: true, right: true };

    #[test]
    fn left_wins_over_right() {
        assert_eq!(steering(&BOTH), Some(Steering::Left));
        assert_eq!(steering(&KeyState { left: false, right: true }), Some(Steering::Right));
        assert_eq!(steering(&KeyState::default()), None);
    }

    #[test]
    fn boundary_push_only_past_the_edges() {
        assert_eq!(boundary_push(74.0, WORLD_W, TRUCK_WIDTH), Some(BOUNDARY_FORCE));
        assert_eq!(boundary_push(75.0, WORLD_W, TRUCK_WIDTH), None);
        assert_eq!(boundary_push(400.0, WORLD_W, TRUCK_WIDTH), None);
        assert_eq!(boundary_push(725.0, WORLD_W, TRUCK_WIDTH), None);
        assert_eq!(boundary_push(726.0, WORLD_W, TRUCK_WIDTH), Some(-BOUNDARY_FORCE));
    }

    #[test]
    fn steering_spins_both_wheels() {
        let mut ctx = EngineContext::with_gravity(Vec2::new(0.0, 700.0));
        let truck = TruckAssembly::spawn(&mut ctx);

        step(&mut ctx, &truck, &KeyState { left: true, right: false }, WORLD_W);
        for wheel in truck.wheels {
            assert_eq!(ctx.angular_velocity(wheel), -WHEEL_SPIN);
        }

        step(&mut ctx, &truck, &KeyState { left: false, right: true }, WORLD_W);
        for wheel in truck.wheels {
            assert_eq!(ctx.angular_velocity(wheel), WHEEL_SPIN);
        }
    }

    #[test]
    fn idle_keys_leave_wheels_alone() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        ctx.set_angular_velocity(truck.wheels[0], 1.5);

        step(&mut ctx, &truck, &KeyState::default(), WORLD_W);
        assert_eq!(ctx.angular_velocity(truck.wheels[0]), 1.5);
    }

    /// A truck body on its own, so springs do not pull it around.
    ///
    /// The wheel and lip ids are deliberately dangling: nothing is spawned
    /// under them, so `step`'s wheel spin and force calls on them are no-ops.
    fn lone_truck(ctx: &mut EngineContext, x: f32) -> TruckAssembly {
        let id = ctx.next_id();
        let body = ctx.spawn_with_body(
            Entity::new(id),
            BodyDesc::dynamic(ColliderDesc::rect(TRUCK_WIDTH, 20.0)).with_position(Vec2::new(x, 500.0)),
            ColliderMaterial::default(),
        );
        TruckAssembly {
            body,
            wheels: [EntityId(900), EntityId(901)],
            lips: [EntityId(902), EntityId(903)],
        }
    }

    #[test]
    fn boundary_force_acts_while_steering_outward() {
        let mut ctx = EngineContext::new();
        let truck = lone_truck(&mut ctx, 50.0);

        // Rightward correction (20000) outweighs leftward steering (5000).
        step(&mut ctx, &truck, &KeyState { left: true, right: false }, WORLD_W);
        ctx.step_physics();
        assert!(ctx.velocity(truck.body).x > 0.0);
    }

    #[test]
    fn truck_pushes_itself_back_from_the_right_edge() {
        let mut ctx = EngineContext::new();
        let truck = lone_truck(&mut ctx, 780.0);

        step(&mut ctx, &truck, &KeyState::default(), WORLD_W);
        ctx.step_physics();
        assert!(ctx.velocity(truck.body).x < 0.0);
    }

    #[test]
    fn no_push_in_the_middle() {
        let mut ctx = EngineContext::new();
        let truck = lone_truck(&mut ctx, 400.0);

        step(&mut ctx, &truck, &KeyState::default(), WORLD_W);
        ctx.step_physics();
        assert_eq!(ctx.velocity(truck.body), Vec2::ZERO);
    }

    #[test]
    fn holding_left_moves_truck_left_of_baseline() {
        let run = |keys: KeyState| {
            let mut ctx = EngineContext::with_gravity(Vec2::new(0.0, 700.0));
            spawn_ground(&mut ctx);
            let truck = TruckAssembly::spawn(&mut ctx);
            for _ in 0..10 {
                step(&mut ctx, &truck, &keys, WORLD_W);
                ctx.step_physics();
            }
            truck.x(&ctx)
        };

        let baseline = run(KeyState::default());
        let steered = run(KeyState { left: true, right: false });
        assert!(steered < baseline, "steered {} vs baseline {}", steered, baseline);
    }
}
