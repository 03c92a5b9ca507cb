//! The character that drifts toward a random target and throws boxes.

use glam::Vec2;
use log::debug;
use boxtruck_engine::api::types::EntityId;
use boxtruck_engine::components::entity::Entity;
use boxtruck_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, FillColor, GameEvent, RandomSource,
    ShapeStyle,
};

use crate::assembly::{labels, CharacterAssembly, CHARACTER_START_X};
use crate::game::game_events;
use crate::level::LevelState;

/// Seconds between throw attempts.
pub const THROW_INTERVAL: f32 = 1.5;
pub const THROW_CHANCE: f32 = 0.8;
pub const TARGET_MIN_X: f32 = 100.0;
pub const TARGET_MAX_X: f32 = 700.0;
/// Fraction of the remaining distance covered each step.
pub const SMOOTHING: f32 = 0.02;

pub const BOX_SIZE: f32 = 30.0;
pub const BOX_MASS: f32 = 5.0;
pub const BOX_SPAWN_OFFSET: Vec2 = Vec2::new(20.0, -10.0);
pub const THROW_FORCE: Vec2 = Vec2::new(-30_000.0, -20_000.0);

const ORANGE: FillColor = FillColor::hex(0xffa500);

pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[derive(Debug, Clone)]
pub struct Thrower {
    pub character: CharacterAssembly,
    target_x: f32,
}

impl Thrower {
    pub fn new(character: CharacterAssembly) -> Self {
        Self {
            character,
            target_x: CHARACTER_START_X,
        }
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    /// Move every character part one smoothing step toward the target.
    pub fn step(&self, ctx: &mut EngineContext) {
        let x = smooth_toward(self.character.x(ctx), self.target_x, SMOOTHING);
        for (id, row) in self.character.parts() {
            ctx.set_position(id, Vec2::new(x, row));
        }
    }

    /// Timer tick: maybe pick a new target and throw a box.
    pub fn on_timer(
        &mut self,
        ctx: &mut EngineContext,
        rng: &mut dyn RandomSource,
        level: &mut LevelState,
    ) -> Option<EntityId> {
        if !rng.chance(THROW_CHANCE) {
            debug!("thrower skipped a throw");
            return None;
        }
        self.target_x = rng.range(TARGET_MIN_X, TARGET_MAX_X);
        Some(self.throw_box(ctx, level))
    }

    /// Spawn a box next to the throwing arm, give it the throw force for
    /// the next step and count it.
    pub fn throw_box(&self, ctx: &mut EngineContext, level: &mut LevelState) -> EntityId {
        let arm = ctx
            .position(self.character.throwing_arm())
            .unwrap_or(Vec2::new(CHARACTER_START_X, crate::assembly::ARM_Y));
        let at = arm + BOX_SPAWN_OFFSET;

        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_label(labels::BOX)
            .with_style(ShapeStyle::filled(ORANGE));
        let desc = BodyDesc::dynamic(ColliderDesc::rect(BOX_SIZE, BOX_SIZE))
            .with_position(at)
            .with_mass(BOX_MASS);
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());
        ctx.apply_force_at_point(id, THROW_FORCE, at);

        let count = level.record_spawn();
        debug!(
            "box {} thrown from ({:.0}, {:.0}), target x {:.0}, {} in play",
            count,
            at.x,
            at.y,
            self.target_x,
            ctx.scene.count_by_label(labels::BOX)
        );
        ctx.emit_event(GameEvent {
            kind: game_events::BOX_COUNT,
            a: count as f32,
            b: 0.0,
            c: 0.0,
        });
        id
    }
}
