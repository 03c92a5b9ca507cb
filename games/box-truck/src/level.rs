//! One-time lip growth once enough boxes have been thrown.

use log::info;
use boxtruck_engine::{ColliderDesc, EngineContext, GameEvent};

use crate::assembly::{TruckAssembly, LIP_WIDTH, TALL_LIP_HEIGHT};
use crate::game::game_events;

/// Boxes thrown before the lips grow.
pub const SIDES_THRESHOLD: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelState {
    box_count: u32,
    sides_are_taller: bool,
}

impl LevelState {
    pub fn box_count(&self) -> u32 {
        self.box_count
    }

    pub fn sides_are_taller(&self) -> bool {
        self.sides_are_taller
    }

    /// Count one thrown box. Returns the new total.
    pub fn record_spawn(&mut self) -> u32 {
        self.box_count = self.box_count.saturating_add(1);
        self.box_count
    }

    /// Whether the lips should grow this step.
    pub fn sides_due(&self) -> bool {
        self.box_count >= SIDES_THRESHOLD && !self.sides_are_taller
    }
}

/// Grow both lips once the threshold is reached. Returns `true` on the one
/// step that performs the change.
pub fn check(ctx: &mut EngineContext, level: &mut LevelState, truck: &TruckAssembly) -> bool {
    if !level.sides_due() {
        return false;
    }

    for lip in truck.lips {
        ctx.set_shape(lip, ColliderDesc::rect(LIP_WIDTH, TALL_LIP_HEIGHT));
    }
    level.sides_are_taller = true;

    info!("{} boxes thrown, truck sides now {} tall", level.box_count, TALL_LIP_HEIGHT);
    ctx.emit_event(GameEvent {
        kind: game_events::SIDES_TALLER,
        a: TALL_LIP_HEIGHT,
        b: 0.0,
        c: 0.0,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::LIP_HEIGHT;

    fn at(count: u32) -> LevelState {
        LevelState { box_count: count, sides_are_taller: false }
    }

    fn lip_heights(ctx: &EngineContext, truck: &TruckAssembly) -> Vec<f32> {
        truck
            .lips
            .iter()
            .map(|lip| match ctx.collider_shape(*lip) {
                Some(ColliderDesc::Cuboid { half_height, .. }) => half_height * 2.0,
                other => panic!("lip is not a rectangle: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn record_spawn_counts_by_one() {
        let mut level = LevelState::default();
        assert_eq!(level.record_spawn(), 1);
        assert_eq!(level.record_spawn(), 2);
        assert_eq!(level.box_count(), 2);
    }

    #[test]
    fn nothing_happens_below_threshold() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        let mut level = at(3);

        assert!(!check(&mut ctx, &mut level, &truck));
        assert!(!level.sides_are_taller());
        assert_eq!(lip_heights(&ctx, &truck), vec![LIP_HEIGHT, LIP_HEIGHT]);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn fourth_box_grows_lips_once() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        let mut level = at(3);
        level.record_spawn();

        assert!(check(&mut ctx, &mut level, &truck));
        assert!(level.sides_are_taller());
        assert_eq!(lip_heights(&ctx, &truck), vec![TALL_LIP_HEIGHT, TALL_LIP_HEIGHT]);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, game_events::SIDES_TALLER);

        level.record_spawn();
        assert!(!check(&mut ctx, &mut level, &truck));
        assert!(level.sides_are_taller());
        assert_eq!(lip_heights(&ctx, &truck), vec![TALL_LIP_HEIGHT, TALL_LIP_HEIGHT]);
        assert_eq!(ctx.events.len(), 1);
    }

    #[test]
    fn latch_flips_even_when_threshold_is_overshot() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        let mut level = at(9);
        assert!(check(&mut ctx, &mut level, &truck));
        assert!(!check(&mut ctx, &mut level, &truck));
    }

    #[test]
    fn lips_keep_their_centers() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        let before = truck.lips.map(|lip| ctx.position(lip));
        check(&mut ctx, &mut at(4), &truck);
        assert_eq!(truck.lips.map(|lip| ctx.position(lip)), before);
    }

    #[test]
    fn lips_stay_sprung_after_growing() {
        let mut ctx = EngineContext::new();
        let truck = TruckAssembly::spawn(&mut ctx);
        check(&mut ctx, &mut at(4), &truck);
        assert_eq!(ctx.physics.joint_count(), 4);
    }
}
