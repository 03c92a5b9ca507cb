//! Boxes break when they land on the ground.

use log::debug;
use boxtruck_engine::api::types::EntityId;
use boxtruck_engine::{CollisionPair, EngineContext, GameEvent};

use crate::assembly::labels;
use crate::game::game_events;

/// The box in a box/ground pair, if that is what the pair is.
pub fn grounded_box(ctx: &EngineContext, pair: &CollisionPair) -> Option<EntityId> {
    let a = ctx.scene.label_of(pair.entity_a)?;
    let b = ctx.scene.label_of(pair.entity_b)?;
    match (a, b) {
        (labels::BOX, labels::GROUND) => Some(pair.entity_a),
        (labels::GROUND, labels::BOX) => Some(pair.entity_b),
        _ => None,
    }
}

/// Remove every box that started touching the ground. Pairs naming entities
/// that are already gone are skipped. Returns how many boxes were removed.
pub fn remove_grounded_boxes(ctx: &mut EngineContext, pairs: &[CollisionPair]) -> usize {
    let mut removed = 0;
    for pair in pairs.iter().filter(|p| p.started) {
        let Some(id) = grounded_box(ctx, pair) else {
            continue;
        };
        let at = ctx.position(id).unwrap_or_default();
        if ctx.despawn(id) {
            removed += 1;
            debug!("box {:?} broke at ({:.0}, {:.0})", id, at.x, at.y);
            ctx.emit_event(GameEvent {
                kind: game_events::BOX_BROKEN,
                a: at.x,
                b: at.y,
                c: 0.0,
            });
        }
    }
    removed
}
