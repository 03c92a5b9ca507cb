pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::style::{FillColor, ShapeStyle};
pub use crate::core::rng::{RandomSource, Rng};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FixedTimestep, IntervalTimer};
pub use renderer::instance::{ShapeBuffer, ShapeGeometry, ShapeInstance};
pub use input::queue::{InputEvent, InputQueue};
#[cfg(feature = "physics")]
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CollisionPair, JointHandle, PhysicsBody,
    PhysicsWorld, SpringDesc,
};
