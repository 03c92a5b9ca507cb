use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::input::queue::InputQueue;
use crate::renderer::instance::{ShapeBuffer, ShapeGeometry};
#[cfg(feature = "physics")]
use crate::components::style::FillColor;
#[cfg(feature = "physics")]
use crate::renderer::instance::ShapeInstance;
use crate::systems::render::{build_shape_buffer, scale_geometry};
#[cfg(feature = "physics")]
use crate::core::physics::{
    PhysicsWorld, BodyDesc, ColliderDesc, ColliderMaterial, CollisionPair, JointHandle, SpringDesc,
};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
use glam::Vec2;

#[cfg(feature = "physics")]
const LINK_HALF_THICKNESS: f32 = 1.0;
#[cfg(feature = "physics")]
const LINK_COLOR: FillColor = FillColor::new(0.25, 0.25, 0.25);

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Period of the wall-clock timer in seconds. `None` disables `Game::timer`.
    pub timer_interval: Option<f32>,
    /// Maximum number of drawn shapes (default: 512).
    pub max_shapes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for physics simulation. Default: zero (no gravity).
    /// Y grows downward, so use positive Y for downward gravity.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            timer_interval: None,
            max_shapes: 512,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
///
/// The runner calls the hooks in a fixed order each frame: `timer` for every
/// elapsed timer period, then per fixed step `update`, the physics step and
/// `collisions_started`.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Step handler, run once per fixed step before physics integrates.
    /// Apply forces, move scripted bodies, check level rules.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Timer handler, run once per `GameConfig::timer_interval` of wall-clock time.
    fn timer(&mut self, _ctx: &mut EngineContext) {}

    /// Collision handler, run after each physics step with the pairs that
    /// began touching during that step.
    #[cfg(feature = "physics")]
    fn collisions_started(&mut self, _ctx: &mut EngineContext, _pairs: &[CollisionPair]) {}
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
    /// Joints drawn as line segments.
    #[cfg(feature = "physics")]
    visible_links: Vec<JointHandle>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(Vec2::ZERO),
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
            #[cfg(feature = "physics")]
            visible_links: Vec::new(),
        }
    }

    /// Create an EngineContext with a custom gravity vector.
    #[cfg(feature = "physics")]
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            physics: PhysicsWorld::new(gravity),
            ..Self::new()
        }
    }

    /// Create an EngineContext matching a game's configuration
    /// (gravity and integration step).
    pub fn from_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        {
            let mut ctx = Self::with_gravity(config.gravity);
            ctx.physics.set_dt(config.fixed_dt);
            ctx
        }
        #[cfg(not(feature = "physics"))]
        {
            let _ = config;
            Self::new()
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (events, collision events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        #[cfg(feature = "physics")]
        self.collision_events.clear();
    }

    /// Current position of an entity, if it is registered.
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.scene.get(id).map(|e| e.pos)
    }

    /// Rebuild the shape buffer from the scene.
    /// Outlines come from colliders when present, otherwise from `Entity::scale`.
    pub fn build_shapes(&self, buffer: &mut ShapeBuffer) {
        build_shape_buffer(
            self.scene.iter(),
            |e| Some(self.geometry_of(e.id).unwrap_or_else(|| scale_geometry(e))),
            buffer,
        );
        #[cfg(feature = "physics")]
        self.push_link_segments(buffer);
    }

    #[cfg(feature = "physics")]
    fn push_link_segments(&self, buffer: &mut ShapeBuffer) {
        for &handle in &self.visible_links {
            let Some((a, b)) = self.physics.joint_world_anchors(handle) else {
                continue;
            };
            let delta = b - a;
            let mid = (a + b) / 2.0;
            let geometry = ShapeGeometry::Rect {
                half_width: delta.length() / 2.0 + LINK_HALF_THICKNESS,
                half_height: LINK_HALF_THICKNESS,
            };
            let mut segment =
                ShapeInstance::new(mid.x, mid.y, delta.y.atan2(delta.x), geometry);
            segment.r = LINK_COLOR.r;
            segment.g = LINK_COLOR.g;
            segment.b = LINK_COLOR.b;
            segment.alpha = 1.0;
            if !buffer.push(segment) {
                break;
            }
        }
    }

    #[cfg(feature = "physics")]
    fn geometry_of(&self, id: EntityId) -> Option<ShapeGeometry> {
        match self.collider_shape(id)? {
            ColliderDesc::Ball { radius } => Some(ShapeGeometry::Circle { radius }),
            ColliderDesc::Cuboid { half_width, half_height } => {
                Some(ShapeGeometry::Rect { half_width, half_height })
            }
        }
    }

    #[cfg(not(feature = "physics"))]
    fn geometry_of(&self, _id: EntityId) -> Option<ShapeGeometry> {
        None
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position and rotation are set from the BodyDesc.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity
            .with_pos(desc.position)
            .with_rotation(desc.rotation)
            .with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    /// Returns `false` when the entity was not registered (already removed).
    #[cfg(feature = "physics")]
    pub fn despawn(&mut self, id: EntityId) -> bool {
        match self.scene.despawn(id) {
            Some(entity) => {
                if let Some(body) = &entity.body {
                    self.physics.remove_body(body);
                }
                true
            }
            None => false,
        }
    }

    /// Apply a force at an entity's center of mass for the next step.
    #[cfg(feature = "physics")]
    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_force(&body, force);
        }
    }

    /// Apply a force at a world-space point for the next step.
    #[cfg(feature = "physics")]
    pub fn apply_force_at_point(&mut self, id: EntityId, force: Vec2, point: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_force_at_point(&body, force, point);
        }
    }

    /// Set the angular velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_angular_velocity(&mut self, id: EntityId, angvel: f32) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_angular_velocity(&body, angvel);
        }
    }

    /// Get the angular velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn angular_velocity(&self, id: EntityId) -> f32 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.angular_velocity(body))
            .unwrap_or(0.0)
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport an entity and its body. The entity position updates at once,
    /// without waiting for the next physics step.
    #[cfg(feature = "physics")]
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos = pos;
            if let Some(body) = &entity.body {
                self.physics.set_position(body, pos);
            }
        }
    }

    /// Current collider shape of an entity.
    #[cfg(feature = "physics")]
    pub fn collider_shape(&self, id: EntityId) -> Option<ColliderDesc> {
        let body = self.scene.get(id)?.body?;
        self.physics.collider_shape(&body)
    }

    /// Replace an entity's collider shape in place.
    #[cfg(feature = "physics")]
    pub fn set_shape(&mut self, id: EntityId, shape: ColliderDesc) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_shape(&body, shape);
        }
    }

    /// Link two entities' bodies with a spring.
    /// Returns `None` if either entity has no body.
    #[cfg(feature = "physics")]
    pub fn link_with_spring(
        &mut self,
        a: EntityId,
        b: EntityId,
        desc: &SpringDesc,
    ) -> Option<JointHandle> {
        let body_a = self.scene.get(a)?.body?;
        let body_b = self.scene.get(b)?.body?;
        Some(self.physics.create_spring(&body_a, &body_b, desc))
    }

    /// Draw a joint as a line segment between its attachment points.
    #[cfg(feature = "physics")]
    pub fn show_link(&mut self, handle: JointHandle) {
        if !self.visible_links.contains(&handle) {
            self.visible_links.push(handle);
        }
    }

    /// Collision pairs that began touching during the most recent step.
    #[cfg(feature = "physics")]
    pub fn started_collisions(&self) -> Vec<CollisionPair> {
        self.collision_events.iter().filter(|c| c.started).copied().collect()
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        // Sync Rapier body positions back to entity positions
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
