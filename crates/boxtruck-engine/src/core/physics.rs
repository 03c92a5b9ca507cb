use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;
use std::sync::Mutex;

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// Conversion helpers between glam and nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> na::Point2<f32> {
    na::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &na::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by forces, gravity and contacts.
    Dynamic,
    /// Immovable by the solver; only explicit position assignment moves it.
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    /// Axis-aligned rectangle from full width and height.
    pub fn rect(width: f32, height: f32) -> Self {
        ColliderDesc::Cuboid {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }

    fn to_shared_shape(self) -> SharedShape {
        match self {
            ColliderDesc::Ball { radius } => SharedShape::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                SharedShape::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    /// Mass per square unit. Ignored when the body carries an explicit mass.
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.1,
            density: 0.001,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub rotation: f32,
    pub collider: ColliderDesc,
    /// Explicit mass; overrides the material density.
    pub mass: Option<f32>,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            rotation: 0.0,
            collider,
            mass: None,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Handle to a joint in the physics simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

/// A spring between two local attachment points.
///
/// Stiffness and damping are acceleration-based, so the same values behave
/// alike regardless of the masses involved.
#[derive(Debug, Clone, Copy)]
pub struct SpringDesc {
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    /// Whether the two linked bodies still collide with each other.
    pub contacts_enabled: bool,
}

/// A collision event between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
}

impl CollisionPair {
    /// The other member of the pair, if `id` is one of them.
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.entity_a == id {
            Some(self.entity_b)
        } else if self.entity_b == id {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        let mut guard = self.collisions.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
///
/// Forces added through [`apply_force`](Self::apply_force) and
/// [`apply_force_at_point`](Self::apply_force_at_point) act for exactly one
/// step and are then cleared, so a controller that wants a continuous push
/// re-applies it every step.
pub struct PhysicsWorld {
    gravity: na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    /// Bodies with user forces pending for the next step.
    forced: Vec<RigidBodyHandle>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y grows downward, so positive Y gravity pulls bodies toward the ground.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            forced: Vec::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for collision lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let builder = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        let collider = match desc.mass {
            Some(mass) => builder.mass(mass),
            None => builder.density(material.density),
        }
        .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body, its colliders and any joints attached to it.
    /// Removing a body that is already gone does nothing.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for handle in self.forced.drain(..) {
            if let Some(rb) = self.bodies.get_mut(handle) {
                rb.reset_forces(false);
            }
        }

        // Drain collision events and resolve entity IDs from user_data
        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            let entity_a = self.collider_to_entity(h1);
            let entity_b = self.collider_to_entity(h2);

            if let (Some(a), Some(b)) = (entity_a, entity_b) {
                collision_events.push(CollisionPair {
                    entity_a: a,
                    entity_b: b,
                    started,
                });
            }
        }
    }

    /// Apply a force at the body's center of mass for the next step.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
            self.forced.push(body.body_handle);
        }
    }

    /// Apply a force at a world-space point for the next step.
    /// An off-center point also produces torque.
    pub fn apply_force_at_point(&mut self, body: &PhysicsBody, force: Vec2, point: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force_at_point(vec2_to_na(force), vec2_to_point(point), true);
            self.forced.push(body.body_handle);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Set the angular velocity of a body directly (radians per second).
    pub fn set_angular_velocity(&mut self, body: &PhysicsBody, angvel: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_angvel(angvel, true);
        }
    }

    /// Get the current angular velocity of a body.
    pub fn angular_velocity(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.angvel())
            .unwrap_or(0.0)
    }

    /// Teleport a body, keeping its rotation. Works on fixed bodies too.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Query the collider shape of a physics body.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else {
            shape.as_cuboid().map(|cuboid| ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        }
    }

    /// Replace a body's collider shape in place.
    /// The collider keeps its offset, material and events; the body's mass
    /// properties are recomputed on the next step.
    pub fn set_shape(&mut self, body: &PhysicsBody, shape: ColliderDesc) {
        if let Some(collider) = self.colliders.get_mut(body.collider_handle) {
            collider.set_shape(shape.to_shared_shape());
        }
    }

    // -- Joint methods --

    /// Link two bodies with a spring. Returns a handle for later removal.
    pub fn create_spring(
        &mut self,
        body_a: &PhysicsBody,
        body_b: &PhysicsBody,
        desc: &SpringDesc,
    ) -> JointHandle {
        let mut joint = SpringJointBuilder::new(desc.rest_length, desc.stiffness, desc.damping)
            .spring_model(MotorModel::AccelerationBased)
            .local_anchor1(vec2_to_point(desc.anchor_a))
            .local_anchor2(vec2_to_point(desc.anchor_b))
            .build();
        joint.data.set_contacts_enabled(desc.contacts_enabled);
        JointHandle(
            self.impulse_joints
                .insert(body_a.body_handle, body_b.body_handle, joint, true),
        )
    }

    /// World-space positions of a joint's two attachment points.
    pub fn joint_world_anchors(&self, handle: JointHandle) -> Option<(Vec2, Vec2)> {
        let joint = self.impulse_joints.get(handle.0)?;
        let rb1 = self.bodies.get(joint.body1)?;
        let rb2 = self.bodies.get(joint.body2)?;
        let a = rb1.position() * joint.data.local_anchor1();
        let b = rb2.position() * joint.data.local_anchor2();
        Some((Vec2::new(a.x, a.y), Vec2::new(b.x, b.y)))
    }

    /// Number of joints in the simulation.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // -- private helpers --

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(world: &mut PhysicsWorld, id: u32, pos: Vec2) -> PhysicsBody {
        world.create_body(
            EntityId(id),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 }).with_position(pos),
            ColliderMaterial::default(),
        )
    }

    fn step_n(world: &mut PhysicsWorld, n: usize) -> Vec<CollisionPair> {
        let mut events = Vec::new();
        for _ in 0..n {
            world.step_into(&mut events);
        }
        events
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO);
        assert_eq!(world.body_count(), 1);
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO);
        let other = ball(&mut world, 2, Vec2::new(100.0, 0.0));
        world.remove_body(&body);
        world.remove_body(&body);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.body_position(&other).0, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn gravity_affects_dynamic_body() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 100.0));
        world.set_dt(1.0 / 60.0);
        let body = ball(&mut world, 1, Vec2::ZERO);

        let (initial_pos, _) = world.body_position(&body);
        step_n(&mut world, 10);
        let (new_pos, _) = world.body_position(&body);

        // Body should have moved downward (positive Y = down)
        assert!(
            new_pos.y > initial_pos.y,
            "Body should fall: start={}, end={}",
            initial_pos.y,
            new_pos.y
        );
    }

    #[test]
    fn force_lasts_a_single_step() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let body = ball(&mut world, 1, Vec2::ZERO);

        world.apply_force(&body, Vec2::new(1.0, 0.0));
        step_n(&mut world, 1);
        let after_push = world.velocity(&body);
        assert!(after_push.x > 0.0, "Velocity should be positive X: {:?}", after_push);

        step_n(&mut world, 5);
        let later = world.velocity(&body);
        assert!(
            (later.x - after_push.x).abs() < 1e-4,
            "Force must not persist: {} vs {}",
            later.x,
            after_push.x
        );
    }

    #[test]
    fn off_center_force_spins_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::rect(20.0, 20.0)),
            ColliderMaterial::default(),
        );

        world.apply_force_at_point(&body, Vec2::new(1.0, 0.0), Vec2::new(0.0, 10.0));
        step_n(&mut world, 1);
        assert!(world.angular_velocity(&body).abs() > 0.0);
    }

    #[test]
    fn explicit_mass_overrides_density() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let light = ball(&mut world, 1, Vec2::ZERO);
        let heavy = world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
                .with_position(Vec2::new(100.0, 0.0))
                .with_mass(5.0),
            ColliderMaterial::default(),
        );

        world.apply_force(&light, Vec2::new(1.0, 0.0));
        world.apply_force(&heavy, Vec2::new(1.0, 0.0));
        step_n(&mut world, 1);
        assert!(world.velocity(&light).x > world.velocity(&heavy).x);
    }

    #[test]
    fn set_angular_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO);
        world.set_angular_velocity(&body, -6.0);
        assert!((world.angular_velocity(&body) + 6.0).abs() < 0.001);
    }

    #[test]
    fn fixed_body_moves_only_when_placed() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 100.0));
        world.set_dt(1.0 / 60.0);

        let body = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::rect(200.0, 20.0))
                .with_position(Vec2::new(0.0, 500.0))
                .with_rotation(0.5),
            ColliderMaterial::default(),
        );

        step_n(&mut world, 10);
        let (pos, _) = world.body_position(&body);
        assert!(
            (pos.y - 500.0).abs() < 0.001,
            "Fixed body should not move: y={}",
            pos.y
        );

        world.set_position(&body, Vec2::new(42.0, 500.0));
        let (pos, rot) = world.body_position(&body);
        assert!((pos.x - 42.0).abs() < 0.001);
        assert!((rot - 0.5).abs() < 0.001, "rotation kept: {}", rot);
    }

    #[test]
    fn collision_events_between_converging_bodies() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 500.0));
        world.set_dt(1.0 / 60.0);

        let _floor = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::rect(400.0, 20.0))
                .with_position(Vec2::new(0.0, 100.0)),
            ColliderMaterial::default(),
        );
        let _falling = ball(&mut world, 2, Vec2::ZERO);

        let all_events = step_n(&mut world, 120);
        let started: Vec<_> = all_events.iter().filter(|e| e.started).collect();
        assert!(
            !started.is_empty(),
            "Should have at least one collision start event"
        );

        // Verify entity IDs are present (order may vary)
        let first = started[0];
        assert_eq!(first.other(EntityId(1)), Some(EntityId(2)));
        assert_eq!(first.other(EntityId(2)), Some(EntityId(1)));
        assert_eq!(first.other(EntityId(3)), None);
    }

    #[test]
    fn collider_shape_ball_and_cuboid() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let ball_body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 15.0 }),
            ColliderMaterial::default(),
        );
        let cuboid_body = world.create_body(
            EntityId(2),
            &BodyDesc::fixed(ColliderDesc::rect(100.0, 20.0)),
            ColliderMaterial::default(),
        );

        assert_eq!(
            world.collider_shape(&ball_body),
            Some(ColliderDesc::Ball { radius: 15.0 })
        );
        assert_eq!(
            world.collider_shape(&cuboid_body),
            Some(ColliderDesc::Cuboid { half_width: 50.0, half_height: 10.0 })
        );
    }

    #[test]
    fn set_shape_replaces_geometry_in_place() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::rect(10.0, 40.0)).with_position(Vec2::new(125.0, 490.0)),
            ColliderMaterial::default(),
        );

        world.set_shape(&body, ColliderDesc::rect(10.0, 70.0));

        assert_eq!(world.collider_shape(&body), Some(ColliderDesc::rect(10.0, 70.0)));
        let (pos, _) = world.body_position(&body);
        assert_eq!(pos, Vec2::new(125.0, 490.0));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn create_spring_joint() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body_a = ball(&mut world, 1, Vec2::ZERO);
        let body_b = ball(&mut world, 2, Vec2::new(50.0, 0.0));

        assert_eq!(world.joint_count(), 0);
        let handle = world.create_spring(&body_a, &body_b, &SpringDesc {
            anchor_a: Vec2::ZERO,
            anchor_b: Vec2::ZERO,
            rest_length: 0.0,
            stiffness: 100.0,
            damping: 10.0,
            contacts_enabled: false,
        });
        assert_eq!(world.joint_count(), 1);
        let (a, b) = world.joint_world_anchors(handle).unwrap();
        assert_eq!((a, b), (Vec2::ZERO, Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn spring_pulls_bodies_together() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);

        let body_a = ball(&mut world, 1, Vec2::ZERO);
        let body_b = ball(&mut world, 2, Vec2::new(100.0, 0.0));

        world.create_spring(&body_a, &body_b, &SpringDesc {
            anchor_a: Vec2::ZERO,
            anchor_b: Vec2::ZERO,
            rest_length: 30.0,
            stiffness: 400.0,
            damping: 20.0,
            contacts_enabled: true,
        });

        step_n(&mut world, 60);

        let (pos_a, _) = world.body_position(&body_a);
        let (pos_b, _) = world.body_position(&body_b);
        let distance = (pos_b.x - pos_a.x).abs();
        assert!(
            distance < 100.0,
            "Spring should pull bodies closer: distance={}",
            distance
        );
    }

    #[test]
    fn joint_anchors_follow_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let truck = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::rect(150.0, 20.0)).with_position(Vec2::new(200.0, 500.0)),
            ColliderMaterial::default(),
        );
        let wheel = world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 20.0 }).with_position(Vec2::new(150.0, 540.0)),
            ColliderMaterial::default(),
        );
        let handle = world.create_spring(&truck, &wheel, &SpringDesc {
            anchor_a: Vec2::new(-50.0, 40.0),
            anchor_b: Vec2::ZERO,
            rest_length: 0.0,
            stiffness: 100.0,
            damping: 10.0,
            contacts_enabled: false,
        });

        let (a, b) = world.joint_world_anchors(handle).unwrap();
        assert!((a - Vec2::new(150.0, 540.0)).length() < 1e-3, "a = {:?}", a);
        assert!((b - Vec2::new(150.0, 540.0)).length() < 1e-3, "b = {:?}", b);
    }

    #[test]
    fn removing_body_drops_its_joints() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body_a = ball(&mut world, 1, Vec2::ZERO);
        let body_b = ball(&mut world, 2, Vec2::new(50.0, 0.0));
        world.create_spring(&body_a, &body_b, &SpringDesc {
            anchor_a: Vec2::ZERO,
            anchor_b: Vec2::ZERO,
            rest_length: 0.0,
            stiffness: 100.0,
            damping: 10.0,
            contacts_enabled: false,
        });

        world.remove_body(&body_b);
        assert_eq!(world.joint_count(), 0);
    }
}
