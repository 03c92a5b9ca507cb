//! Box Truck: steer a truck under a character who throws boxes at it.
//! Boxes that miss break on the ground; after four throws the truck's sides
//! grow taller.

use glam::Vec2;
use log::info;
use boxtruck_engine::api::game::GameConfig;
use boxtruck_engine::input::queue::InputQueue;
use boxtruck_engine::{CollisionPair, EngineContext, Game, RandomSource, Rng};

use crate::assembly::{self, CharacterAssembly, TruckAssembly, WORLD_H, WORLD_W};
use crate::collision;
use crate::input::KeyState;
use crate::level::{self, LevelState};
use crate::thrower::{Thrower, THROW_INTERVAL};
use crate::truck;

const GRAVITY: Vec2 = Vec2::new(0.0, 700.0);

/// Game event kinds for the host page.
pub(crate) mod game_events {
    /// `a` = boxes thrown so far.
    pub const BOX_COUNT: f32 = 1.0;
    /// `a` = new lip height.
    pub const SIDES_TALLER: f32 = 2.0;
    /// `a`, `b` = where the box broke.
    pub const BOX_BROKEN: f32 = 3.0;
}

/// Everything one round of play owns.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub level: LevelState,
    pub keys: KeyState,
    pub truck: TruckAssembly,
    pub thrower: Thrower,
}

impl GameSession {
    pub fn spawn(ctx: &mut EngineContext) -> Self {
        assembly::spawn_ground(ctx);
        let truck = TruckAssembly::spawn(ctx);
        let thrower = Thrower::new(CharacterAssembly::spawn(ctx));
        Self {
            level: LevelState::default(),
            keys: KeyState::default(),
            truck,
            thrower,
        }
    }

    /// Per-step rules, run before physics integrates.
    pub fn step(&mut self, ctx: &mut EngineContext) {
        truck::step(ctx, &self.truck, &self.keys, WORLD_W);
        self.thrower.step(ctx);
        level::check(ctx, &mut self.level, &self.truck);
    }
}

pub struct BoxTruck {
    session: Option<GameSession>,
    rng: Box<dyn RandomSource>,
}

impl BoxTruck {
    pub fn new() -> Self {
        Self::with_random(Box::new(Rng::new(boxtruck_web::entropy_seed())))
    }

    pub fn with_random(rng: Box<dyn RandomSource>) -> Self {
        Self { session: None, rng }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }
}

impl Default for BoxTruck {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BoxTruck {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: WORLD_W,
            world_height: WORLD_H,
            gravity: GRAVITY,
            timer_interval: Some(THROW_INTERVAL),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.session = Some(GameSession::spawn(ctx));
        info!(
            "box truck ready: {} bodies, {} springs",
            ctx.physics.body_count(),
            ctx.physics.joint_count()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for event in input.iter() {
            session.keys.apply(event);
        }
        session.step(ctx);
    }

    fn timer(&mut self, ctx: &mut EngineContext) {
        if let Some(session) = self.session.as_mut() {
            session.thrower.on_timer(ctx, self.rng.as_mut(), &mut session.level);
        }
    }

    fn collisions_started(&mut self, ctx: &mut EngineContext, pairs: &[CollisionPair]) {
        collision::remove_grounded_boxes(ctx, pairs);
    }
}
