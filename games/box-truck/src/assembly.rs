//! Scene construction: the ground, the truck with its wheels and lips, and the
//! thrower character.

use glam::Vec2;
use boxtruck_engine::api::types::EntityId;
use boxtruck_engine::components::entity::Entity;
use boxtruck_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, FillColor, ShapeStyle, SpringDesc,
};

pub const WORLD_W: f32 = 800.0;
pub const WORLD_H: f32 = 600.0;

/// Entity labels. Classification only, not unique.
pub mod labels {
    pub const GROUND: &str = "ground";
    pub const TRUCK_BODY: &str = "truckBody";
    pub const TRUCK_WHEEL: &str = "truckWheel";
    pub const TRUCK_LIP_LEFT: &str = "truckLipLeft";
    pub const TRUCK_LIP_RIGHT: &str = "truckLipRight";
    pub const CHARACTER: &str = "character";
    pub const NAMETAG: &str = "nametag";
    pub const BOX: &str = "box";
}

// Ground
const GROUND_POS: Vec2 = Vec2::new(400.0, 580.0);
const GROUND_SIZE: Vec2 = Vec2::new(810.0, 60.0);

// Truck
pub const TRUCK_POS: Vec2 = Vec2::new(200.0, 500.0);
pub const TRUCK_WIDTH: f32 = 150.0;
const TRUCK_HEIGHT: f32 = 20.0;
const WHEEL_RADIUS: f32 = 20.0;
const WHEEL_ANCHORS: [Vec2; 2] = [Vec2::new(-50.0, 40.0), Vec2::new(50.0, 40.0)];
const LIP_ANCHORS: [Vec2; 2] = [Vec2::new(-75.0, -10.0), Vec2::new(75.0, -10.0)];
pub const LIP_WIDTH: f32 = 10.0;
pub const LIP_HEIGHT: f32 = 40.0;
pub const TALL_LIP_HEIGHT: f32 = 70.0;

// Character, all parts share one x
pub const CHARACTER_START_X: f32 = 700.0;
pub const HEAD_Y: f32 = 200.0;
pub const ARM_Y: f32 = HEAD_Y + 20.0;
pub const NAMETAG_Y: f32 = HEAD_Y - 50.0;
const HEAD_RADIUS: f32 = 20.0;
const ARM_SIZE: Vec2 = Vec2::new(5.0, 40.0);
const ARM_POSE: f32 = 0.5;
const NAMETAG_SIZE: Vec2 = Vec2::new(60.0, 30.0);
const NAMETAG_GLYPH: char = 'B';
const NAMETAG_GLYPH_SIZE: f32 = 12.0;

/// Spring stiffness (1/s²) that a coefficient of 1.0 maps onto.
const RIGID_STIFFNESS: f32 = 3000.0;

const BROWN: FillColor = FillColor::hex(0xa52a2a);
const BLACK: FillColor = FillColor::hex(0x000000);
const LIGHT_BLUE: FillColor = FillColor::hex(0xadd8e6);
const GREEN: FillColor = FillColor::hex(0x008000);
const RED: FillColor = FillColor::hex(0xff0000);
const GROUND_GRAY: FillColor = FillColor::hex(0x4a4a4a);

/// Options for a link between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintConfig {
    /// 0 = no coupling, 1 = rigid.
    pub stiffness: f32,
    /// Whether the renderer draws the link.
    pub visible: bool,
}

impl ConstraintConfig {
    pub const WHEEL: Self = Self { stiffness: 0.2, visible: false };
    pub const LIP: Self = Self { stiffness: 0.8, visible: true };

    /// Zero-length spring pulling the two attachment points together.
    pub fn spring(&self, anchor_a: Vec2, anchor_b: Vec2) -> SpringDesc {
        let stiffness = self.stiffness.clamp(0.0, 1.0) * RIGID_STIFFNESS;
        SpringDesc {
            anchor_a,
            anchor_b,
            rest_length: 0.0,
            stiffness,
            damping: stiffness.sqrt(),
            contacts_enabled: false,
        }
    }
}

fn spawn_part(
    ctx: &mut EngineContext,
    label: &str,
    style: ShapeStyle,
    desc: BodyDesc,
) -> EntityId {
    let id = ctx.next_id();
    let entity = Entity::new(id).with_label(label).with_style(style);
    ctx.spawn_with_body(entity, desc, ColliderMaterial::default())
}

fn link(
    ctx: &mut EngineContext,
    a: EntityId,
    b: EntityId,
    anchor_a: Vec2,
    config: ConstraintConfig,
) {
    let Some(handle) = ctx.link_with_spring(a, b, &config.spring(anchor_a, Vec2::ZERO)) else {
        return;
    };
    if config.visible {
        ctx.show_link(handle);
    }
}

/// The static floor boxes break on.
pub fn spawn_ground(ctx: &mut EngineContext) -> EntityId {
    spawn_part(
        ctx,
        labels::GROUND,
        ShapeStyle::filled(GROUND_GRAY),
        BodyDesc::fixed(ColliderDesc::rect(GROUND_SIZE.x, GROUND_SIZE.y)).with_position(GROUND_POS),
    )
}

/// Truck body with two sprung wheels and two sprung lips.
#[derive(Debug, Clone)]
pub struct TruckAssembly {
    pub body: EntityId,
    pub wheels: [EntityId; 2],
    /// Left, then right.
    pub lips: [EntityId; 2],
}

impl TruckAssembly {
    pub fn spawn(ctx: &mut EngineContext) -> Self {
        let body = spawn_part(
            ctx,
            labels::TRUCK_BODY,
            ShapeStyle::filled(BROWN),
            BodyDesc::dynamic(ColliderDesc::rect(TRUCK_WIDTH, TRUCK_HEIGHT)).with_position(TRUCK_POS),
        );

        let wheels = WHEEL_ANCHORS.map(|anchor| {
            spawn_part(
                ctx,
                labels::TRUCK_WHEEL,
                ShapeStyle::filled(BLACK),
                BodyDesc::dynamic(ColliderDesc::Ball { radius: WHEEL_RADIUS })
                    .with_position(TRUCK_POS + anchor),
            )
        });

        let lip_labels = [labels::TRUCK_LIP_LEFT, labels::TRUCK_LIP_RIGHT];
        let lips = [0, 1].map(|i| {
            spawn_part(
                ctx,
                lip_labels[i],
                ShapeStyle::filled(BROWN),
                BodyDesc::dynamic(ColliderDesc::rect(LIP_WIDTH, LIP_HEIGHT))
                    .with_position(TRUCK_POS + LIP_ANCHORS[i]),
            )
        });

        for (wheel, anchor) in wheels.iter().zip(WHEEL_ANCHORS) {
            link(ctx, body, *wheel, anchor, ConstraintConfig::WHEEL);
        }
        for (lip, anchor) in lips.iter().zip(LIP_ANCHORS) {
            link(ctx, body, *lip, anchor, ConstraintConfig::LIP);
        }

        Self { body, wheels, lips }
    }

    pub fn x(&self, ctx: &EngineContext) -> f32 {
        ctx.position(self.body).map_or(TRUCK_POS.x, |p| p.x)
    }
}

/// The thrower: head, two arms and a nametag, moved only by assignment.
/// The parts are fixed bodies, so boxes land on them and bounce off them.
#[derive(Debug, Clone)]
pub struct CharacterAssembly {
    pub head: EntityId,
    pub arms: [EntityId; 2],
    pub nametag: EntityId,
}

impl CharacterAssembly {
    pub fn spawn(ctx: &mut EngineContext) -> Self {
        let part = |collider, y, rotation| {
            BodyDesc::fixed(collider)
                .with_position(Vec2::new(CHARACTER_START_X, y))
                .with_rotation(rotation)
        };
        let skin = ShapeStyle::filled(LIGHT_BLUE);

        let head = spawn_part(
            ctx,
            labels::CHARACTER,
            skin,
            part(ColliderDesc::Ball { radius: HEAD_RADIUS }, HEAD_Y, 0.0),
        );
        let arm = ColliderDesc::rect(ARM_SIZE.x, ARM_SIZE.y);
        let arms = [
            spawn_part(ctx, labels::CHARACTER, skin, part(arm, ARM_Y, ARM_POSE)),
            spawn_part(ctx, labels::CHARACTER, skin, part(arm, ARM_Y, -ARM_POSE)),
        ];
        let nametag = spawn_part(
            ctx,
            labels::NAMETAG,
            ShapeStyle::filled(GREEN).with_glyph(NAMETAG_GLYPH, RED, NAMETAG_GLYPH_SIZE),
            part(ColliderDesc::rect(NAMETAG_SIZE.x, NAMETAG_SIZE.y), NAMETAG_Y, 0.0),
        );

        Self { head, arms, nametag }
    }

    /// Every part with the fixed row it rides on.
    pub fn parts(&self) -> [(EntityId, f32); 4] {
        [
            (self.head, HEAD_Y),
            (self.arms[0], ARM_Y),
            (self.arms[1], ARM_Y),
            (self.nametag, NAMETAG_Y),
        ]
    }

    /// The arm boxes are thrown from.
    pub fn throwing_arm(&self) -> EntityId {
        self.arms[1]
    }

    pub fn x(&self, ctx: &EngineContext) -> f32 {
        ctx.position(self.head).map_or(CHARACTER_START_X, |p| p.x)
    }
}
