use crate::components::entity::Entity;
use crate::components::style::FillColor;
use crate::renderer::instance::{ShapeBuffer, ShapeGeometry, ShapeInstance};

fn pack_rgb(c: FillColor) -> f32 {
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    ((to_byte(c.r) << 16) | (to_byte(c.g) << 8) | to_byte(c.b)) as f32
}

/// Build the shape buffer from a set of entities, in scene order.
///
/// `geometry` resolves each entity's outline (usually from its collider);
/// returning `None` skips the entity. Inactive and unstyled entities are
/// skipped as well.
pub fn build_shape_buffer<'a, F>(
    entities: impl Iterator<Item = &'a Entity>,
    mut geometry: F,
    buffer: &mut ShapeBuffer,
) where
    F: FnMut(&Entity) -> Option<ShapeGeometry>,
{
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let style = match &entity.style {
            Some(s) => s,
            None => continue,
        };
        let Some(shape) = geometry(entity) else {
            continue;
        };

        let mut instance = ShapeInstance::new(entity.pos.x, entity.pos.y, entity.rotation, shape);
        instance.r = style.fill.r;
        instance.g = style.fill.g;
        instance.b = style.fill.b;
        instance.alpha = style.alpha;
        if let Some(glyph) = style.glyph {
            instance.glyph = glyph as u32 as f32;
            instance.glyph_rgb = pack_rgb(style.glyph_color);
            instance.glyph_size = style.glyph_size;
        }

        if !buffer.push(instance) {
            log::warn!("shape buffer full; dropping remaining shapes this frame");
            break;
        }
    }
}

/// Fallback outline for entities without a collider: a rectangle of `scale`.
pub fn scale_geometry(entity: &Entity) -> ShapeGeometry {
    ShapeGeometry::Rect {
        half_width: entity.scale.x / 2.0,
        half_height: entity.scale.y / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::style::ShapeStyle;
    use glam::Vec2;

    #[test]
    fn styled_entities_become_shapes() {
        let mut crate_box = Entity::new(EntityId(1))
            .with_pos(Vec2::new(10.0, 20.0))
            .with_style(ShapeStyle::filled(FillColor::hex(0xffa500)));
        crate_box.scale = Vec2::new(30.0, 30.0);
        let entities = vec![crate_box, Entity::new(EntityId(2)).with_pos(Vec2::new(30.0, 40.0))];

        let mut buffer = ShapeBuffer::new();
        build_shape_buffer(entities.iter(), |e| Some(scale_geometry(e)), &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.instances[0];
        assert_eq!((inst.x, inst.y), (10.0, 20.0));
        assert_eq!(inst.half_width, 15.0);
        assert_eq!(inst.r, 1.0);
        assert_eq!(inst.glyph, 0.0);
        assert_eq!(inst.glyph_size, 0.0);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1)).with_style(ShapeStyle::default());
        entity.active = false;

        let entities = vec![entity];
        let mut buffer = ShapeBuffer::new();
        build_shape_buffer(entities.iter(), |e| Some(scale_geometry(e)), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn glyph_and_color_are_packed() {
        let entities = vec![Entity::new(EntityId(1)).with_style(
            ShapeStyle::filled(FillColor::hex(0x008000)).with_glyph('B', FillColor::hex(0xff0000), 12.0),
        )];
        let mut buffer = ShapeBuffer::new();
        build_shape_buffer(entities.iter(), |e| Some(scale_geometry(e)), &mut buffer);

        let inst = buffer.instances[0];
        assert_eq!(inst.glyph, 'B' as u32 as f32);
        assert_eq!(inst.glyph_rgb, 0xff0000 as f32);
        assert_eq!(inst.glyph_size, 12.0);
    }

    #[test]
    fn unresolved_geometry_is_skipped() {
        let entities = vec![Entity::new(EntityId(1)).with_style(ShapeStyle::default())];
        let mut buffer = ShapeBuffer::new();
        build_shape_buffer(entities.iter(), |_| None, &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
