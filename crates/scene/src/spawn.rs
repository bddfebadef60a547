//! Builds the indicator's entity tree once.
//!
//! ```text
//! FocusEntity (root: position, orientation, distance scale)
//! └── Positioning (square scale, open or closed)
//!     ├── CursorInnerPointer (sphere)
//!     └── s0 .. s7 (segment quads)
//! ```
//!
//! Every child is recorded in [`FocusParts`] at spawn time, so the
//! per-frame system addresses them directly instead of searching by name.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use focus::{FocusError, FocusIndicator, Segment};
use focus_config::{ClassicStyle, FocusConfig};

use crate::convert::{rgba, to_bevy_vec3};

/// Indicator state attached to the root entity
#[derive(Component)]
pub struct FocusEntity {
    pub indicator: FocusIndicator,
}

/// Typed table of the indicator's child entities
#[derive(Component, Debug, Clone, Copy)]
pub struct FocusParts {
    pub positioning: Entity,
    pub inner_pointer: Entity,
    pub segments: [Entity; 8],
}

/// Marker for the positioning entity
#[derive(Component)]
pub struct FocusPositioning;

/// Marker for the inner pointer sphere
#[derive(Component)]
pub struct CursorInnerPointer;

/// One outer segment, by index
#[derive(Component, Debug, Clone, Copy)]
pub struct FocusSegment(pub u8);

/// Message requesting a new indicator built from the current [`FocusConfig`]
#[derive(Message, Default)]
pub struct SpawnFocusEntity;

/// Local transform of a segment quad (unit plane scaled to the stroke)
pub(crate) fn segment_transform(segment: &Segment, style: &ClassicStyle) -> Transform {
    let extent = segment.extent(style);
    Transform::from_translation(to_bevy_vec3(segment.position))
        .with_scale(Vec3::new(extent.x, 1.0, extent.y))
}

fn overlay_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Spawn a focus indicator and its children.
pub fn spawn_focus_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: FocusConfig,
) -> Result<Entity, FocusError> {
    let indicator = FocusIndicator::new(config)?;
    let style = indicator.config().style;

    let root = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Name::new("FocusEntity"),
        ))
        .id();

    let positioning = commands
        .spawn((
            Transform::from_scale(Vec3::splat(indicator.positioning_scale())),
            Visibility::Inherited,
            FocusPositioning,
            Name::new("Positioning"),
            ChildOf(root),
        ))
        .id();

    let [r, g, b] = style.inner_pointer_color;
    let inner_pointer = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(style.inner_pointer_radius).mesh().uv(16, 12))),
            MeshMaterial3d(materials.add(overlay_material(Color::srgba(
                r,
                g,
                b,
                indicator.inner_pointer().opacity,
            )))),
            Transform::default(),
            CursorInnerPointer,
            Name::new("CursorInnerPointer"),
            ChildOf(positioning),
        ))
        .id();

    let quad = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
    let segments = indicator.segments().clone().map(|segment| {
        commands
            .spawn((
                Mesh3d(quad.clone()),
                MeshMaterial3d(materials.add(overlay_material(rgba(segment.color)))),
                segment_transform(&segment, &style),
                FocusSegment(segment.index),
                Name::new(segment.name()),
                ChildOf(positioning),
            ))
            .id()
    });

    commands.entity(root).insert((
        FocusEntity { indicator },
        FocusParts {
            positioning,
            inner_pointer,
            segments,
        },
    ));

    info!("Spawned focus indicator {:?}", root);
    Ok(root)
}

/// Startup system: one indicator from the configured defaults
pub(crate) fn spawn_default_focus_entity(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FocusConfig>,
) {
    if let Err(err) = spawn_focus_entity(&mut commands, &mut meshes, &mut materials, config.clone()) {
        warn!("Could not spawn focus indicator: {}", err);
    }
}

/// Handle spawn requests from the host
pub(crate) fn handle_spawn_requests(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FocusConfig>,
    mut requests: MessageReader<SpawnFocusEntity>,
) {
    for _ in requests.read() {
        if let Err(err) = spawn_focus_entity(&mut commands, &mut meshes, &mut materials, config.clone()) {
            warn!("Could not spawn focus indicator: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focus::classic_segments;

    #[test]
    fn test_segment_transform_scales_unit_quad() {
        let style = ClassicStyle::default();
        let segments = classic_segments(&style, [1.0; 4]);

        let horizontal = segment_transform(&segments[0], &style);
        assert!((horizontal.scale.x - style.open_segment_length).abs() < 1e-6);
        assert!((horizontal.scale.z - style.thickness).abs() < 1e-6);

        let vertical = segment_transform(&segments[2], &style);
        assert!((vertical.scale.x - style.thickness).abs() < 1e-6);
        assert!((vertical.scale.z - style.open_segment_length).abs() < 1e-6);
        assert!((vertical.translation.x + 0.5).abs() < 1e-6);
    }
}
