//! Per-frame driver: pulls the host session, runs each indicator, then
//! mirrors the result onto its entity tree.

use bevy::prelude::*;
use focus::{FocusEvent, FocusIndicator};

use crate::convert::{host_message, rgba, to_bevy_quat, to_bevy_vec3, to_core_vec3};
use crate::spawn::{FocusEntity, FocusParts, segment_transform};
use crate::{FocusFeedback, FocusLockChanged, HostArSession, OutboundHostMessages, ReferencePoint};

#[allow(clippy::too_many_arguments)]
pub(crate) fn update_focus_entities(
    session: Option<Res<HostArSession>>,
    reference: Query<&GlobalTransform, With<ReferencePoint>>,
    mut focus_query: Query<(Entity, &mut FocusEntity, &FocusParts, &mut Transform)>,
    mut part_transforms: Query<&mut Transform, Without<FocusEntity>>,
    material_handles: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut feedback: MessageWriter<FocusFeedback>,
    mut lock_changes: MessageWriter<FocusLockChanged>,
    mut outbound: ResMut<OutboundHostMessages>,
) {
    let Some(session) = session else {
        return;
    };
    let reference_point = reference
        .iter()
        .next()
        .map(|transform| to_core_vec3(transform.translation()));

    for (entity, mut focus, parts, mut transform) in focus_query.iter_mut() {
        let report = focus
            .indicator
            .update_from_session(&*session.0, reference_point);
        if !report.updated {
            continue;
        }
        let indicator = &focus.indicator;

        transform.translation = to_bevy_vec3(indicator.position());
        transform.rotation = to_bevy_quat(indicator.orientation());
        transform.scale = Vec3::splat(indicator.scale());

        sync_parts(
            indicator,
            parts,
            &mut part_transforms,
            &material_handles,
            &mut materials,
        );

        for event in &report.events {
            match *event {
                FocusEvent::Feedback => {
                    feedback.write(FocusFeedback { entity });
                }
                FocusEvent::LockChanged { locked } => {
                    info!(
                        "Focus indicator {:?} lock {}",
                        entity,
                        if locked { "engaged" } else { "released" }
                    );
                    lock_changes.write(FocusLockChanged { entity, locked });
                }
                _ => {}
            }
            outbound.send(host_message(event));
        }
    }
}

/// Mirror the positioning scale, pointer and segments onto the child entities
fn sync_parts(
    indicator: &FocusIndicator,
    parts: &FocusParts,
    transforms: &mut Query<&mut Transform, Without<FocusEntity>>,
    material_handles: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
) {
    let style = &indicator.config().style;

    if let Ok(mut transform) = transforms.get_mut(parts.positioning) {
        transform.scale = Vec3::splat(indicator.positioning_scale());
    }

    let inner = indicator.inner_pointer();
    if let Ok(mut transform) = transforms.get_mut(parts.inner_pointer) {
        transform.translation = to_bevy_vec3(inner.local_position);
    }
    let [r, g, b] = style.inner_pointer_color;
    set_material_color(
        parts.inner_pointer,
        Color::srgba(r, g, b, inner.opacity),
        material_handles,
        materials,
    );

    for (segment, entity) in indicator.segments().iter().zip(parts.segments) {
        if let Ok(mut transform) = transforms.get_mut(entity) {
            *transform = segment_transform(segment, style);
        }
        set_material_color(entity, rgba(segment.color), material_handles, materials);
    }
}

/// Only touch the asset when the color differs, so unchanged materials are
/// not re-uploaded every frame.
fn set_material_color(
    entity: Entity,
    color: Color,
    material_handles: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
) {
    let Ok(handle) = material_handles.get(entity) else {
        return;
    };
    let unchanged = materials
        .get(&handle.0)
        .is_some_and(|material| material.base_color == color);
    if unchanged {
        return;
    }
    if let Some(material) = materials.get_mut(&handle.0) {
        material.base_color = color;
    }
}
