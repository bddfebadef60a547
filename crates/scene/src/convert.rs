//! Conversions between the core's `glam` types, Bevy math and IPC messages.
//!
//! Values go through arrays so the conversions hold even if Bevy and the
//! core resolve to different `glam` releases.

use bevy::prelude::*;
use focus::{Alignment, FocusEvent, FocusIndicator, FocusState};
use focus_ipc::{FocusSnapshot, FocusToHost, IndicatorState, SurfaceAlignment};

pub(crate) fn to_core_vec3(v: Vec3) -> glam::Vec3 {
    glam::Vec3::from_array(v.to_array())
}

pub(crate) fn to_bevy_vec3(v: glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

pub(crate) fn to_bevy_quat(q: glam::Quat) -> Quat {
    Quat::from_array(q.to_array())
}

pub(crate) fn rgba(color: [f32; 4]) -> Color {
    Color::srgba(color[0], color[1], color[2], color[3])
}

fn indicator_state(state: FocusState) -> IndicatorState {
    match state {
        FocusState::Initializing => IndicatorState::Initializing,
        FocusState::Tracking => IndicatorState::Tracking,
    }
}

fn surface_alignment(alignment: Alignment) -> SurfaceAlignment {
    match alignment {
        Alignment::Horizontal => SurfaceAlignment::Horizontal,
        Alignment::Vertical => SurfaceAlignment::Vertical,
    }
}

/// Host message for a core event
pub(crate) fn host_message(event: &FocusEvent) -> FocusToHost {
    match *event {
        FocusEvent::StateChanged(state) => FocusToHost::StateChanged {
            state: indicator_state(state),
        },
        FocusEvent::AlignmentChanged(alignment) => FocusToHost::AlignmentChanged {
            alignment: alignment.map(surface_alignment),
        },
        FocusEvent::PlaneContactChanged { on_plane } => {
            FocusToHost::PlaneContactChanged { on_plane }
        }
        FocusEvent::LockChanged { locked } => FocusToHost::LockChanged { locked },
        FocusEvent::Feedback => FocusToHost::HapticPulse,
    }
}

/// Current transform and status of an indicator
pub(crate) fn snapshot(indicator: &FocusIndicator) -> FocusSnapshot {
    FocusSnapshot {
        position: indicator.position().to_array(),
        rotation: indicator.orientation().to_array(),
        scale: indicator.scale(),
        locked: indicator.is_locked(),
        state: indicator_state(indicator.state()),
        alignment: indicator.alignment().map(surface_alignment),
    }
}
