//! Main IPC message enums for communication between the indicator and the host UI.

use focus_config::FocusConfig;
use serde::{Deserialize, Serialize};

use crate::IpcError;

/// Lifecycle of the indicator as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorState {
    Initializing,
    Tracking,
}

/// Surface alignment as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceAlignment {
    Horizontal,
    Vertical,
}

/// Indicator transform and status, for host overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSnapshot {
    pub position: [f32; 3],
    pub rotation: [f32; 4], // Quaternion (x, y, z, w)
    pub scale: f32,
    pub locked: bool,
    pub state: IndicatorState,
    pub alignment: Option<SurfaceAlignment>,
}

/// Messages from the indicator to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FocusToHost {
    /// Lock onto the reference point engaged or released
    LockChanged { locked: bool },

    /// Play one haptic pulse
    HapticPulse,

    /// Indicator lifecycle changed
    StateChanged { state: IndicatorState },

    /// Accepted surface alignment changed (None while initializing)
    AlignmentChanged { alignment: Option<SurfaceAlignment> },

    /// Tracked hit moved onto or off a detected plane
    PlaneContactChanged { on_plane: bool },

    /// Latest transform and status
    Snapshot(FocusSnapshot),

    /// A configuration update was refused
    ConfigRejected { message: String },
}

/// Messages from the host UI to the indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToFocus {
    /// Show or hide the indicator and pause its updates
    SetEnabled { enabled: bool },

    /// Replace the indicator configuration
    UpdateConfig(FocusConfig),

    /// Ask for a `Snapshot` on the next frame
    RequestSnapshot,
}

impl FocusToHost {
    /// Serialize for the host bridge
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl HostToFocus {
    /// Parse a message from the host bridge.
    ///
    /// Configuration updates are validated here so the indicator never sees
    /// an unusable configuration.
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        if json.trim().is_empty() {
            return Err(IpcError::InvalidFormat("empty message".to_string()));
        }
        let message: Self = serde_json::from_str(json)?;
        if let Self::UpdateConfig(config) = &message {
            config.validate()?;
        }
        Ok(message)
    }
}
