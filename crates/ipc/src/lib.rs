//! IPC message protocol for the focus indicator
//!
//! Defines the message types exchanged between the indicator (running in
//! the host's frame loop) and the host application UI: lock state and
//! haptic requests going out, enable/config commands coming in.

mod error;
mod messages;

pub use error::IpcError;
pub use messages::{FocusSnapshot, FocusToHost, HostToFocus, IndicatorState, SurfaceAlignment};
