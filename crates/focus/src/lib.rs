//! AR focus indicator core - engine independent
//!
//! This crate computes, once per rendered frame, where the focus indicator
//! sits, how it is oriented and scaled, and whether it is locked onto a
//! tracked reference point:
//! - [`position`] - screen-centered placement along the camera forward ray
//! - [`history`] / [`alignment`] - sliding-window plane alignment filter
//! - [`animator`] - idle/animating slerp state machine
//! - [`scale`] - distance-based half-cosine scaling
//! - [`lock`] - proximity lock with single-shot feedback on transitions
//! - [`segment`] - the eight strokes of the classic outer square
//! - [`session`] - the host AR session seam and the smart raycast
//! - [`indicator`] - the per-frame orchestrator tying it all together
//!
//! # Architecture
//!
//! Everything here is pure data and math on `glam` types. The host (the
//! Bevy plugin in `focus-scene`, or any other engine) feeds a snapshot of
//! the AR frame in and applies the resulting transforms to its own scene
//! graph. Nothing blocks or runs off the caller's thread.

pub mod alignment;
pub mod animator;
pub mod error;
pub mod history;
pub mod indicator;
pub mod lock;
pub mod math;
pub mod position;
pub mod scale;
pub mod segment;
pub mod session;
pub mod types;

pub use alignment::{AlignmentSample, FilterDecision, classify_alignment, filter_alignment};
pub use animator::{AnimationState, OrientationAnimator};
pub use error::FocusError;
pub use history::AlignmentHistory;
pub use indicator::{FocusEvent, FocusIndicator, FrameInput, FrameReport, InnerPointer};
pub use lock::{LockOutcome, LockResolver, LockTransition, PointerSnap};
pub use position::{PositionResolution, inner_pointer_opacity, resolve_position};
pub use scale::{scale_based_on_distance, scale_for_distance};
pub use segment::{Corner, OpenDirection, Segment, SegmentAlignment, classic_segments};
pub use session::{ArSession, RaycastQuery, smart_raycast};
pub use types::*;

pub use focus_config::{ClassicStyle, ConfigError, FocusConfig, ScaleCurve};
