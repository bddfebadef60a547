//! The focus indicator and its per-frame update.
//!
//! Each frame runs, in order:
//! 1. lifecycle: a tracked hit promotes to `Tracking`, none demotes to `Initializing`
//! 2. position along the camera forward ray (center raycast or default distance)
//! 3. alignment filter and orientation animation (tracking only)
//! 4. distance-based scale
//! 5. proximity lock against the reference point
//!
//! The update never fails. Missing data skips the affected step, and the
//! outcome is reported as a list of [`FocusEvent`]s for the host to act on.

use glam::{Affine3A, Quat, Vec3};
use tracing::{debug, trace, warn};

use focus_config::{FocusConfig, RaycastTarget};

use crate::alignment::{FilterDecision, classify_alignment, filter_alignment};
use crate::animator::OrientationAnimator;
use crate::error::FocusError;
use crate::history::AlignmentHistory;
use crate::lock::{LockResolver, PointerSnap};
use crate::position::{inner_pointer_opacity, resolve_position};
use crate::scale::scale_based_on_distance;
use crate::segment::{Segment, classic_segments};
use crate::session::{ArSession, smart_raycast};
use crate::types::{Alignment, CameraTransform, FocusState, RaycastResult, TargetAlignment};

/// The dot at the center of the square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerPointer {
    /// Position in the indicator's positioning space
    pub local_position: Vec3,
    /// 1.0 while the center ray hits something, 0.0 otherwise
    pub opacity: f32,
}

impl Default for InnerPointer {
    fn default() -> Self {
        Self {
            local_position: Vec3::ZERO,
            opacity: 1.0,
        }
    }
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusEvent {
    StateChanged(FocusState),
    AlignmentChanged(Option<Alignment>),
    /// The tracked hit moved onto or off a detected plane
    PlaneContactChanged { on_plane: bool },
    LockChanged { locked: bool },
    /// Haptic pulse request; emitted once per lock flip
    Feedback,
}

/// Snapshot of the AR frame handed to [`FocusIndicator::update`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput<'a> {
    pub camera: Option<CameraTransform>,
    /// Screen-center raycast results, nearest first
    pub center_hits: &'a [RaycastResult],
    /// Result of the smart raycast, drives alignment
    pub tracked_hit: Option<&'a RaycastResult>,
    pub anchor_count: usize,
    /// World position of the lock reference point, if present in the scene
    pub reference_point: Option<Vec3>,
}

/// What happened during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// False when the frame was skipped entirely
    pub updated: bool,
    pub events: Vec<FocusEvent>,
}

impl FrameReport {
    /// Number of feedback pulses requested this frame
    pub fn feedback_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FocusEvent::Feedback))
            .count()
    }

    /// New lock state, if it changed this frame
    pub fn lock_change(&self) -> Option<bool> {
        self.events.iter().find_map(|e| match e {
            FocusEvent::LockChanged { locked } => Some(*locked),
            _ => None,
        })
    }
}

/// The focus indicator: transform, alignment, lock and visual parts
#[derive(Debug, Clone)]
pub struct FocusIndicator {
    config: FocusConfig,
    position: Vec3,
    orientation: Quat,
    scale: f32,
    state: FocusState,
    alignment: Option<Alignment>,
    on_plane: bool,
    enabled: bool,
    history: AlignmentHistory,
    animator: OrientationAnimator,
    lock: LockResolver,
    inner: InnerPointer,
    segments: [Segment; 8],
}

impl FocusIndicator {
    /// Build an indicator from a validated configuration
    pub fn new(config: FocusConfig) -> Result<Self, FocusError> {
        config.validate()?;

        Ok(Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
            state: FocusState::Initializing,
            alignment: None,
            on_plane: false,
            enabled: true,
            history: AlignmentHistory::new(config.history_capacity),
            animator: OrientationAnimator::new(config.alignment_blend, config.convergence_dot),
            lock: LockResolver::new(config.lock_threshold, config.lock_min_anchor_count),
            inner: InnerPointer::default(),
            segments: classic_segments(&config.style, config.style.off_plane_color),
            config,
        })
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Distance-based scale factor of the whole indicator
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn is_on_plane(&self) -> bool {
        self.on_plane
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn history(&self) -> &AlignmentHistory {
        &self.history
    }

    pub fn inner_pointer(&self) -> &InnerPointer {
        &self.inner
    }

    pub fn segments(&self) -> &[Segment; 8] {
        &self.segments
    }

    /// Scale of the positioning space holding the segments and inner pointer
    pub fn positioning_scale(&self) -> f32 {
        if self.on_plane {
            self.config.closed_square_scale()
        } else {
            self.config.open_square_scale()
        }
    }

    /// World transform of the indicator root
    pub fn world_transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation,
            self.position,
        )
    }

    /// World transform of the positioning space (root times positioning scale)
    pub fn positioning_transform(&self) -> Affine3A {
        self.world_transform() * Affine3A::from_scale(Vec3::splat(self.positioning_scale()))
    }

    /// Enable or disable per-frame updates
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("Focus indicator {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    /// Swap in a new configuration, keeping the current state.
    ///
    /// On error the previous configuration stays in effect.
    pub fn reconfigure(&mut self, config: FocusConfig) -> Result<(), FocusError> {
        if let Err(err) = config.validate() {
            warn!("Rejected focus configuration: {}", err);
            return Err(err.into());
        }

        self.history.set_capacity(config.history_capacity);
        self.animator
            .retune(config.alignment_blend, config.convergence_dot);
        self.lock
            .retune(config.lock_threshold, config.lock_min_anchor_count);

        if config.style != self.config.style {
            let color = if self.on_plane {
                config.style.on_plane_color
            } else {
                config.style.off_plane_color
            };
            self.segments = classic_segments(&config.style, color);
            if self.on_plane {
                for segment in &mut self.segments {
                    segment.close(&config.style);
                }
            }
        }

        self.config = config;
        Ok(())
    }

    /// Pull this frame's data from the host session and update.
    pub fn update_from_session(
        &mut self,
        session: &dyn ArSession,
        reference_point: Option<Vec3>,
    ) -> FrameReport {
        if !self.enabled {
            return FrameReport::default();
        }
        let Some(camera) = session.camera_transform() else {
            trace!("No camera transform, skipping focus update");
            return FrameReport::default();
        };

        let tracked = smart_raycast(session, &camera, &self.config.allowed_raycasts);
        let center_hits =
            session.raycast_from_screen_center(RaycastTarget::EstimatedPlane, TargetAlignment::Any);

        self.update(&FrameInput {
            camera: Some(camera),
            center_hits: &center_hits,
            tracked_hit: tracked.as_ref(),
            anchor_count: session.anchor_count(),
            reference_point,
        })
    }

    /// Run one frame of the indicator.
    pub fn update(&mut self, input: &FrameInput<'_>) -> FrameReport {
        if !self.enabled {
            return FrameReport::default();
        }
        let Some(camera) = input.camera else {
            trace!("No camera transform, skipping focus update");
            return FrameReport::default();
        };

        let mut report = FrameReport {
            updated: true,
            events: Vec::new(),
        };

        let next_state = if input.tracked_hit.is_some() {
            FocusState::Tracking
        } else {
            FocusState::Initializing
        };
        self.set_state(next_state, &mut report);

        let resolved = resolve_position(input.center_hits, &camera, self.config.default_distance);
        self.position = resolved.position;
        self.inner.opacity = inner_pointer_opacity(resolved.has_hit);

        if let (FocusState::Tracking, Some(hit)) = (self.state, input.tracked_hit) {
            self.set_on_plane(hit.anchor.is_some(), &mut report);
            self.update_alignment(hit, &mut report);
        }

        self.scale = scale_based_on_distance(self.position, Some(&camera), &self.config.scale);

        self.update_lock(input.anchor_count, input.reference_point, &mut report);

        trace!(
            "focus frame: position {:?}, scale {:.3}, state {:?}",
            self.position, self.scale, self.state
        );
        report
    }

    fn set_state(&mut self, state: FocusState, report: &mut FrameReport) {
        if self.state == state {
            return;
        }
        debug!("Focus state {:?} -> {:?}", self.state, state);
        self.state = state;
        report.events.push(FocusEvent::StateChanged(state));

        if state == FocusState::Initializing {
            self.animator.stop();
            self.set_on_plane(false, report);
            if self.alignment.take().is_some() {
                report.events.push(FocusEvent::AlignmentChanged(None));
            }
        }
    }

    fn set_on_plane(&mut self, on_plane: bool, report: &mut FrameReport) {
        if self.on_plane == on_plane {
            return;
        }
        self.on_plane = on_plane;

        let style = self.config.style;
        let color = if on_plane {
            style.on_plane_color
        } else {
            style.off_plane_color
        };
        for segment in &mut self.segments {
            if on_plane {
                segment.close(&style);
            } else {
                segment.open(&style);
            }
            segment.color = color;
        }
        report.events.push(FocusEvent::PlaneContactChanged { on_plane });
    }

    fn update_alignment(&mut self, hit: &RaycastResult, report: &mut FrameReport) {
        let sample = classify_alignment(hit, self.config.ceiling_up_threshold);
        let FilterDecision::Accept(alignment) = filter_alignment(&mut self.history, &sample) else {
            return;
        };

        let changed = self.alignment != Some(alignment);
        self.orientation =
            self.animator
                .drive(self.orientation, sample.target_orientation, alignment, changed);

        if changed {
            debug!("Focus alignment {:?} -> {:?}", self.alignment, alignment);
            self.alignment = Some(alignment);
            report.events.push(FocusEvent::AlignmentChanged(Some(alignment)));
        }
    }

    fn update_lock(
        &mut self,
        anchor_count: usize,
        reference_point: Option<Vec3>,
        report: &mut FrameReport,
    ) {
        let outcome = self
            .lock
            .evaluate(self.position, anchor_count, reference_point);

        match outcome.snap {
            PointerSnap::Keep => {}
            PointerSnap::Origin => self.inner.local_position = Vec3::ZERO,
            PointerSnap::WorldPoint(point) => {
                self.inner.local_position =
                    self.positioning_transform().inverse().transform_point3(point);
            }
        }

        if outcome.transition.is_some() {
            report.events.push(FocusEvent::LockChanged {
                locked: outcome.locked,
            });
            report.events.push(FocusEvent::Feedback);
        }
    }
}
