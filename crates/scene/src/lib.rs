//! Bevy integration for the focus indicator
//!
//! Spawns the indicator's entity tree and drives it every frame from the
//! host's AR session. Host-facing notifications are queued in
//! [`OutboundHostMessages`] for the bridge layer to drain.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use focus::ArSession;
use focus_config::FocusConfig;
use focus_ipc::{FocusToHost, HostToFocus};

mod convert;
mod host;
mod spawn;
mod update;

pub use spawn::{
    CursorInnerPointer, FocusEntity, FocusParts, FocusPositioning, FocusSegment,
    SpawnFocusEntity, spawn_focus_entity,
};

/// The host's AR session, queried once per frame
#[derive(Resource)]
pub struct HostArSession(pub Box<dyn ArSession + Send + Sync>);

impl HostArSession {
    pub fn new(session: impl ArSession + Send + Sync + 'static) -> Self {
        Self(Box::new(session))
    }
}

/// Marks the entity whose translation the indicator locks onto
#[derive(Component, Default)]
pub struct ReferencePoint;

/// Resource for queuing messages to send to the host
/// The bridge layer should drain this and forward it
#[derive(Resource, Default)]
pub struct OutboundHostMessages {
    pub messages: Vec<FocusToHost>,
}

impl OutboundHostMessages {
    /// Queue a message to be sent to the host
    pub fn send(&mut self, msg: FocusToHost) {
        self.messages.push(msg);
    }

    /// Take all queued messages, leaving the queue empty
    pub fn drain(&mut self) -> Vec<FocusToHost> {
        std::mem::take(&mut self.messages)
    }
}

/// One haptic pulse requested by an indicator
#[derive(Message, Debug, Clone, Copy)]
pub struct FocusFeedback {
    pub entity: Entity,
}

/// An indicator locked onto or released the reference point
#[derive(Message, Debug, Clone, Copy)]
pub struct FocusLockChanged {
    pub entity: Entity,
    pub locked: bool,
}

/// Command received from the host
#[derive(Message, Debug, Clone)]
pub struct HostCommand(pub HostToFocus);

/// Registers the indicator's resources, messages and systems.
pub struct FocusEntityPlugin {
    /// Spawn one indicator from the configured defaults at startup
    pub spawn_on_startup: bool,
}

impl Default for FocusEntityPlugin {
    fn default() -> Self {
        Self {
            spawn_on_startup: true,
        }
    }
}

impl Plugin for FocusEntityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusConfig>()
            .init_resource::<OutboundHostMessages>()
            .add_message::<FocusFeedback>()
            .add_message::<FocusLockChanged>()
            .add_message::<HostCommand>()
            .add_message::<SpawnFocusEntity>()
            .add_systems(
                Update,
                (
                    host::handle_host_commands,
                    spawn::handle_spawn_requests,
                    update::update_focus_entities,
                )
                    .chain(),
            );

        if self.spawn_on_startup {
            app.add_systems(Startup, spawn::spawn_default_focus_entity);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use focus::{CameraTransform, RaycastQuery, RaycastResult, RaycastTarget, TargetAlignment};
    use std::sync::{Arc, Mutex};

    /// Scripted session shared between the test and the app
    #[derive(Default)]
    pub(crate) struct ScriptedFrame {
        pub camera: Option<CameraTransform>,
        pub anchors: usize,
        pub tracked: Option<RaycastResult>,
        pub center_hits: Vec<RaycastResult>,
    }

    #[derive(Clone, Default)]
    pub(crate) struct ScriptedSession(pub Arc<Mutex<ScriptedFrame>>);

    impl ScriptedSession {
        pub fn edit(&self, f: impl FnOnce(&mut ScriptedFrame)) {
            if let Ok(mut frame) = self.0.lock() {
                f(&mut frame);
            }
        }
    }

    impl ArSession for ScriptedSession {
        fn camera_transform(&self) -> Option<CameraTransform> {
            self.0.lock().ok().and_then(|frame| frame.camera)
        }

        fn anchor_count(&self) -> usize {
            self.0.lock().map(|frame| frame.anchors).unwrap_or(0)
        }

        fn raycast_from_screen_center(
            &self,
            _target: RaycastTarget,
            _alignment: TargetAlignment,
        ) -> Vec<RaycastResult> {
            self.0
                .lock()
                .map(|frame| frame.center_hits.clone())
                .unwrap_or_default()
        }

        fn raycast(&self, _query: &RaycastQuery) -> Vec<RaycastResult> {
            self.0
                .lock()
                .ok()
                .and_then(|frame| frame.tracked)
                .into_iter()
                .collect()
        }
    }

    /// Headless app with the plugin and one indicator spawned
    pub(crate) fn test_app(session: Option<ScriptedSession>) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(FocusEntityPlugin::default());
        if let Some(session) = session {
            app.insert_resource(HostArSession::new(session));
        }
        app.update();
        app
    }

    pub(crate) fn focus_entity(app: &mut App) -> Entity {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<FocusEntity>>();
        query.iter(app.world()).next().expect("indicator spawned")
    }
}
