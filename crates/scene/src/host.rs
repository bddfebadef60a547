//! Host command handling

use bevy::prelude::*;
use focus_config::FocusConfig;
use focus_ipc::{FocusToHost, HostToFocus};

use crate::convert::snapshot;
use crate::spawn::FocusEntity;
use crate::{HostCommand, OutboundHostMessages};

pub(crate) fn handle_host_commands(
    mut commands_in: MessageReader<HostCommand>,
    mut focus_query: Query<(&mut FocusEntity, &mut Visibility)>,
    mut config: ResMut<FocusConfig>,
    mut outbound: ResMut<OutboundHostMessages>,
) {
    for HostCommand(command) in commands_in.read() {
        match command {
            HostToFocus::SetEnabled { enabled } => {
                for (mut focus, mut visibility) in focus_query.iter_mut() {
                    focus.indicator.set_enabled(*enabled);
                    *visibility = if *enabled {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                }
            }
            HostToFocus::UpdateConfig(new_config) => {
                if let Err(err) = new_config.validate() {
                    warn!("Rejected focus configuration from host: {}", err);
                    outbound.send(FocusToHost::ConfigRejected {
                        message: err.to_string(),
                    });
                    continue;
                }
                for (mut focus, _) in focus_query.iter_mut() {
                    if let Err(err) = focus.indicator.reconfigure(new_config.clone()) {
                        outbound.send(FocusToHost::ConfigRejected {
                            message: err.to_string(),
                        });
                    }
                }
                *config = new_config.clone();
                debug!("Applied focus configuration update");
            }
            HostToFocus::RequestSnapshot => {
                for (focus, _) in focus_query.iter() {
                    outbound.send(FocusToHost::Snapshot(snapshot(&focus.indicator)));
                }
            }
        }
    }
}
