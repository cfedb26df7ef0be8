use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use locator::geolocation::GeolocationController;
use locator::{LocatorPlugin, LocatorSet};

mod host_config;
mod session;

use host_config::HostConfig;
use session::{drive_session, report_markers, HostSession};

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Frames to allow on top of the locate timeout before giving up.
const EXTRA_FRAMES: u32 = 120;

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME_TIME)))
        .add_plugins(LogPlugin::default());

    let config = match HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return AppExit::error();
        }
    };

    info!(
        "Loaded {} bins, map centered at {} zoom {}",
        config.registry.len(),
        config.params.center,
        config.params.zoom
    );

    let timeout_frames = (config.params.locate_timeout().as_millis() / FRAME_TIME.as_millis())
        .min(u128::from(u32::MAX - EXTRA_FRAMES)) as u32;
    let session = HostSession::new(config.locate.is_some(), timeout_frames + EXTRA_FRAMES);

    if let Some(mode) = config.locate {
        app.insert_resource(GeolocationController::new(
            mode.provider(config.params.center),
        ));
    }

    app.add_plugins(LocatorPlugin)
        .insert_resource(config.params)
        .insert_resource(config.registry)
        .insert_resource(config.selection)
        .insert_resource(session)
        .add_systems(
            Update,
            (report_markers, drive_session)
                .chain()
                .after(LocatorSet::Teardown),
        );

    app.run()
}
