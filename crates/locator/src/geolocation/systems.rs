use bevy::prelude::*;

use crate::config::MapParams;
use crate::map::MapRenderer;
use crate::LocatorSet;

use super::controller::{
    apply_locate_outcome, GeolocationController, LocateOutcome, LOCATION_UNAVAILABLE_NOTICE,
};

/// The user pressed "locate me".
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LocateRequested;

/// Short message for the screen to show the user.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub text: String,
}

impl UserNotice {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Start a device request for the latest `LocateRequested` of the frame.
///
/// Several presses in one frame collapse into a single request. Without a
/// `GeolocationController` the request fails immediately with a notice.
pub fn handle_locate_requests(
    mut requests: EventReader<LocateRequested>,
    time: Res<Time>,
    params: Res<MapParams>,
    controller: Option<ResMut<GeolocationController>>,
    mut notices: EventWriter<UserNotice>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Some(mut controller) = controller else {
        warn!("Locate requested but no location provider is installed");
        notices.send(UserNotice::new(LOCATION_UNAVAILABLE_NOTICE));
        return;
    };

    let generation = controller.locate_user(time.elapsed(), params.locate_timeout());
    debug!("Locate request {generation} started");
}

/// Poll the pending request and apply its outcome to the map.
pub fn collect_locate_results(
    mut commands: Commands,
    time: Res<Time>,
    params: Res<MapParams>,
    controller: Option<ResMut<GeolocationController>>,
    mut renderer: ResMut<MapRenderer>,
    mut outcomes: EventWriter<LocateOutcome>,
    mut notices: EventWriter<UserNotice>,
) {
    let Some(mut controller) = controller else {
        return;
    };
    let Some(outcome) = controller.poll(time.elapsed()) else {
        return;
    };

    if let Err(e) = apply_locate_outcome(
        &mut renderer,
        &mut commands,
        &controller,
        &outcome,
        params.locate_zoom,
    ) {
        warn!("{e}");
        notices.send(UserNotice::new(LOCATION_UNAVAILABLE_NOTICE));
    }
    outcomes.send(outcome);
}

pub struct GeolocationPlugin;

impl Plugin for GeolocationPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_locator_sets(app);
        app.init_resource::<MapParams>()
            .init_resource::<MapRenderer>()
            .init_resource::<Time>()
            .add_event::<LocateRequested>()
            .add_event::<LocateOutcome>()
            .add_event::<UserNotice>()
            .add_systems(
                Update,
                (
                    handle_locate_requests.in_set(LocatorSet::Input),
                    collect_locate_results.in_set(LocatorSet::Geolocation),
                ),
            );
    }
}
