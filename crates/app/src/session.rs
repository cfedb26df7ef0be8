//! Scripted host session: log the marker set, optionally press "locate me"
//! once, and exit when the answer is in or the frame budget runs out.

use bevy::prelude::*;

use locator::filter::FilterSelection;
use locator::geolocation::{LocateOutcome, LocateRequested, UserNotice};
use locator::map::{BinMarker, BinsRefreshed, MapRenderer, MarkerStyle, Popup};

#[derive(Resource, Debug)]
pub struct HostSession {
    /// Frames run so far.
    pub frame_count: u32,
    /// Give up after this many frames.
    pub max_frames: u32,
    pub locate: bool,
    pub locate_sent: bool,
    pub markers_reported: bool,
    pub located: bool,
}

impl HostSession {
    pub fn new(locate: bool, max_frames: u32) -> Self {
        Self {
            frame_count: 0,
            max_frames,
            locate,
            locate_sent: false,
            markers_reported: false,
            located: false,
        }
    }

    fn is_done(&self) -> bool {
        self.markers_reported && (!self.locate || self.located)
    }
}

/// Log every marker after each refresh.
pub fn report_markers(
    mut refreshed: EventReader<BinsRefreshed>,
    selection: Res<FilterSelection>,
    markers: Query<(&BinMarker, &Popup, &MarkerStyle)>,
    renderer: Res<MapRenderer>,
    mut session: ResMut<HostSession>,
) {
    let Some(last) = refreshed.read().last() else {
        return;
    };

    info!(
        "{}: {} of {} bins on the map",
        selection.summary(),
        last.visible,
        last.total
    );
    for entity in renderer.bin_markers() {
        if let Ok((marker, popup, style)) = markers.get(*entity) {
            info!(
                "  {} {} [{}]",
                marker.bin_id,
                popup.text().replace('\n', " | "),
                style.swatch.hex
            );
        }
    }
    if renderer.shows_empty_notice() {
        info!("  (no bins match the selected waste types)");
    }
    session.markers_reported = true;
}

pub fn drive_session(
    mut session: ResMut<HostSession>,
    renderer: Res<MapRenderer>,
    mut outcomes: EventReader<LocateOutcome>,
    mut notices: EventReader<UserNotice>,
    mut locate: EventWriter<LocateRequested>,
    mut exit: EventWriter<AppExit>,
) {
    session.frame_count += 1;

    if session.locate && !session.locate_sent && renderer.is_ready() {
        info!("Locating user");
        locate.send(LocateRequested);
        session.locate_sent = true;
    }

    for notice in notices.read() {
        warn!("Notice: {}", notice.text);
    }
    for outcome in outcomes.read() {
        if let (Ok(position), Some(viewport)) = (outcome.result, renderer.viewport()) {
            info!(
                "You are here: {position}, map centered at zoom {}",
                viewport.zoom
            );
        }
        session.located = true;
    }

    if session.is_done() {
        exit.send(AppExit::Success);
    } else if session.frame_count >= session.max_frames {
        warn!(
            "Session ended after {} frames without finishing",
            session.frame_count
        );
        exit.send(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_without_locate_after_markers() {
        let mut session = HostSession::new(false, 10);
        assert!(!session.is_done());
        session.markers_reported = true;
        assert!(session.is_done());
    }

    #[test]
    fn test_locate_session_waits_for_outcome() {
        let mut session = HostSession::new(true, 10);
        session.markers_reported = true;
        assert!(!session.is_done());
        session.located = true;
        assert!(session.is_done());
    }
}
