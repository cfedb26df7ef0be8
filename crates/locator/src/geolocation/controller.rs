use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task, TaskPool};

use crate::geo::LatLng;
use crate::map::MapRenderer;

use super::provider::{LocationFailure, LocationProvider};

/// Shown to the user when a locate request ends without a position.
pub const LOCATION_UNAVAILABLE_NOTICE: &str = "Could not get your location.";

/// A locate request ended without a usable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationUnavailableError {
    pub reason: LocationFailure,
}

impl fmt::Display for LocationUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not get your location ({})", self.reason)
    }
}

impl std::error::Error for LocationUnavailableError {}

/// Terminal result of one locate request, tagged with its generation.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocateOutcome {
    pub generation: u64,
    pub result: Result<LatLng, LocationUnavailableError>,
}

struct PendingLocate {
    generation: u64,
    deadline: Duration,
    task: Task<Result<LatLng, LocationFailure>>,
}

/// Drives device location requests, one at a time.
///
/// Requests run on the `AsyncComputeTaskPool`. Starting a new request drops
/// the pending task, which cancels it, and bumps the generation so that an
/// outcome produced for an older request is ignored when applied.
#[derive(Resource)]
pub struct GeolocationController {
    provider: Arc<dyn LocationProvider>,
    pending: Option<PendingLocate>,
    generation: u64,
}

impl GeolocationController {
    pub fn new(provider: impl LocationProvider) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    pub fn from_shared(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            pending: None,
            generation: 0,
        }
    }

    /// Start a request at time `now`, superseding any pending one.
    ///
    /// The request terminates as [`LocationFailure::Timeout`] if the device
    /// has not answered by `now + timeout`. Returns the new generation.
    pub fn locate_user(&mut self, now: Duration, timeout: Duration) -> u64 {
        self.generation += 1;
        if let Some(previous) = self.pending.take() {
            debug!(
                "Locate request {} superseded by {}",
                previous.generation, self.generation
            );
        }

        let future = self.provider.request_position();
        let task = AsyncComputeTaskPool::get_or_init(TaskPool::default).spawn(future);
        self.pending = Some(PendingLocate {
            generation: self.generation,
            deadline: now + timeout,
            task,
        });
        self.generation
    }

    /// Check the pending request. Returns its outcome once, when it is terminal.
    pub fn poll(&mut self, now: Duration) -> Option<LocateOutcome> {
        let pending = self.pending.as_mut()?;
        let generation = pending.generation;

        let result = match block_on(futures_lite::future::poll_once(&mut pending.task)) {
            Some(result) => result,
            None if now >= pending.deadline => Err(LocationFailure::Timeout),
            None => return None,
        };

        // Dropping a finished task is a no-op; dropping a timed out one cancels it.
        self.pending = None;
        Some(LocateOutcome {
            generation,
            result: result.map_err(|reason| LocationUnavailableError { reason }),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Generation of the most recent request (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// Apply a locate outcome to the map.
///
/// Success recenters the viewport at `zoom` and places or replaces the user
/// marker, returning the position. Outcomes of superseded requests are
/// dropped and return `Ok(None)`. Failures leave the viewport and every
/// marker as they were.
pub fn apply_locate_outcome(
    renderer: &mut MapRenderer,
    commands: &mut Commands,
    controller: &GeolocationController,
    outcome: &LocateOutcome,
    zoom: u8,
) -> Result<Option<LatLng>, LocationUnavailableError> {
    if !controller.is_current(outcome.generation) {
        debug!("Discarding stale locate result {}", outcome.generation);
        return Ok(None);
    }

    let position = outcome.result?;
    if let Err(e) = renderer.recenter(position, zoom) {
        warn!("Located at {position} but the map is unavailable: {e}");
        return Ok(None);
    }
    if let Err(e) = renderer.place_user_marker(commands, position) {
        warn!("Could not place user marker: {e}");
        return Ok(None);
    }
    info!("Centered map on user position {position}");
    Ok(Some(position))
}
