//! "Locate me": ask the device for a position and recenter the map on it.
//!
//! The device is reached through a [`LocationProvider`]. Requests run on the
//! async compute pool and are polled once per frame; only one request is
//! outstanding at a time. Starting a new one drops the previous task and
//! bumps a generation counter, so a late answer to an old request can never
//! move the map.
//!
//! Failures (permission denied, no fix, timeout) leave the map untouched and
//! surface as [`LocationUnavailableError`], which the plugin turns into a
//! [`UserNotice`] for the screen to show.

mod callback;
mod controller;
mod provider;
mod simulated;
mod systems;


pub use callback::{CallbackLocation, LocationRequest};
pub use controller::{
    apply_locate_outcome, GeolocationController, LocateOutcome, LocationUnavailableError,
    LOCATION_UNAVAILABLE_NOTICE,
};
pub use provider::{LocateFuture, LocationFailure, LocationProvider};
pub use simulated::SimulatedLocation;
pub use systems::{
    collect_locate_results, handle_locate_requests, GeolocationPlugin, LocateRequested, UserNotice,
};
