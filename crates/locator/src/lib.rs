//! Waste bin locator: a registry of collection points, category filtering,
//! a marker-based map model and "locate me" geolocation, packaged as Bevy
//! plugins.
//!
//! The host inserts a [`bins::BinRegistry`], mutates
//! [`filter::FilterSelection`] from its filter panel and sends
//! [`geolocation::LocateRequested`] from its locate button. Everything else
//! is driven by the systems in [`LocatorPlugin`].

use bevy::prelude::*;

pub mod bins;
pub mod config;
pub mod details;
pub mod filter;
pub mod geo;
pub mod geolocation;
pub mod map;
pub mod styling;

pub use bins::{Bin, BinRegistry, BinStatus, WasteCategory};
pub use filter::{FilterOption, FilterSelection};
pub use geo::LatLng;

/// Ordered phases for the locator systems in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Markers` → `Geolocation` → `Teardown`.
/// Marker refreshes and locate results touch disjoint state, but running
/// teardown last guarantees nothing is drawn on a disposed map.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocatorSet {
    /// Host requests (locate button presses).
    Input,
    /// Rebuild bin markers after registry or filter changes.
    Markers,
    /// Poll the device and move the viewport.
    Geolocation,
    /// Dispose the map when the screen goes away.
    Teardown,
}

pub(crate) fn configure_locator_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            LocatorSet::Input,
            LocatorSet::Markers,
            LocatorSet::Geolocation,
            LocatorSet::Teardown,
        )
            .chain(),
    );
}

/// Map and geolocation plugins together.
pub struct LocatorPlugin;

impl Plugin for LocatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((map::MapPlugin, geolocation::GeolocationPlugin));
    }
}
