//! Map viewport and markers.
//!
//! [`MapRenderer`] owns the viewport, the base tile layer and every marker
//! entity. It moves through `Uninitialized -> Ready -> Disposed` exactly once;
//! any call that does not fit the current state fails with a [`MapError`].
//!
//! Markers are plain ECS entities: bin markers carry [`BinMarker`], the single
//! "you are here" pin carries [`UserPositionMarker`]. Both have a
//! [`MapPosition`], a [`MarkerStyle`] and a [`Popup`].

mod renderer;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use renderer::{MapLifecycle, MapRenderer};
pub use systems::{dispose_on_teardown, initialize_map, sync_bin_markers, MapPlugin};
pub use types::{
    BinMarker, BinsRefreshed, MapError, MapPosition, MapTeardown, MarkerStyle, Popup, TileLayer,
    UserPositionMarker, Viewport, USER_MARKER_LABEL,
};
