use bevy::prelude::*;

use crate::bins::BinRegistry;
use crate::config::MapParams;
use crate::filter::{visible_bins, FilterSelection};
use crate::LocatorSet;

use super::renderer::MapRenderer;
use super::types::{BinsRefreshed, MapTeardown, TileLayer};

/// Startup: center the map from `MapParams` and attach the tile layer.
pub fn initialize_map(params: Res<MapParams>, mut renderer: ResMut<MapRenderer>) {
    if let Err(e) = renderer.initialize(params.center, params.zoom, TileLayer::from_params(&params))
    {
        error!("Map initialization failed: {e}");
    }
}

/// Rebuild bin markers whenever the registry or the filter changes.
///
/// Also runs once on the first frame the renderer is ready, so markers exist
/// even if neither resource changed since startup.
pub fn sync_bin_markers(
    mut commands: Commands,
    registry: Res<BinRegistry>,
    selection: Res<FilterSelection>,
    mut renderer: ResMut<MapRenderer>,
    mut refreshed: EventWriter<BinsRefreshed>,
    mut was_ready: Local<bool>,
) {
    let ready = renderer.is_ready();
    let became_ready = ready && !*was_ready;
    *was_ready = ready;

    if !ready || !(became_ready || registry.is_changed() || selection.is_changed()) {
        return;
    }

    let visible = visible_bins(registry.bins(), &selection);
    match renderer.set_visible_bins(&mut commands, visible.iter().copied()) {
        Ok(count) => {
            debug!("{} ({count}/{} bins)", selection.summary(), registry.len());
            refreshed.send(BinsRefreshed {
                visible: count,
                total: registry.len(),
            });
        }
        Err(e) => warn!("Skipping marker refresh: {e}"),
    }
}

/// Dispose the map when the host tears the screen down.
pub fn dispose_on_teardown(
    mut commands: Commands,
    mut teardown: EventReader<MapTeardown>,
    mut renderer: ResMut<MapRenderer>,
) {
    if teardown.read().count() == 0 {
        return;
    }
    if let Err(e) = renderer.dispose(&mut commands) {
        warn!("Ignoring map teardown: {e}");
    }
}

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_locator_sets(app);
        app.init_resource::<MapParams>()
            .init_resource::<MapRenderer>()
            .init_resource::<BinRegistry>()
            .init_resource::<FilterSelection>()
            .add_event::<BinsRefreshed>()
            .add_event::<MapTeardown>()
            .add_systems(Startup, initialize_map)
            .add_systems(
                Update,
                (
                    sync_bin_markers.in_set(LocatorSet::Markers),
                    dispose_on_teardown.in_set(LocatorSet::Teardown),
                ),
            );
    }
}
