use bevy::prelude::*;

use crate::bins::Bin;
use crate::geo::LatLng;
use crate::styling;

use super::types::{
    BinMarker, MapError, MapPosition, MarkerStyle, Popup, TileLayer, UserPositionMarker, Viewport,
};

/// Renderer lifecycle. Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapLifecycle {
    #[default]
    Uninitialized,
    Ready,
    Disposed,
}

/// Owner of the viewport and of every marker entity.
///
/// Marker entities are created and despawned through the `Commands` passed
/// into each call; the renderer keeps their ids so a refresh can replace
/// exactly the bin markers and leave the user marker alone.
#[derive(Resource, Debug, Default)]
pub struct MapRenderer {
    lifecycle: MapLifecycle,
    viewport: Option<Viewport>,
    base_layer: Option<TileLayer>,
    bin_markers: Vec<Entity>,
    user_marker: Option<Entity>,
}

impl MapRenderer {
    /// Set up the viewport and base layer. Valid once, from `Uninitialized`.
    pub fn initialize(
        &mut self,
        center: LatLng,
        zoom: u8,
        base_layer: TileLayer,
    ) -> Result<(), MapError> {
        match self.lifecycle {
            MapLifecycle::Uninitialized => {}
            MapLifecycle::Ready => return Err(MapError::AlreadyInitialized),
            MapLifecycle::Disposed => return Err(MapError::Disposed),
        }
        self.viewport = Some(Viewport { center, zoom });
        self.base_layer = Some(base_layer);
        self.lifecycle = MapLifecycle::Ready;
        info!("Map initialized at {center} zoom {zoom}");
        Ok(())
    }

    /// Replace the bin marker set with one marker per bin in `bins`.
    ///
    /// Existing bin markers are despawned first, so repeated calls with the
    /// same input never accumulate duplicates. The user marker is untouched.
    /// Returns the number of markers created.
    pub fn set_visible_bins<'a>(
        &mut self,
        commands: &mut Commands,
        bins: impl IntoIterator<Item = &'a Bin>,
    ) -> Result<usize, MapError> {
        self.ensure_ready()?;

        for entity in self.bin_markers.drain(..) {
            commands.entity(entity).despawn();
        }

        for bin in bins {
            let entity = commands
                .spawn((
                    Name::new(format!("Bin marker {}", bin.id)),
                    BinMarker {
                        bin_id: bin.id.clone(),
                    },
                    MapPosition(bin.position),
                    MarkerStyle {
                        swatch: styling::status_color(bin.status),
                    },
                    Popup::for_bin(bin),
                ))
                .id();
            self.bin_markers.push(entity);
        }

        if self.bin_markers.is_empty() {
            info!("No bins match the active filters");
        } else {
            debug!("Placed {} bin markers", self.bin_markers.len());
        }
        Ok(self.bin_markers.len())
    }

    /// Release every marker and retire the map. Valid once, from `Ready`.
    pub fn dispose(&mut self, commands: &mut Commands) -> Result<(), MapError> {
        self.ensure_ready()?;

        for entity in self.bin_markers.drain(..) {
            commands.entity(entity).despawn();
        }
        if let Some(entity) = self.user_marker.take() {
            commands.entity(entity).despawn();
        }
        self.viewport = None;
        self.base_layer = None;
        self.lifecycle = MapLifecycle::Disposed;
        info!("Map disposed");
        Ok(())
    }

    /// Move the viewport. Only the geolocation path recenters the map.
    pub(crate) fn recenter(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError> {
        self.ensure_ready()?;
        self.viewport = Some(Viewport { center, zoom });
        Ok(())
    }

    /// Place the "you are here" marker, replacing the previous one.
    pub(crate) fn place_user_marker(
        &mut self,
        commands: &mut Commands,
        position: LatLng,
    ) -> Result<Entity, MapError> {
        self.ensure_ready()?;

        if let Some(previous) = self.user_marker.take() {
            commands.entity(previous).despawn();
        }
        let entity = commands
            .spawn((
                Name::new("User position marker"),
                UserPositionMarker,
                MapPosition(position),
                MarkerStyle {
                    swatch: styling::BLUE_500,
                },
                Popup::user_position(),
            ))
            .id();
        self.user_marker = Some(entity);
        Ok(entity)
    }

    fn ensure_ready(&self) -> Result<(), MapError> {
        match self.lifecycle {
            MapLifecycle::Ready => Ok(()),
            MapLifecycle::Uninitialized => Err(MapError::NotInitialized),
            MapLifecycle::Disposed => Err(MapError::Disposed),
        }
    }

    pub fn lifecycle(&self) -> MapLifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == MapLifecycle::Ready
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn base_layer(&self) -> Option<&TileLayer> {
        self.base_layer.as_ref()
    }

    pub fn bin_markers(&self) -> &[Entity] {
        &self.bin_markers
    }

    pub fn user_marker(&self) -> Option<Entity> {
        self.user_marker
    }

    /// A ready map with no bin markers should show the "no bins" affordance.
    pub fn shows_empty_notice(&self) -> bool {
        self.is_ready() && self.bin_markers.is_empty()
    }
}
