use std::fmt;

use bevy::prelude::*;

use crate::bins::Bin;
use crate::config::MapParams;
use crate::geo::{LatLng, TileCoord};
use crate::styling::{self, Swatch};

/// Popup title of the user position marker.
pub const USER_MARKER_LABEL: &str = "You are here";

// =============================================================================
// Viewport and base layer
// =============================================================================

/// Visible map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

/// Raster base layer. Opaque to the renderer apart from URL expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
}

impl TileLayer {
    pub fn from_params(params: &MapParams) -> Self {
        Self {
            url_template: params.tile_url_template.clone(),
            subdomains: params.tile_subdomains.clone(),
            attribution: params.attribution.clone(),
        }
    }

    /// Expand the `{s}/{z}/{x}/{y}` placeholders for one tile.
    ///
    /// The subdomain is picked from `(x + y)` so neighbouring tiles spread
    /// over the mirrors.
    pub fn url(&self, tile: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let i = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            self.subdomains[i].as_str()
        };
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    /// URL of the tile under the viewport center.
    pub fn center_tile_url(&self, viewport: &Viewport) -> String {
        self.url(TileCoord::containing(viewport.center, viewport.zoom))
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::from_params(&MapParams::default())
    }
}

// =============================================================================
// Marker components
// =============================================================================

/// Geographic anchor of a marker.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MapPosition(pub LatLng);

/// A marker that represents a registry bin.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct BinMarker {
    pub bin_id: String,
}

/// The single "you are here" marker.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct UserPositionMarker;

/// Pin color.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub swatch: Swatch,
}

/// Popup attached to a marker.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    /// Popups start closed except for the user marker, which opens on placement.
    pub open: bool,
}

impl Popup {
    /// Name, status label and comma-joined category names.
    pub fn for_bin(bin: &Bin) -> Self {
        Self {
            title: bin.name.clone(),
            lines: vec![
                format!("Status: {}", styling::status_label(bin.status)),
                format!("Waste Types: {}", styling::category_list(&bin.categories)),
            ],
            open: false,
        }
    }

    pub fn user_position() -> Self {
        Self {
            title: USER_MARKER_LABEL.to_string(),
            lines: Vec::new(),
            open: true,
        }
    }

    /// Plain text, one line per row.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markup in the form the web map popups used.
    pub fn html(&self) -> String {
        let mut html = format!("<b>{}</b>", escape_html(&self.title));
        for line in &self.lines {
            html.push_str("<br>");
            html.push_str(&escape_html(line));
        }
        html
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Events
// =============================================================================

/// Fired after the bin marker set was rebuilt.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinsRefreshed {
    pub visible: usize,
    pub total: usize,
}

/// Sent by the host when the map screen goes away.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MapTeardown;

// =============================================================================
// Errors
// =============================================================================

/// Misuse of the renderer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// `initialize` was called on a map that is already set up.
    AlreadyInitialized,
    /// An operation needs `initialize` first.
    NotInitialized,
    /// The map was disposed; nothing can be done with it anymore.
    Disposed,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::AlreadyInitialized => write!(f, "Map is already initialized"),
            MapError::NotInitialized => write!(f, "Map has not been initialized"),
            MapError::Disposed => write!(f, "Map has been disposed"),
        }
    }
}

impl std::error::Error for MapError {}
