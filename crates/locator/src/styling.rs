//! Display colors and labels for bin status, fill level and waste category.
//!
//! Every mapping is an exhaustive `match`, so adding a status or category
//! fails to compile until it has a color and a label here.

use bevy::prelude::*;

use crate::bins::{BinStatus, WasteCategory};

/// A display color kept both as sRGB bytes and as the CSS hex string used in
/// popup markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub hex: &'static str,
    pub rgb: [u8; 3],
}

impl Swatch {
    pub const fn new(hex: &'static str, rgb: [u8; 3]) -> Self {
        Self { hex, rgb }
    }

    pub fn color(self) -> Color {
        Color::srgb_u8(self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

// Marker pins (CSS named colors of the web map icons).
const PIN_GREEN: Swatch = Swatch::new("#008000", [0, 128, 0]);
const PIN_RED: Swatch = Swatch::new("#ff0000", [255, 0, 0]);
const PIN_PURPLE: Swatch = Swatch::new("#800080", [128, 0, 128]);

// Card palette.
pub const GREEN_500: Swatch = Swatch::new("#22c55e", [34, 197, 94]);
pub const AMBER_500: Swatch = Swatch::new("#f59e0b", [245, 158, 11]);
pub const RED_500: Swatch = Swatch::new("#ef4444", [239, 68, 68]);
pub const BLUE_500: Swatch = Swatch::new("#3b82f6", [59, 130, 246]);
pub const YELLOW_500: Swatch = Swatch::new("#eab308", [234, 179, 8]);
pub const PURPLE_500: Swatch = Swatch::new("#a855f7", [168, 85, 247]);
pub const GRAY_500: Swatch = Swatch::new("#6b7280", [107, 114, 128]);

/// Marker pin color for a bin status.
pub fn status_color(status: BinStatus) -> Swatch {
    match status {
        BinStatus::Available => PIN_GREEN,
        BinStatus::Full => PIN_RED,
        BinStatus::Maintenance => PIN_PURPLE,
    }
}

/// Badge color for a bin status on the detail card.
pub fn status_badge_color(status: BinStatus) -> Swatch {
    match status {
        BinStatus::Available => GREEN_500,
        BinStatus::Full => RED_500,
        BinStatus::Maintenance => AMBER_500,
    }
}

pub fn status_label(status: BinStatus) -> &'static str {
    match status {
        BinStatus::Available => "Available",
        BinStatus::Full => "Full",
        BinStatus::Maintenance => "Maintenance",
    }
}

/// Severity band of a fill level. Each band includes its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FillSeverity {
    /// Below 60%.
    Normal,
    /// 60% up to (not including) 80%.
    Warning,
    /// 80% and above.
    Critical,
}

pub const FILL_WARNING_THRESHOLD: u8 = 60;
pub const FILL_CRITICAL_THRESHOLD: u8 = 80;

pub fn fill_severity(level: u8) -> FillSeverity {
    if level >= FILL_CRITICAL_THRESHOLD {
        FillSeverity::Critical
    } else if level >= FILL_WARNING_THRESHOLD {
        FillSeverity::Warning
    } else {
        FillSeverity::Normal
    }
}

pub fn fill_color(level: u8) -> Swatch {
    match fill_severity(level) {
        FillSeverity::Normal => GREEN_500,
        FillSeverity::Warning => AMBER_500,
        FillSeverity::Critical => RED_500,
    }
}

pub fn category_color(category: WasteCategory) -> Swatch {
    match category {
        WasteCategory::Plastic => BLUE_500,
        WasteCategory::Organic => GREEN_500,
        WasteCategory::Metal => YELLOW_500,
        WasteCategory::Glass => PURPLE_500,
        WasteCategory::EWaste => GRAY_500,
    }
}

pub fn category_name(category: WasteCategory) -> &'static str {
    match category {
        WasteCategory::Plastic => "Plastic",
        WasteCategory::Organic => "Organic",
        WasteCategory::Metal => "Metal",
        WasteCategory::Glass => "Glass",
        WasteCategory::EWaste => "E-Waste",
    }
}

/// Category names joined with `", "` in the bin's declaration order.
pub fn category_list(categories: &[WasteCategory]) -> String {
    categories
        .iter()
        .map(|c| category_name(*c))
        .collect::<Vec<_>>()
        .join(", ")
}
