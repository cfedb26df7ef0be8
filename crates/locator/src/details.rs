//! Text and colors for the bin detail card.

use crate::bins::{Bin, BinStatus, WasteCategory};
use crate::geo::LatLng;
use crate::styling::{self, Swatch};

const SECS_PER_HOUR: u64 = 60 * 60;
const HOURS_PER_DAY: u64 = 24;

/// Short card heading: `bin-a12` becomes `Bin A12`.
///
/// Uses the part after the first `-`; ids without one are shown whole.
pub fn display_id(bin: &Bin) -> String {
    let suffix = match bin.id.split_once('-') {
        Some((_, rest)) => rest.split('-').next().unwrap_or(rest),
        None => bin.id.as_str(),
    };
    format!("Bin {}", suffix.to_uppercase())
}

/// `N hours ago` under a day, `N days ago` after that. Both in whole units,
/// rounded down. Timestamps in the future count as zero hours.
pub fn format_last_emptied(emptied_at: u64, now: u64) -> String {
    let hours = now.saturating_sub(emptied_at) / SECS_PER_HOUR;
    if hours < HOURS_PER_DAY {
        plural(hours, "hour")
    } else {
        plural(hours / HOURS_PER_DAY, "day")
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

pub fn distance_label(bin: &Bin, user: LatLng) -> String {
    format!("{:.1} km away", bin.position.distance_km(&user))
}

/// Everything the detail card shows for one bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinDetails {
    pub title: String,
    pub name: String,
    pub status: BinStatus,
    pub status_text: &'static str,
    pub status_color: Swatch,
    pub address: Option<String>,
    pub distance: Option<String>,
    pub categories: Vec<(WasteCategory, &'static str, Swatch)>,
    pub fill_level: Option<(u8, Swatch)>,
    pub last_emptied: Option<String>,
}

impl BinDetails {
    /// `user` is the last known user position, if any; `now` is unix seconds.
    pub fn for_bin(bin: &Bin, user: Option<LatLng>, now: u64) -> Self {
        Self {
            title: display_id(bin),
            name: bin.name.clone(),
            status: bin.status,
            status_text: styling::status_label(bin.status),
            status_color: styling::status_badge_color(bin.status),
            address: bin.address.clone(),
            distance: user.map(|user| distance_label(bin, user)),
            categories: bin
                .categories
                .iter()
                .map(|&c| (c, styling::category_name(c), styling::category_color(c)))
                .collect(),
            fill_level: bin
                .fill_level
                .map(|level| (level, styling::fill_color(level))),
            last_emptied: bin
                .last_emptied
                .map(|at| format_last_emptied(at, now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin() -> Bin {
        Bin::new(
            "bin-a12",
            "Kenyatta Avenue",
            LatLng::new(-1.2841, 36.8219),
            BinStatus::Full,
            vec![WasteCategory::Plastic, WasteCategory::EWaste],
        )
        .with_fill_level(92)
        .with_last_emptied(1_000_000)
        .with_address("Kenyatta Ave, Nairobi CBD")
    }

    #[test]
    fn test_display_id_uppercases_suffix() {
        assert_eq!(display_id(&bin()), "Bin A12");
        let plain = Bin::new(
            "depot",
            "Depot",
            LatLng::new(0.0, 0.0),
            BinStatus::Available,
            vec![WasteCategory::Glass],
        );
        assert_eq!(display_id(&plain), "Bin DEPOT");
    }

    #[test]
    fn test_last_emptied_switches_to_days_at_24_hours() {
        let t = 1_000_000;
        assert_eq!(format_last_emptied(t, t), "0 hours ago");
        assert_eq!(format_last_emptied(t, t + 3600), "1 hour ago");
        assert_eq!(format_last_emptied(t, t + 23 * 3600 + 3599), "23 hours ago");
        assert_eq!(format_last_emptied(t, t + 24 * 3600), "1 day ago");
        assert_eq!(format_last_emptied(t, t + 75 * 3600), "3 days ago");
    }

    #[test]
    fn test_last_emptied_in_future_is_zero() {
        assert_eq!(format_last_emptied(2_000, 1_000), "0 hours ago");
    }

    #[test]
    fn test_distance_label_one_decimal() {
        let b = bin();
        assert_eq!(distance_label(&b, b.position), "0.0 km away");
        // ~1.11 km per 0.01 degree of latitude
        let user = LatLng::new(b.position.lat + 0.01, b.position.lng);
        assert_eq!(distance_label(&b, user), "1.1 km away");
    }

    #[test]
    fn test_details_for_bin() {
        let d = BinDetails::for_bin(&bin(), None, 1_000_000 + 2 * 24 * 3600);
        assert_eq!(d.title, "Bin A12");
        assert_eq!(d.status_text, "Full");
        assert_eq!(d.status_color, styling::RED_500);
        assert_eq!(d.distance, None);
        assert_eq!(d.fill_level, Some((92, styling::RED_500)));
        assert_eq!(d.last_emptied.as_deref(), Some("2 days ago"));
        let names: Vec<_> = d.categories.iter().map(|(_, name, _)| *name).collect();
        assert_eq!(names, vec!["Plastic", "E-Waste"]);
    }
}
