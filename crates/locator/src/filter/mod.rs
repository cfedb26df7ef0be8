//! Category filtering for the bin map.
//!
//! A [`FilterSelection`] is either the `all` sentinel or a non-empty set of
//! categories. [`toggle_category`] keeps that invariant for every sequence of
//! taps on the filter panel; [`visible_bins`] reduces the registry to the
//! bins the map should show.

mod engine;
mod types;


pub use engine::{toggle_category, visible_bins};
pub use types::{FilterOption, FilterSelection};
