//! Bin registry: the fixed set of collection points the map can show.
//!
//! Bins arrive either from the compiled-in Nairobi seed or from JSON
//! records using the string tags of the mobile app (`"available"`,
//! `"ewaste"`, ...). Unknown tags, duplicate ids, empty category lists and
//! out-of-range fill levels are rejected when the registry is built.

mod registry;
mod seed;
mod types;


pub use registry::BinRegistry;
pub use types::{
    Bin, BinRecord, BinStatus, RegistryError, UnknownCategoryError, UnknownStatusError,
    WasteCategory,
};
