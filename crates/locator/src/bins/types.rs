use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Operational state of a bin as reported by the collection service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStatus {
    Available,
    Full,
    Maintenance,
}

impl BinStatus {
    /// Wire tag used in bin records.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Full => "full",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn all() -> &'static [BinStatus] {
        &[Self::Available, Self::Full, Self::Maintenance]
    }
}

impl FromStr for BinStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "full" => Ok(Self::Full),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// Waste stream a bin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Plastic,
    Organic,
    Metal,
    Glass,
    #[serde(rename = "ewaste")]
    EWaste,
}

impl WasteCategory {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Organic => "organic",
            Self::Metal => "metal",
            Self::Glass => "glass",
            Self::EWaste => "ewaste",
        }
    }

    pub fn all() -> &'static [WasteCategory] {
        &[
            Self::Plastic,
            Self::Organic,
            Self::Metal,
            Self::Glass,
            Self::EWaste,
        ]
    }
}

impl FromStr for WasteCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plastic" => Ok(Self::Plastic),
            "organic" => Ok(Self::Organic),
            "metal" => Ok(Self::Metal),
            "glass" => Ok(Self::Glass),
            "ewaste" => Ok(Self::EWaste),
            other => Err(UnknownCategoryError(other.to_string())),
        }
    }
}

/// A physical waste-collection point.
///
/// Bins are reference data: built once when the registry is constructed and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub id: String,
    /// Display name shown in marker popups.
    pub name: String,
    pub position: LatLng,
    pub status: BinStatus,
    /// Accepted categories in declaration order, without duplicates.
    pub categories: Vec<WasteCategory>,
    /// Fill level in percent (0..=100).
    pub fill_level: Option<u8>,
    /// Unix timestamp (seconds) of the last collection.
    pub last_emptied: Option<u64>,
    pub address: Option<String>,
}

impl Bin {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: LatLng,
        status: BinStatus,
        categories: impl IntoIterator<Item = WasteCategory>,
    ) -> Self {
        let mut deduped: Vec<WasteCategory> = Vec::new();
        for category in categories {
            if !deduped.contains(&category) {
                deduped.push(category);
            }
        }
        Self {
            id: id.into(),
            name: name.into(),
            position,
            status,
            categories: deduped,
            fill_level: None,
            last_emptied: None,
            address: None,
        }
    }

    pub fn with_fill_level(mut self, level: u8) -> Self {
        self.fill_level = Some(level);
        self
    }

    pub fn with_last_emptied(mut self, unix_secs: u64) -> Self {
        self.last_emptied = Some(unix_secs);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn accepts(&self, category: WasteCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// String-tagged bin as it appears in JSON seed files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
    pub waste_types: Vec<String>,
    #[serde(default)]
    pub fill_level: Option<u8>,
    #[serde(default)]
    pub last_emptied: Option<u64>,
    #[serde(default)]
    pub address: Option<String>,
}

impl TryFrom<BinRecord> for Bin {
    type Error = RegistryError;

    fn try_from(record: BinRecord) -> Result<Self, Self::Error> {
        let status: BinStatus = record.status.parse()?;
        let categories = record
            .waste_types
            .iter()
            .map(|tag| tag.parse::<WasteCategory>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut bin = Bin::new(
            record.id,
            record.name,
            LatLng::new(record.lat, record.lng),
            status,
            categories,
        );
        bin.fill_level = record.fill_level;
        bin.last_emptied = record.last_emptied;
        bin.address = record.address;
        Ok(bin)
    }
}

impl From<&Bin> for BinRecord {
    fn from(bin: &Bin) -> Self {
        Self {
            id: bin.id.clone(),
            name: bin.name.clone(),
            lat: bin.position.lat,
            lng: bin.position.lng,
            status: bin.status.tag().to_string(),
            waste_types: bin.categories.iter().map(|c| c.tag().to_string()).collect(),
            fill_level: bin.fill_level,
            last_emptied: bin.last_emptied,
            address: bin.address.clone(),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// A status tag outside `available | full | maintenance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusError(pub String);

impl fmt::Display for UnknownStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown bin status: '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatusError {}

/// A category tag outside the five known waste streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategoryError(pub String);

impl fmt::Display for UnknownCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown waste category: '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategoryError {}

/// Seed data that cannot form a valid registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Two bins share the same id.
    DuplicateId(String),
    /// A bin accepts no categories at all.
    NoCategories(String),
    /// Fill level above 100%.
    InvalidFillLevel { id: String, level: u8 },
    /// Coordinates are non-finite or outside the degree range.
    InvalidPosition { id: String, position: LatLng },
    UnknownStatus(UnknownStatusError),
    UnknownCategory(UnknownCategoryError),
    /// The seed JSON could not be parsed.
    Parse(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateId(id) => write!(f, "Duplicate bin id: '{id}'"),
            RegistryError::NoCategories(id) => {
                write!(f, "Bin '{id}' accepts no waste categories")
            }
            RegistryError::InvalidFillLevel { id, level } => {
                write!(f, "Bin '{id}' has fill level {level}%, expected 0-100")
            }
            RegistryError::InvalidPosition { id, position } => {
                write!(f, "Bin '{id}' has invalid position {position}")
            }
            RegistryError::UnknownStatus(e) => write!(f, "{e}"),
            RegistryError::UnknownCategory(e) => write!(f, "{e}"),
            RegistryError::Parse(msg) => write!(f, "Bin seed parse error: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::UnknownStatus(e) => Some(e),
            RegistryError::UnknownCategory(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownStatusError> for RegistryError {
    fn from(e: UnknownStatusError) -> Self {
        RegistryError::UnknownStatus(e)
    }
}

impl From<UnknownCategoryError> for RegistryError {
    fn from(e: UnknownCategoryError) -> Self {
        RegistryError::UnknownCategory(e)
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Parse(e.to_string())
    }
}
