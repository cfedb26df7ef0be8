//! Host settings read from environment variables.
//!
//! | Variable               | Meaning                                            |
//! |------------------------|----------------------------------------------------|
//! | `WASTEWISE_MAP_PARAMS` | path to a JSON `MapParams` override file           |
//! | `WASTEWISE_BINS`       | path to a JSON bin list (default: Nairobi seed)    |
//! | `WASTEWISE_FILTER`     | comma-separated filter taps, e.g. `plastic,metal`  |
//! | `WASTEWISE_LOCATE`     | `lat,lng`, `jitter`, `deny` or `unavailable`       |
//! | `WASTEWISE_SEED`       | seed for `jitter` positions                        |

use std::fmt;
use std::path::{Path, PathBuf};

use locator::bins::{BinRegistry, RegistryError};
use locator::config::{MapParams, ParamsError};
use locator::filter::{toggle_category, FilterOption, FilterSelection};
use locator::geo::LatLng;
use locator::geolocation::{LocationFailure, SimulatedLocation};

const JITTER_RADIUS_M: f64 = 250.0;

/// Where the simulated device says the user is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocateMode {
    Fixed(LatLng),
    Jitter { seed: Option<u64> },
    Fail(LocationFailure),
}

impl LocateMode {
    pub fn provider(self, center: LatLng) -> SimulatedLocation {
        match self {
            LocateMode::Fixed(position) => SimulatedLocation::fixed(position),
            LocateMode::Jitter { seed } => {
                let device = SimulatedLocation::jitter(center, JITTER_RADIUS_M);
                match seed {
                    Some(seed) => device.with_seed(seed),
                    None => device,
                }
            }
            LocateMode::Fail(failure) => SimulatedLocation::failing(failure),
        }
    }
}

pub struct HostConfig {
    pub params: MapParams,
    pub registry: BinRegistry,
    pub selection: FilterSelection,
    /// `None` when no locate press should be simulated.
    pub locate: Option<LocateMode>,
}

#[derive(Debug)]
pub enum HostConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Params(ParamsError),
    Registry(RegistryError),
    Filter(String),
    Locate(String),
}

impl fmt::Display for HostConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostConfigError::Io { path, source } => {
                write!(f, "Cannot read {}: {source}", path.display())
            }
            HostConfigError::Params(e) => write!(f, "{e}"),
            HostConfigError::Registry(e) => write!(f, "Bin data error: {e}"),
            HostConfigError::Filter(tag) => write!(f, "Unknown filter option '{tag}'"),
            HostConfigError::Locate(value) => write!(f, "Unrecognized locate mode '{value}'"),
        }
    }
}

impl std::error::Error for HostConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostConfigError::Io { source, .. } => Some(source),
            HostConfigError::Params(e) => Some(e),
            HostConfigError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamsError> for HostConfigError {
    fn from(e: ParamsError) -> Self {
        HostConfigError::Params(e)
    }
}

impl From<RegistryError> for HostConfigError {
    fn from(e: RegistryError) -> Self {
        HostConfigError::Registry(e)
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, HostConfigError> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let params = match var("WASTEWISE_MAP_PARAMS") {
            Some(path) => MapParams::from_json(&read(Path::new(&path))?)?,
            None => MapParams::default(),
        };
        let registry = match var("WASTEWISE_BINS") {
            Some(path) => BinRegistry::from_json(&read(Path::new(&path))?)?,
            None => BinRegistry::nairobi()?,
        };
        let selection = match var("WASTEWISE_FILTER") {
            Some(taps) => parse_filter(&taps)?,
            None => FilterSelection::all(),
        };
        let seed = match var("WASTEWISE_SEED") {
            Some(seed) => Some(
                seed.trim()
                    .parse::<u64>()
                    .map_err(|_| HostConfigError::Locate(format!("seed {seed}")))?,
            ),
            None => None,
        };
        let locate = var("WASTEWISE_LOCATE")
            .map(|mode| parse_locate(&mode, seed))
            .transpose()?;

        Ok(Self {
            params,
            registry,
            selection,
            locate,
        })
    }
}

fn read(path: &Path) -> Result<String, HostConfigError> {
    std::fs::read_to_string(path).map_err(|source| HostConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Replay filter panel taps, starting from "All Bins".
pub fn parse_filter(taps: &str) -> Result<FilterSelection, HostConfigError> {
    taps.split(',')
        .map(str::trim)
        .filter(|tap| !tap.is_empty())
        .try_fold(FilterSelection::all(), |selection, tap| {
            let option = tap
                .parse::<FilterOption>()
                .map_err(|_| HostConfigError::Filter(tap.to_string()))?;
            Ok(toggle_category(&selection, option))
        })
}

pub fn parse_locate(value: &str, seed: Option<u64>) -> Result<LocateMode, HostConfigError> {
    let value = value.trim();
    match value {
        "jitter" => return Ok(LocateMode::Jitter { seed }),
        "deny" => return Ok(LocateMode::Fail(LocationFailure::PermissionDenied)),
        "unavailable" => return Ok(LocateMode::Fail(LocationFailure::Unavailable)),
        _ => {}
    }

    let invalid = || HostConfigError::Locate(value.to_string());
    let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
    let position = LatLng::new(lat, lng);
    if !position.is_valid() {
        return Err(invalid());
    }
    Ok(LocateMode::Fixed(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator::WasteCategory;

    #[test]
    fn test_filter_taps_replay_toggles() {
        let selection = parse_filter("plastic, metal").unwrap();
        assert_eq!(
            selection,
            FilterSelection::only([WasteCategory::Plastic, WasteCategory::Metal])
        );
        assert!(parse_filter("plastic,plastic").unwrap().is_all());
        assert!(parse_filter("metal,all").unwrap().is_all());
        assert!(parse_filter("").unwrap().is_all());
    }

    #[test]
    fn test_unknown_filter_tag_rejected() {
        let err = parse_filter("plastic,paper").unwrap_err();
        assert_eq!(err.to_string(), "Unknown filter option 'paper'");
    }

    #[test]
    fn test_locate_modes() {
        assert_eq!(
            parse_locate("-1.2823, 36.8195", None).unwrap(),
            LocateMode::Fixed(LatLng::new(-1.2823, 36.8195))
        );
        assert_eq!(
            parse_locate("jitter", Some(3)).unwrap(),
            LocateMode::Jitter { seed: Some(3) }
        );
        assert_eq!(
            parse_locate("deny", None).unwrap(),
            LocateMode::Fail(LocationFailure::PermissionDenied)
        );
        assert!(parse_locate("95.0,10.0", None).is_err());
        assert!(parse_locate("somewhere", None).is_err());
    }
}
