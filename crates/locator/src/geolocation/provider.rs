use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::geo::LatLng;

/// Why the device could not produce a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationFailure {
    /// The user (or the OS) refused location access.
    PermissionDenied,
    /// No fix could be obtained.
    Unavailable,
    /// The device or the controller gave up waiting.
    Timeout,
}

impl LocationFailure {
    pub fn tag(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable => write!(f, "position unavailable"),
            Self::Timeout => write!(f, "location request timed out"),
        }
    }
}

/// Pending answer from the device location service.
pub type LocateFuture = Pin<Box<dyn Future<Output = Result<LatLng, LocationFailure>> + Send>>;

/// Device location capability.
///
/// Every call starts an independent request. Dropping the returned future
/// abandons the request.
pub trait LocationProvider: Send + Sync + 'static {
    fn request_position(&self) -> LocateFuture;
}
