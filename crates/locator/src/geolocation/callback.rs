//! Provider for platforms that report positions through callbacks.
//!
//! Each `request_position` call parks a [`LocationRequest`] in a queue. The
//! platform glue drains the queue, starts a native lookup for each request
//! and calls [`LocationRequest::resolve`] from its success/error callback.

use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Poll, Waker};

use super::provider::{LocateFuture, LocationFailure, LocationProvider};
use crate::geo::LatLng;

#[derive(Default)]
struct Slot {
    result: Option<Result<LatLng, LocationFailure>>,
    waker: Option<Waker>,
    resolved: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One outstanding device lookup.
#[derive(Clone)]
pub struct LocationRequest {
    slot: Arc<Mutex<Slot>>,
}

impl LocationRequest {
    /// Deliver the device answer. Later calls are ignored.
    pub fn resolve(&self, result: Result<LatLng, LocationFailure>) {
        let waker = {
            let mut slot = lock(&self.slot);
            if slot.resolved {
                return;
            }
            slot.resolved = true;
            slot.result = Some(result);
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// True once the waiting side has dropped its future (the request was
    /// superseded or timed out), so the platform may stop the lookup.
    pub fn is_abandoned(&self) -> bool {
        Arc::strong_count(&self.slot) == 1
    }
}

/// Callback-bridged [`LocationProvider`].
#[derive(Clone, Default)]
pub struct CallbackLocation {
    queue: Arc<Mutex<Vec<LocationRequest>>>,
}

impl CallbackLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests started since the last call, oldest first.
    pub fn take_requests(&self) -> Vec<LocationRequest> {
        std::mem::take(&mut *lock(&self.queue))
    }
}

impl LocationProvider for CallbackLocation {
    fn request_position(&self) -> LocateFuture {
        let slot = Arc::new(Mutex::new(Slot::default()));
        lock(&self.queue).push(LocationRequest {
            slot: Arc::clone(&slot),
        });

        Box::pin(futures_lite::future::poll_fn(move |cx| {
            let mut guard = lock(&slot);
            match guard.result.take() {
                Some(result) => Poll::Ready(result),
                None => {
                    guard.waker = Some(cx.waker().clone());
                    Poll::Pending
                }
            }
        }))
    }
}
