//! Shared handle for hosts serving attributes from several threads.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::attributes::Attribute;
use crate::error::KeyboardError;
use crate::led::LightingState;
use crate::{KeyboardLeds, Outcome};

/// Clonable, lock-protected [`KeyboardLeds`]
///
/// Every attribute access holds the lock for the whole operation, so a
/// palette restore never interleaves with another write.
#[derive(Clone)]
pub struct SyncLeds {
    inner: Arc<Mutex<KeyboardLeds>>,
}

impl SyncLeds {
    pub fn new(leds: KeyboardLeds) -> Self {
        Self {
            inner: Arc::new(Mutex::new(leds)),
        }
    }

    /// Lock for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, KeyboardLeds> {
        self.inner.lock()
    }

    pub fn show(&self, attr: Attribute) -> String {
        attr.show(&self.inner.lock())
    }

    pub fn write(&self, attr: Attribute, input: &[u8]) -> Result<Outcome, KeyboardError> {
        attr.write(&mut self.inner.lock(), input)
    }

    pub fn store(&self, attr: Attribute, input: &[u8]) -> usize {
        attr.store(&mut self.inner.lock(), input)
    }

    /// Copy of the current lighting state
    pub fn snapshot(&self) -> LightingState {
        self.inner.lock().state().clone()
    }
}
