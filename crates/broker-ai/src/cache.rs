//! Explicitly owned memoization.
//!
//! Values that used to live in module-level singletons (category lists, the
//! signed-in agent's profile id) are held in a [`Memo`] owned by whichever
//! service needs them, so separate sessions never observe each other's data
//! and tests can reset state with [`Memo::invalidate`].

use std::sync::RwLock;

#[derive(Debug)]
pub struct Memo<T> {
    slot: RwLock<Option<T>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<T: Clone> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, if one has been loaded.
    pub fn get(&self) -> Option<T> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the cached value or runs `load` to fill the slot. Failed loads
    /// leave the slot empty so the next call retries.
    pub fn get_or_try_init<E, F>(&self, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let mut guard = self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(value) = guard.as_ref() {
            return Ok(value.clone());
        }

        let value = load()?;
        *guard = Some(value.clone());
        Ok(value)
    }

    pub fn invalidate(&self) {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}
