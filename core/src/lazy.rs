//! Single-slot memoization.

use core::fmt;

use once_cell::unsync::OnceCell;

/// A slot that is computed at most once.
///
/// The first successful producer call fills the slot; every later read
/// returns a reference to that same value. A failing producer leaves the
/// slot empty, so the next call runs a producer again.
///
/// Not reentrant: a producer that reads its own cell panics.
pub struct LazyCell<V> {
    slot: OnceCell<V>,
}

impl<V> LazyCell<V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Returns the stored value, running `producer` if the slot is empty.
    ///
    /// On `Err` nothing is stored and the error is returned as is.
    #[inline]
    pub fn get_or_compute<E, F>(&self, producer: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.slot.get_or_try_init(producer)
    }

    #[inline]
    pub fn get(&self) -> Option<&V> {
        self.slot.get()
    }

    #[inline]
    pub fn is_computed(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<V> Default for LazyCell<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for LazyCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("LazyCell").field(value).finish(),
            None => f.write_str("LazyCell(<unset>)"),
        }
    }
}
