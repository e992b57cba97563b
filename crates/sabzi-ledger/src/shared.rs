//! # Shared Ledger
//!
//! A cloneable handle to one ledger, for when more than one caller (the
//! vendor session and an inventory view, say) needs it.
//!
//! Uses `Arc<Mutex<T>>` so that a decrement and the file write that
//! follows it happen as one step with respect to other callers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::ledger::InventoryLedger;
use crate::store::LedgerStore;

pub struct SharedLedger<S: LedgerStore> {
    inner: Arc<Mutex<InventoryLedger<S>>>,
}

impl<S: LedgerStore> SharedLedger<S> {
    pub fn new(ledger: InventoryLedger<S>) -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Opens a ledger over `store` and wraps it.
    pub fn open(store: S) -> Self {
        SharedLedger::new(InventoryLedger::open(store))
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust
    /// use sabzi_ledger::{MemoryStore, SharedLedger};
    ///
    /// let ledger = SharedLedger::open(MemoryStore::new());
    /// let count = ledger.with_ledger(|l| l.len());
    /// assert_eq!(count, 25);
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryLedger<S>) -> R,
    {
        let ledger = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryLedger<S>) -> R,
    {
        let mut ledger = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}

impl<S: LedgerStore> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        SharedLedger {
            inner: Arc::clone(&self.inner),
        }
    }
}
