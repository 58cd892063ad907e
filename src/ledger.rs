//! Credit ledger collaborator interface.
//!
//! The real ledger lives in a remote database behind stored procedures; the
//! core only depends on this trait. The contract is reserve-then-commit-or-
//! release: the caller reserves before running an analysis, commits on
//! success, and releases on any failure - exactly one of commit/release per
//! reservation, never both, never neither.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from credit ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The user's balance cannot cover the requested reservation.
    #[error("insufficient credits: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Credits the reservation asked for.
        requested: u32,
        /// Credits the user actually has.
        available: u32,
    },

    /// The reservation id is unknown (or was already finalized).
    #[error("unknown or already finalized reservation: {0}")]
    UnknownReservation(String),
}

/// Reserve/commit/release operations over a user's credit balance.
///
/// Atomicity is the implementor's contract: at most one successful
/// reservation is consumed per analysis.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Places a hold of `amount` credits against `user`'s balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientFunds`] when the balance cannot cover it.
    async fn reserve(&self, user: &str, amount: u32) -> Result<String, LedgerError>;

    /// Finalizes a reservation, consuming the held credits.
    async fn commit(&self, reservation_id: &str) -> Result<(), LedgerError>;

    /// Cancels a reservation, returning the held credits to the balance.
    async fn release(&self, reservation_id: &str) -> Result<(), LedgerError>;

    /// The user's current available balance (holds excluded).
    async fn balance(&self, user: &str) -> u32;
}

#[derive(Default)]
struct LedgerState {
    balances: HashMap<String, u32>,
    reservations: HashMap<String, (String, u32)>,
    next_id: u64,
}

/// In-memory ledger for tests and local development.
///
/// Follows the same hold semantics as the remote ledger: reserved credits
/// leave the available balance immediately and only return on release.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds credits to a user's balance.
    pub fn grant(&self, user: &str, amount: u32) {
        let mut state = self.state.lock().expect("ledger lock poisoned");
        *state.balances.entry(user.to_string()).or_insert(0) += amount;
    }
}

#[async_trait]
impl CreditLedger for InMemoryLedger {
    async fn reserve(&self, user: &str, amount: u32) -> Result<String, LedgerError> {
        let mut state = self.state.lock().expect("ledger lock poisoned");
        let available = state.balances.get(user).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        state.balances.insert(user.to_string(), available - amount);
        state.next_id += 1;
        let reservation_id = format!("res_{}", state.next_id);
        state
            .reservations
            .insert(reservation_id.clone(), (user.to_string(), amount));
        Ok(reservation_id)
    }

    async fn commit(&self, reservation_id: &str) -> Result<(), LedgerError> {
        let mut state = self.state.lock().expect("ledger lock poisoned");
        state
            .reservations
            .remove(reservation_id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::UnknownReservation(reservation_id.to_string()))
    }

    async fn release(&self, reservation_id: &str) -> Result<(), LedgerError> {
        let mut state = self.state.lock().expect("ledger lock poisoned");
        let (user, amount) = state
            .reservations
            .remove(reservation_id)
            .ok_or_else(|| LedgerError::UnknownReservation(reservation_id.to_string()))?;
        *state.balances.entry(user).or_insert(0) += amount;
        Ok(())
    }

    async fn balance(&self, user: &str) -> u32 {
        let state = self.state.lock().expect("ledger lock poisoned");
        state.balances.get(user).copied().unwrap_or(0)
    }
}
