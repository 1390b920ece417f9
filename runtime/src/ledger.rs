// Service Registry
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The ledger capability every registry operation runs against.
//!
//! The ledger platform provides atomicity and isolation of transactions. Operations only
//! perform reads and writes through this interface and never assume they are the only writer.

use time::OffsetDateTime;

use crate::{AccountId, Balance, RegistryError};

mod memory;
pub use memory::{MemoryLedger, TransferRecord};

/// Failure reported by the ledger platform.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct LedgerError(pub String);

impl From<LedgerError> for RegistryError {
    fn from(error: LedgerError) -> Self {
        RegistryError::Ledger(error.0)
    }
}

/// A key and the value stored under it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Cursor over a key range, yielding entries in ascending key order.
///
/// Holds resources on the ledger side until [StateIterator::close] is called.
pub trait StateIterator: Iterator<Item = Result<KeyValue, LedgerError>> {
    fn close(&mut self) -> Result<(), LedgerError>;
}

/// Access to the state and the transaction context of the ledger.
pub trait Ledger {
    /// Address of the author of the current transaction.
    fn sender(&self) -> Result<AccountId, LedgerError>;

    /// Timestamp of the current transaction. It is the same on every replica.
    fn tx_timestamp(&self) -> Result<OffsetDateTime, LedgerError>;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError>;

    /// Iterate over all keys in `[start_key, end_key)`. An empty bound is unbounded.
    fn get_state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator + 'a>, LedgerError>;

    /// Move `amount` of `token` from the transaction author to `recipient`.
    ///
    /// Either fully succeeds or fails without effect.
    fn transfer(
        &mut self,
        recipient: &AccountId,
        token: &str,
        amount: &Balance,
    ) -> Result<(), LedgerError>;
}
