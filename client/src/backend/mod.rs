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

//! Backends apply transactions to a ledger and give access to its state.

use crate::interface::*;

mod emulator;

pub use emulator::{Emulator, GENESIS_ACCOUNT, GENESIS_BALANCE};

/// Outcome of a transaction that has been applied to the ledger.
#[derive(Clone, Debug)]
pub struct TransactionApplied {
    /// Position of the transaction in the ledger history.
    pub tx_index: u64,
    /// The response payload, or the error the registry rejected the transaction with.
    ///
    /// A rejected transaction leaves no trace in the ledger state.
    pub result: Result<Vec<u8>, RegistryError>,
}

#[async_trait::async_trait]
pub trait Backend {
    /// Submit a transaction authored by `author` to the ledger and return when it has been
    /// applied.
    async fn submit(
        &self,
        author: &AccountId,
        invocation: Invocation,
    ) -> Result<TransactionApplied, Error>;

    /// Fetch a value from the ledger state.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Fetch all keys with the given prefix from the ledger state.
    async fn fetch_keys(&self, prefix: &str) -> Result<Vec<String>, Error>;

    /// Balance of `token` held by `account_id`.
    async fn free_balance(&self, account_id: &AccountId, token: &str) -> Result<Balance, Error>;
}
