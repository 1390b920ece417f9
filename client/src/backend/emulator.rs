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

use std::sync::{Arc, Mutex, MutexGuard};

use time::OffsetDateTime;

use service_registry_runtime::incentive::INCENTIVE_TOKEN;
use service_registry_runtime::{invoke, Ledger as _, MemoryLedger};

use crate::backend::{self, TransactionApplied};
use crate::interface::*;

/// Account that holds the whole supply of the incentive token in a fresh emulator.
pub const GENESIS_ACCOUNT: &str = "alice";

/// Amount of the incentive token minted to [GENESIS_ACCOUNT].
pub const GENESIS_BALANCE: u64 = 1 << 60;

/// [backend::Backend] that applies transactions to an in-memory ledger.
///
/// Transactions are applied one at a time. Each one works on a copy of the ledger that replaces
/// the ledger only if the transaction succeeded.
///
/// Clones share the ledger.
#[derive(Clone)]
pub struct Emulator {
    state: Arc<Mutex<EmulatorState>>,
}

struct EmulatorState {
    ledger: MemoryLedger,
    /// Number of transactions applied so far.
    tx_count: u64,
}

impl Emulator {
    pub fn new() -> Self {
        let mut ledger = MemoryLedger::new();
        ledger.mint(
            GENESIS_ACCOUNT,
            INCENTIVE_TOKEN,
            Balance::from(GENESIS_BALANCE),
        );
        ledger.set_timestamp(OffsetDateTime::now_utc().unix_timestamp());
        Self::from_ledger(ledger)
    }

    /// Emulate a ledger that starts out in the given state.
    pub fn from_ledger(ledger: MemoryLedger) -> Self {
        Emulator {
            state: Arc::new(Mutex::new(EmulatorState {
                ledger,
                tx_count: 0,
            })),
        }
    }

    /// Copy of the current ledger state.
    pub fn snapshot(&self) -> Result<MemoryLedger, Error> {
        Ok(self.lock()?.ledger.clone())
    }

    /// Credit `amount` of `token` to `account_id` outside of any transaction.
    pub fn mint(&self, account_id: &str, token: &str, amount: Balance) -> Result<(), Error> {
        self.lock()?.ledger.mint(account_id, token, amount);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<EmulatorState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::Backend("emulator state is poisoned".into()))
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl backend::Backend for Emulator {
    async fn submit(
        &self,
        author: &AccountId,
        invocation: Invocation,
    ) -> Result<TransactionApplied, Error> {
        let mut state = self.lock()?;
        let tx_index = state.tx_count;
        state.tx_count += 1;

        let mut staged = state.ledger.clone();
        staged.set_sender(author.clone());
        // Transaction timestamps never go backwards.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        staged.set_timestamp(now.max(state.ledger.timestamp()));

        let result = invoke(&mut staged, &invocation.function, invocation.args);
        match &result {
            Ok(_) => {
                state.ledger = staged;
                log::debug!(
                    "Applied {} by {} as #{}",
                    invocation.function,
                    author,
                    tx_index
                );
            }
            Err(error) => {
                log::debug!(
                    "Discarded {} by {} as #{}: {}",
                    invocation.function,
                    author,
                    tx_index,
                    error
                );
            }
        }

        Ok(TransactionApplied { tx_index, result })
    }

    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let state = self.lock()?;
        state
            .ledger
            .get_state(key)
            .map_err(|error| Error::Backend(error.to_string()))
    }

    async fn fetch_keys(&self, prefix: &str) -> Result<Vec<String>, Error> {
        Ok(self.lock()?.ledger.keys_with_prefix(prefix))
    }

    async fn free_balance(&self, account_id: &AccountId, token: &str) -> Result<Balance, Error> {
        Ok(self.lock()?.ledger.balance(account_id, token))
    }
}
