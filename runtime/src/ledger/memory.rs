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

//! Provides [MemoryLedger], a [Ledger] that keeps all state in memory.

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;

use super::{KeyValue, Ledger, LedgerError, StateIterator};
use crate::{AccountId, Balance, TokenType};

/// [Ledger] implementation with state and balances held in memory.
///
/// Writes take effect immediately. There is no transaction rollback: a caller that needs
/// all-or-nothing semantics works on a clone and keeps it only when the transaction succeeded.
///
/// Clones share the counter of open range iterators.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
    balances: BTreeMap<AccountId, BTreeMap<TokenType, Balance>>,
    sender: AccountId,
    /// Seconds since the Unix epoch.
    timestamp: i64,
    #[serde(skip)]
    transfers: Vec<TransferRecord>,
    #[serde(skip)]
    faults: Faults,
    #[serde(skip)]
    open_iterators: Arc<AtomicUsize>,
}

/// A transfer that was applied by a [MemoryLedger].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferRecord {
    pub from: AccountId,
    pub to: AccountId,
    pub token: TokenType,
    pub amount: Balance,
}

/// Failures injected into a [MemoryLedger].
#[derive(Clone, Debug, Default)]
struct Faults {
    rejected_recipients: BTreeSet<AccountId>,
    range_failure_after: Option<usize>,
    writes_fail: bool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sender(&mut self, sender: impl Into<AccountId>) {
        self.sender = sender.into();
    }

    pub fn set_timestamp(&mut self, unix_seconds: i64) {
        self.timestamp = unix_seconds;
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Credit `amount` of `token` to `account` out of thin air.
    pub fn mint(&mut self, account: &str, token: &str, amount: Balance) {
        let balance = self.balance_mut(account, token);
        *balance += amount;
    }

    pub fn balance(&self, account: &str, token: &str) -> Balance {
        self.balances
            .get(account)
            .and_then(|tokens| tokens.get(token))
            .cloned()
            .unwrap_or_else(Balance::zero)
    }

    /// Transfers applied since this ledger was created or cloned from its origin.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.state
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Number of range iterators handed out and not closed yet.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Make every transfer to `account` fail.
    pub fn reject_transfers_to(&mut self, account: impl Into<AccountId>) {
        self.faults.rejected_recipients.insert(account.into());
    }

    /// Make range iterators fail after yielding `count` entries.
    pub fn fail_range_after(&mut self, count: usize) {
        self.faults.range_failure_after = Some(count);
    }

    /// Make every write and delete fail.
    pub fn fail_writes(&mut self) {
        self.faults.writes_fail = true;
    }

    fn balance_mut(&mut self, account: &str, token: &str) -> &mut Balance {
        self.balances
            .entry(account.to_string())
            .or_default()
            .entry(token.to_string())
            .or_insert_with(Balance::zero)
    }

    fn check_writable(&self) -> Result<(), LedgerError> {
        if self.faults.writes_fail {
            Err(LedgerError("ledger rejected the write".into()))
        } else {
            Ok(())
        }
    }

    fn range_entries(&self, start_key: &str, end_key: &str) -> Vec<KeyValue> {
        if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
            return Vec::new();
        }
        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };
        self.state
            .range::<str, _>((lower, upper))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

impl Ledger for MemoryLedger {
    fn sender(&self) -> Result<AccountId, LedgerError> {
        Ok(self.sender.clone())
    }

    fn tx_timestamp(&self) -> Result<OffsetDateTime, LedgerError> {
        OffsetDateTime::from_unix_timestamp(self.timestamp)
            .map_err(|error| LedgerError(error.to_string()))
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.state.remove(key);
        Ok(())
    }

    fn get_state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator + 'a>, LedgerError> {
        self.open_iterators.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryStateIterator {
            entries: self.range_entries(start_key, end_key).into_iter(),
            yielded: 0,
            fail_after: self.faults.range_failure_after,
            open_iterators: self.open_iterators.clone(),
            closed: false,
        }))
    }

    fn transfer(
        &mut self,
        recipient: &AccountId,
        token: &str,
        amount: &Balance,
    ) -> Result<(), LedgerError> {
        if self.faults.rejected_recipients.contains(recipient) {
            return Err(LedgerError(format!("transfers to {} are rejected", recipient)));
        }
        let sender = self.sender.clone();
        let available = self.balance(&sender, token);
        if &available < amount {
            return Err(LedgerError(format!(
                "insufficient {} balance of {}: {} available, {} required",
                token, sender, available, amount
            )));
        }

        *self.balance_mut(&sender, token) = available - amount;
        *self.balance_mut(recipient, token) += amount;
        self.transfers.push(TransferRecord {
            from: sender,
            to: recipient.clone(),
            token: token.to_string(),
            amount: amount.clone(),
        });
        Ok(())
    }
}

struct MemoryStateIterator {
    entries: std::vec::IntoIter<KeyValue>,
    yielded: usize,
    fail_after: Option<usize>,
    open_iterators: Arc<AtomicUsize>,
    closed: bool,
}

impl Iterator for MemoryStateIterator {
    type Item = Result<KeyValue, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fail_after == Some(self.yielded) {
            self.fail_after = None;
            return Some(Err(LedgerError("range iteration failed".into())));
        }
        let entry = self.entries.next()?;
        self.yielded += 1;
        Some(Ok(entry))
    }
}

impl StateIterator for MemoryStateIterator {
    fn close(&mut self) -> Result<(), LedgerError> {
        if !self.closed {
            self.closed = true;
            self.open_iterators.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ledger_with_keys(keys: &[&str]) -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        for key in keys {
            ledger.put_state(key, key.as_bytes().to_vec()).unwrap();
        }
        ledger
    }

    fn range_keys(ledger: &MemoryLedger, start: &str, end: &str) -> Vec<String> {
        let mut iter = ledger.get_state_by_range(start, end).unwrap();
        let keys = iter.by_ref().map(|entry| entry.unwrap().key).collect();
        iter.close().unwrap();
        keys
    }

    #[test]
    fn range_bounds() {
        let ledger = ledger_with_keys(&["SER_b", "USER_a", "SER_a", "SER_c"]);
        assert_eq!(
            range_keys(&ledger, "", ""),
            vec!["SER_a", "SER_b", "SER_c", "USER_a"]
        );
        assert_eq!(
            range_keys(&ledger, "SER_b", ""),
            vec!["SER_b", "SER_c", "USER_a"]
        );
        assert_eq!(range_keys(&ledger, "", "SER_c"), vec!["SER_a", "SER_b"]);
        assert!(range_keys(&ledger, "SER_c", "SER_a").is_empty());
        assert!(range_keys(&ledger, "SER_b", "SER_b").is_empty());
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn keys_with_prefix() {
        let ledger = ledger_with_keys(&["SER_b", "USER_a", "SER_a", "SERVICE"]);
        assert_eq!(ledger.keys_with_prefix("SER_"), vec!["SER_a", "SER_b"]);
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint("alice", "INK", Balance::from(100u32));
        ledger.set_sender("alice");

        ledger
            .transfer(&"bob".to_string(), "INK", &Balance::from(30u32))
            .unwrap();
        assert_eq!(ledger.balance("alice", "INK"), Balance::from(70u32));
        assert_eq!(ledger.balance("bob", "INK"), Balance::from(30u32));
        assert_eq!(ledger.transfers().len(), 1);
    }

    #[test]
    fn transfer_insufficient_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint("alice", "INK", Balance::from(5u32));
        ledger.set_sender("alice");

        assert!(ledger
            .transfer(&"bob".to_string(), "INK", &Balance::from(6u32))
            .is_err());
        assert!(ledger
            .transfer(&"bob".to_string(), "GOLD", &Balance::from(1u32))
            .is_err());
        assert_eq!(ledger.balance("alice", "INK"), Balance::from(5u32));
        assert!(ledger.transfers().is_empty());
    }

    #[test]
    fn injected_range_failure() {
        let mut ledger = ledger_with_keys(&["a", "b", "c"]);
        ledger.fail_range_after(1);
        let mut iter = ledger.get_state_by_range("", "").unwrap();
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert_eq!(ledger.open_iterators(), 1);
        iter.close().unwrap();
        assert_eq!(ledger.open_iterators(), 0);
    }
}
