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

//! Transaction logic of the Service Registry.
//!
//! Every transaction is applied with [invoke] against a [Ledger]. The ledger is passed
//! explicitly into every operation; this crate holds no global state.

pub use service_registry_core::*;

pub mod dispatch;
pub mod incentive;
pub mod ledger;
pub mod registry;

mod timestamp;

pub use dispatch::invoke;
pub use ledger::{KeyValue, Ledger, LedgerError, MemoryLedger, StateIterator, TransferRecord};
