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

//! Basic types used in the Service Registry.
//!
//! Everything in this crate is pure: no ledger access happens here. The business logic that
//! reads and writes ledger state lives in the runtime crate.

pub mod codec;
pub mod key;
pub mod message;
pub mod state;

mod error;
pub use error::{Arity, ErrorCode, RegistryError};

pub use num_bigint::BigUint;

/// Address string the platform attributes to the author of a transaction.
///
/// Addresses are only ever compared for equality.
pub type AccountId = String;

/// Arbitrary-precision token amount.
pub type Balance = BigUint;

/// Kind of token a balance is held in, for example `INK`.
pub type TokenType = String;

/// The name a user is registered with.
pub type UserName = String;

/// The name a service or mashup is registered with.
pub type ServiceName = String;
