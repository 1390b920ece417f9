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

use std::fmt;

use crate::key::EntityKind;
use crate::AccountId;

/// Number of positional arguments an invoked function accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{} at least", n),
        }
    }
}

/// Errors describing failed Registry transactions.
///
/// Every error is terminal for the invocation that produced it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("Incorrect number of arguments for {function}. Expecting {expected}.")]
    Arity { function: String, expected: Arity },

    #[error("Invalid invoke function name: {0}")]
    UnknownFunction(String),

    #[error("This {kind} already exists: {name}")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("This {kind} does not exist: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("Authority error: {0}")]
    Unauthorized(String),

    #[error("Error field name: {0}")]
    InvalidField(String),

    #[error("Expecting a non-negative integer value for amount, got {0:?}")]
    InvalidAmount(String),

    #[error("Malformed {kind} record: {reason}")]
    Serialization { kind: EntityKind, reason: String },

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Transfer to {recipient} failed: {reason}")]
    TransferFailed {
        recipient: AccountId,
        reason: String,
    },
}

/// Machine readable classification of a [RegistryError].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    Arity,
    UnknownFunction,
    AlreadyExists,
    NotFound,
    Unauthorized,
    InvalidField,
    InvalidAmount,
    Serialization,
    Ledger,
    TransferFailed,
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::Arity { .. } => ErrorCode::Arity,
            RegistryError::UnknownFunction(_) => ErrorCode::UnknownFunction,
            RegistryError::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            RegistryError::NotFound { .. } => ErrorCode::NotFound,
            RegistryError::Unauthorized(_) => ErrorCode::Unauthorized,
            RegistryError::InvalidField(_) => ErrorCode::InvalidField,
            RegistryError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            RegistryError::Serialization { .. } => ErrorCode::Serialization,
            RegistryError::Ledger(_) => ErrorCode::Ledger,
            RegistryError::TransferFailed { .. } => ErrorCode::TransferFailed,
        }
    }

    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        RegistryError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
        RegistryError::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}

impl From<ErrorCode> for &'static str {
    fn from(code: ErrorCode) -> &'static str {
        match code {
            ErrorCode::Arity => "ARITY",
            ErrorCode::UnknownFunction => "UNKNOWN_FUNCTION",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidField => "INVALID_FIELD",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::Serialization => "SERIALIZATION",
            ErrorCode::Ledger => "LEDGER",
            ErrorCode::TransferFailed => "TRANSFER_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code: &'static str = (*self).into();
        f.write_str(code)
    }
}
