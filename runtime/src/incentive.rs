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

//! Token payments made by the registry.

use crate::{Balance, RegistryError, TokenType};

/// Token in which mashup incentives are paid.
pub const INCENTIVE_TOKEN: &str = "INK";

/// Amount paid to each distinct developer whose services a new mashup invokes.
pub const MASHUP_INVOKE_INCENTIVE: u32 = 10;

/// A payment of a fixed amount of a token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Incentive {
    pub token: TokenType,
    pub amount: Balance,
}

impl Incentive {
    /// The incentive a mashup author pays to every distinct developer of the invoked services.
    pub fn mashup_invoke() -> Self {
        Incentive {
            token: INCENTIVE_TOKEN.to_string(),
            amount: Balance::from(MASHUP_INVOKE_INCENTIVE),
        }
    }
}

/// Parse a non-negative decimal integer of arbitrary size.
///
/// Accepts an optional leading `+`. Anything else than ASCII digits is rejected.
pub fn parse_amount(input: &str) -> Result<Balance, RegistryError> {
    let invalid = || RegistryError::InvalidAmount(input.to_string());
    let digits = input.strip_prefix('+').unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }
    Balance::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}
