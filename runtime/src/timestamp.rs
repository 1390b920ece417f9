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

//! Rendering of transaction timestamps stored in service records.

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::{Ledger, RegistryError};

/// Timestamp of the current transaction in the layout of the Unix `date` command, in UTC.
///
/// Taken from the ledger, not from the local clock.
pub fn now<L: Ledger + ?Sized>(ledger: &L) -> Result<String, RegistryError> {
    format_unix_date(ledger.tx_timestamp()?)
}

fn format_unix_date(at: OffsetDateTime) -> Result<String, RegistryError> {
    let day = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:space]"
    );
    let clock = format_description!("[hour]:[minute]:[second] UTC [year]");
    let at = at.to_offset(UtcOffset::UTC);
    let ledger_error = |error: time::error::Format| RegistryError::Ledger(error.to_string());
    let day = at.format(day).map_err(ledger_error)?;
    let clock = at.format(clock).map_err(ledger_error)?;
    Ok(format!("{} {}", day, clock))
}
