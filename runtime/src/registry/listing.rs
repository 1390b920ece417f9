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

//! Range queries over the ledger state.
//!
//! Results are rendered as a JSON array of `{"Number":"<i>","Record":<record>}` objects,
//! numbered from one in key order. Stored records are spliced in verbatim.

use service_registry_core::codec::Entity;
use service_registry_core::key::{namespace_range, EntityKind};
use service_registry_core::message;
use service_registry_core::state::Service;

use crate::{KeyValue, Ledger, RegistryError, StateIterator};

/// Closes the wrapped iterator when dropped, so that early returns release it as well.
struct RangeGuard<'a> {
    iter: Box<dyn StateIterator + 'a>,
    closed: bool,
}

impl<'a> RangeGuard<'a> {
    fn open<L: Ledger + ?Sized>(
        ledger: &'a L,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self, RegistryError> {
        let iter = ledger.get_state_by_range(start_key, end_key)?;
        Ok(RangeGuard {
            iter,
            closed: false,
        })
    }

    fn close(mut self) -> Result<(), RegistryError> {
        self.closed = true;
        self.iter.close()?;
        Ok(())
    }
}

impl Drop for RangeGuard<'_> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(error) = self.iter.close() {
                log::warn!("Failed to close range iterator: {}", error);
            }
        }
    }
}

/// Visit every entry in `[start_key, end_key)` and keep what `select` returns.
///
/// The iterator is closed on every exit path. The first error aborts the scan.
pub(crate) fn collect_range<L, T, F>(
    ledger: &L,
    start_key: &str,
    end_key: &str,
    mut select: F,
) -> Result<Vec<T>, RegistryError>
where
    L: Ledger + ?Sized,
    F: FnMut(KeyValue) -> Result<Option<T>, RegistryError>,
{
    let mut guard = RangeGuard::open(ledger, start_key, end_key)?;
    let mut selected = Vec::new();
    for entry in &mut guard.iter {
        if let Some(item) = select(entry?)? {
            selected.push(item);
        }
    }
    guard.close()?;
    Ok(selected)
}

/// All entities of kind `E` in key order.
pub(crate) fn collect_entities<E: Entity, L: Ledger + ?Sized>(
    ledger: &L,
) -> Result<Vec<E>, RegistryError> {
    let (start_key, end_key) = namespace_range(E::KIND);
    collect_range(ledger, &start_key, &end_key, |entry| {
        E::decode(&entry.value).map(Some)
    })
}

/// Render raw records as a numbered JSON array.
pub fn render_records(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::from(&b"["[..]);
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            out.push(b',');
        }
        let entry = format!("{{\"Number\":\"{}\",\"Record\":", index + 1);
        out.extend_from_slice(entry.as_bytes());
        out.extend_from_slice(record);
        out.push(b'}');
    }
    out.push(b']');
    out
}

/// Every record stored in `[start_key, end_key)`, whatever its kind.
pub fn list_by_range<L: Ledger + ?Sized>(
    ledger: &L,
    message: message::QueryServiceByRange,
) -> Result<Vec<u8>, RegistryError> {
    let records = collect_range(ledger, &message.start_key, &message.end_key, |entry| {
        Ok(Some(entry.value))
    })?;
    log::debug!(
        "Range [{:?}, {:?}) holds {} records",
        message.start_key,
        message.end_key,
        records.len()
    );
    Ok(render_records(&records))
}

/// Services and mashups developed by the given user.
pub fn query_services_by_user<L: Ledger + ?Sized>(
    ledger: &L,
    message: message::QueryServiceByUser,
) -> Result<Vec<u8>, RegistryError> {
    let (start_key, end_key) = namespace_range(EntityKind::Service);
    let records = collect_range(ledger, &start_key, &end_key, |entry| {
        let service = Service::decode(&entry.value)?;
        Ok(if service.developer == message.user {
            Some(entry.value)
        } else {
            None
        })
    })?;
    Ok(render_records(&records))
}
