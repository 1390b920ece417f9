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

//! Registry operations.
//!
//! Each operation reads, checks and writes within a single transaction. Nothing is cached
//! between transactions.

use service_registry_core::codec::Entity;
use service_registry_core::key::{ledger_key, EntityKind};
use service_registry_core::state::{Service, User};

use crate::{AccountId, Ledger, RegistryError};

pub mod listing;
pub mod mashups;
pub mod rewards;
pub mod services;
pub mod users;

/// Resolves a user name to the address currently bound to it.
///
/// Authorization goes through this lookup on every call. Changing the address bound to a user
/// therefore changes who may administer all services developed by that user.
pub trait AddressLookup {
    fn bound_address(&self, user_name: &str) -> Result<Option<AccountId>, RegistryError>;
}

impl<L: Ledger + ?Sized> AddressLookup for L {
    fn bound_address(&self, user_name: &str) -> Result<Option<AccountId>, RegistryError> {
        Ok(load::<User, _>(self, user_name)?.map(|user| user.address))
    }
}

/// Fails with [RegistryError::Unauthorized] unless `caller` is the address bound to the
/// developer of `service`.
pub fn ensure_developer(
    lookup: &(impl AddressLookup + ?Sized),
    service: &Service,
    caller: &AccountId,
) -> Result<(), RegistryError> {
    match lookup.bound_address(&service.developer)? {
        Some(address) if &address == caller => Ok(()),
        Some(_) => Err(RegistryError::Unauthorized(format!(
            "{} is not invoked by the developer of {}",
            caller, service.name
        ))),
        None => Err(RegistryError::Unauthorized(format!(
            "developer {} of {} is not registered",
            service.developer, service.name
        ))),
    }
}

/// Raw bytes stored for the entity, if any.
pub(crate) fn load_raw<L: Ledger + ?Sized>(
    ledger: &L,
    kind: EntityKind,
    name: &str,
) -> Result<Option<Vec<u8>>, RegistryError> {
    Ok(ledger.get_state(&ledger_key(kind, name))?)
}

pub(crate) fn load<E: Entity, L: Ledger + ?Sized>(
    ledger: &L,
    name: &str,
) -> Result<Option<E>, RegistryError> {
    load_raw(ledger, E::KIND, name)?
        .map(|bytes| E::decode(&bytes))
        .transpose()
}

/// Like [load] but fails with [RegistryError::NotFound] if the entity does not exist.
pub(crate) fn load_existing<E: Entity, L: Ledger + ?Sized>(
    ledger: &L,
    name: &str,
) -> Result<E, RegistryError> {
    load(ledger, name)?
        .ok_or_else(|| RegistryError::not_found(E::KIND, name))
}

pub(crate) fn exists<L: Ledger + ?Sized>(
    ledger: &L,
    kind: EntityKind,
    name: &str,
) -> Result<bool, RegistryError> {
    Ok(load_raw(ledger, kind, name)?.is_some())
}

pub(crate) fn store<E: Entity, L: Ledger + ?Sized>(
    ledger: &mut L,
    entity: &E,
) -> Result<(), RegistryError> {
    let bytes = entity.encode()?;
    ledger.put_state(&entity.key(), bytes)?;
    Ok(())
}
