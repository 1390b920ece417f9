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

//! Lifecycle of plain services.
//!
//! ```text
//! (none) --register--> Created --publish--> Available
//! Created | Available --invalidate--> Invalid
//! ```
//!
//! Every mutation is restricted to the address bound to the developer of the service.

use service_registry_core::codec::Entity;
use service_registry_core::key::EntityKind;
use service_registry_core::message;
use service_registry_core::state::{EditableField, Service, User};

use super::{ensure_developer, exists, load_existing, load_raw, store};
use crate::{timestamp, AccountId, Ledger, RegistryError};

/// Register a service developed by `owner`. The caller must be bound to `owner`.
pub fn register_service<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::RegisterService,
) -> Result<(), RegistryError> {
    let owner: User = load_existing(ledger, &message.owner)?;
    if &owner.address != caller {
        return Err(RegistryError::Unauthorized(format!(
            "{} is not bound to user {}",
            caller, owner.name
        )));
    }
    if exists(ledger, EntityKind::Service, &message.name)? {
        return Err(RegistryError::already_exists(EntityKind::Service, message.name));
    }

    let service = Service::new(
        message.name,
        message.service_type,
        message.description,
        owner.name,
        timestamp::now(ledger)?,
    );
    store(ledger, &service)?;
    log::info!(
        "Registered service {} developed by {}",
        service.name,
        service.developer
    );
    Ok(())
}

/// Make a service available. Publishing an invalid service leaves it invalid.
pub fn publish_service<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::PublishService,
) -> Result<(), RegistryError> {
    let service = load_authorized(ledger, caller, &message.name)?;
    if service.status.is_terminal() {
        log::debug!("Service {} is invalid and stays so", service.name);
    }
    let service = service.publish();
    store(ledger, &service)?;
    log::info!("Service {} is {}", service.name, service.status);
    Ok(())
}

pub fn invalidate_service<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::InvalidateService,
) -> Result<(), RegistryError> {
    let service = load_authorized(ledger, caller, &message.name)?.invalidate();
    store(ledger, &service)?;
    log::info!("Invalidated service {}", service.name);
    Ok(())
}

/// Update an editable field and stamp the time of the edit.
///
/// Returns the record as it was stored before the edit.
pub fn edit_service<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::EditService,
) -> Result<Vec<u8>, RegistryError> {
    let previous = load_raw(ledger, EntityKind::Service, &message.name)?
        .ok_or_else(|| RegistryError::not_found(EntityKind::Service, &message.name))?;
    let service = Service::decode(&previous)?;
    ensure_developer(ledger, &service, caller)?;
    let field: EditableField = message.field.parse()?;

    let updated_time = timestamp::now(ledger)?;
    let service = service.edit(field, message.value, updated_time);
    store(ledger, &service)?;
    log::info!("Edited {} of service {}", field, service.name);
    Ok(previous)
}

/// The stored service or mashup record.
pub fn get_service<L: Ledger + ?Sized>(
    ledger: &L,
    message: message::QueryService,
) -> Result<Vec<u8>, RegistryError> {
    load_raw(ledger, EntityKind::Service, &message.name)?
        .ok_or_else(|| RegistryError::not_found(EntityKind::Service, message.name))
}

fn load_authorized<L: Ledger + ?Sized>(
    ledger: &L,
    caller: &AccountId,
    name: &str,
) -> Result<Service, RegistryError> {
    let service: Service = load_existing(ledger, name)?;
    ensure_developer(ledger, &service, caller)?;
    Ok(service)
}
