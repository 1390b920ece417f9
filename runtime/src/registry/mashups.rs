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

//! Mashups are services composed of other services.
//!
//! Creating a mashup pays every distinct developer of the invoked services a fixed incentive out
//! of the caller's balance. The mashup is persisted only after all payouts went through. Payouts
//! already made are not undone when a later step fails. Ledgers that drop the writes of failed
//! transactions undo them.

use std::collections::BTreeSet;

use service_registry_core::key::EntityKind;
use service_registry_core::message::{self, Function};
use service_registry_core::state::{Composition, Service, COMPOSITION_WEIGHT};

use super::{exists, load_existing, store, users, AddressLookup};
use crate::incentive::Incentive;
use crate::{AccountId, Ledger, RegistryError, UserName};

pub fn create_mashup<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::CreateMashup,
) -> Result<(), RegistryError> {
    if message.services.is_empty() {
        let function = Function::CreateMashup;
        return Err(RegistryError::Arity {
            function: function.name().to_string(),
            expected: function.arity(),
        });
    }
    if exists(ledger, EntityKind::Service, &message.name)? {
        return Err(RegistryError::already_exists(EntityKind::Service, message.name));
    }
    // Callers that no user is bound to are recorded by their address.
    let developer = match users::find_by_address(ledger, caller)? {
        Some(user) => user.name,
        None => caller.clone(),
    };

    let mut composition = Composition::new();
    let mut developers = BTreeSet::<UserName>::new();
    for name in &message.services {
        let invoked: Service = load_existing(ledger, name)?;
        composition.insert(invoked.name, COMPOSITION_WEIGHT);
        developers.insert(invoked.developer);
    }

    let incentive = Incentive::mashup_invoke();
    for recipient in &developers {
        let address = ledger
            .bound_address(recipient)?
            .ok_or_else(|| RegistryError::not_found(EntityKind::User, recipient))?;
        ledger
            .transfer(&address, &incentive.token, &incentive.amount)
            .map_err(|error| RegistryError::TransferFailed {
                recipient: address.clone(),
                reason: error.0,
            })?;
        log::debug!(
            "Paid {} {} to {} ({}) for mashup {}",
            incentive.amount,
            incentive.token,
            recipient,
            address,
            message.name
        );
    }

    let mashup = Service::new_mashup(
        message.name,
        message.service_type,
        message.description,
        developer,
        crate::timestamp::now(ledger)?,
        composition,
    );
    store(ledger, &mashup)?;
    log::info!(
        "Registered mashup {} invoking {} services of {} developers",
        mashup.name,
        mashup.composition.len(),
        developers.len()
    );
    Ok(())
}
