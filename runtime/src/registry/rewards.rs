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

use service_registry_core::key::EntityKind;
use service_registry_core::message;
use service_registry_core::state::Service;

use super::{load_existing, AddressLookup};
use crate::incentive::parse_amount;
use crate::{Ledger, RegistryError};

/// Transfer an arbitrary amount from the caller to the developer of a service.
///
/// Anybody may reward any service, whatever its status.
pub fn reward_service<L: Ledger + ?Sized>(
    ledger: &mut L,
    message: message::RewardService,
) -> Result<(), RegistryError> {
    let amount = parse_amount(&message.amount)?;
    let service: Service = load_existing(ledger, &message.service)?;
    let address = ledger
        .bound_address(&service.developer)?
        .ok_or_else(|| RegistryError::not_found(EntityKind::User, &service.developer))?;

    ledger
        .transfer(&address, &message.token, &amount)
        .map_err(|error| RegistryError::TransferFailed {
            recipient: address.clone(),
            reason: error.0,
        })?;
    log::info!(
        "Rewarded {} {} to {} for service {}",
        amount,
        message.token,
        service.developer,
        service.name
    );
    Ok(())
}
