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

//! Entry point for transactions.
//!
//! A transaction names a function and carries positional string arguments. [invoke] checks the
//! arguments, runs the operation against the ledger and returns the payload of the response.

use service_registry_core::message::{self, Function, Invocable};

use crate::registry::{listing, mashups, rewards, services, users};
use crate::{Ledger, RegistryError};

pub const INIT_SUCCESS: &str = "Init success.";
pub const REGISTER_USER_SUCCESS: &str = "User register success.";
pub const REMOVE_USER_SUCCESS: &str = "User delete success.";
pub const REGISTER_SERVICE_SUCCESS: &str = "Service register success.";
pub const PUBLISH_SERVICE_SUCCESS: &str = "Publish Service success.";
pub const INVALIDATE_SERVICE_SUCCESS: &str = "Invalidate Service success.";
pub const CREATE_MASHUP_SUCCESS: &str = "Mashup register success.";
pub const REWARD_SERVICE_SUCCESS: &str = "Reward the service success.";

/// Apply the function named `function` to the ledger.
///
/// Mutations answer with a confirmation string, queries with record bytes. Nothing is written
/// to the ledger when the arguments are rejected.
pub fn invoke<L: Ledger + ?Sized>(
    ledger: &mut L,
    function: &str,
    args: Vec<String>,
) -> Result<Vec<u8>, RegistryError> {
    let function: Function = function.parse()?;
    log::debug!("Invoking {} with {} arguments", function, args.len());

    let result = apply(ledger, function, args);
    if let Err(error) = &result {
        log::info!("{} failed [{}]: {}", function, error.code(), error);
    }
    result
}

fn apply<L: Ledger + ?Sized>(
    ledger: &mut L,
    function: Function,
    args: Vec<String>,
) -> Result<Vec<u8>, RegistryError> {
    match function {
        Function::Init => confirm(INIT_SUCCESS),
        Function::RegisterUser => {
            let message = message::RegisterUser::from_args(args)?;
            let caller = ledger.sender()?;
            users::register_user(ledger, &caller, message)?;
            confirm(REGISTER_USER_SUCCESS)
        }
        Function::RemoveUser => {
            users::remove_user(ledger, message::RemoveUser::from_args(args)?)?;
            confirm(REMOVE_USER_SUCCESS)
        }
        Function::QueryUser => users::get_user(ledger, message::QueryUser::from_args(args)?),
        Function::RegisterService => {
            let message = message::RegisterService::from_args(args)?;
            let caller = ledger.sender()?;
            services::register_service(ledger, &caller, message)?;
            confirm(REGISTER_SERVICE_SUCCESS)
        }
        Function::InvalidateService => {
            let message = message::InvalidateService::from_args(args)?;
            let caller = ledger.sender()?;
            services::invalidate_service(ledger, &caller, message)?;
            confirm(INVALIDATE_SERVICE_SUCCESS)
        }
        Function::PublishService => {
            let message = message::PublishService::from_args(args)?;
            let caller = ledger.sender()?;
            services::publish_service(ledger, &caller, message)?;
            confirm(PUBLISH_SERVICE_SUCCESS)
        }
        Function::QueryService => {
            services::get_service(ledger, message::QueryService::from_args(args)?)
        }
        Function::EditService => {
            let message = message::EditService::from_args(args)?;
            let caller = ledger.sender()?;
            services::edit_service(ledger, &caller, message)
        }
        Function::CreateMashup => {
            let message = message::CreateMashup::from_args(args)?;
            let caller = ledger.sender()?;
            mashups::create_mashup(ledger, &caller, message)?;
            confirm(CREATE_MASHUP_SUCCESS)
        }
        Function::QueryServiceByRange => {
            listing::list_by_range(ledger, message::QueryServiceByRange::from_args(args)?)
        }
        Function::QueryServiceByUser => {
            listing::query_services_by_user(ledger, message::QueryServiceByUser::from_args(args)?)
        }
        Function::RewardService => {
            rewards::reward_service(ledger, message::RewardService::from_args(args)?)?;
            confirm(REWARD_SERVICE_SUCCESS)
        }
    }
}

fn confirm(text: &str) -> Result<Vec<u8>, RegistryError> {
    Ok(text.as_bytes().to_vec())
}
