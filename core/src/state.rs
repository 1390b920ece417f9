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

//! Type definitions for all entities stored in the ledger state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{AccountId, RegistryError, ServiceName, UserName};

/// A registered identity and the address bound to it.
///
/// # Storage
///
/// Users are stored under [crate::key::user_key] of their name.
///
/// # Invariants
///
/// * `name` and `address` are immutable.
/// * `address` is the author of the registering transaction. It is not unique across users.
///
/// # Relevant messages
///
/// * [crate::message::RegisterUser]
/// * [crate::message::RemoveUser]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub name: UserName,
    pub introduction: String,
    /// Account that receives the incentives earned by the user's services.
    pub address: AccountId,
    /// Reserved. Always `0`.
    pub contribution: i64,
}

impl User {
    pub fn new(name: UserName, introduction: String, address: AccountId) -> Self {
        User {
            name,
            introduction,
            address,
            contribution: 0,
        }
    }
}

/// Lifecycle status of a [Service].
///
/// ```text
/// Created --publish--> Available
/// Created | Available --invalidate--> Invalid
/// ```
///
/// `Invalid` is terminal.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Created,
    Available,
    Invalid,
}

impl ServiceStatus {
    /// Status after the service was published. Publishing never revives an invalid service.
    pub fn published(self) -> Self {
        match self {
            ServiceStatus::Invalid => ServiceStatus::Invalid,
            ServiceStatus::Created | ServiceStatus::Available => ServiceStatus::Available,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ServiceStatus::Invalid
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceStatus::Created => write!(f, "created"),
            ServiceStatus::Available => write!(f, "available"),
            ServiceStatus::Invalid => write!(f, "invalid"),
        }
    }
}

/// Mapping from a service name to a count.
///
/// For a mashup it lists the invoked services. For a plain service it records the co-occurrence
/// of the service with others.
///
/// Kept ordered so that records encode identically on every replica.
pub type Composition = BTreeMap<ServiceName, i64>;

/// Weight a mashup records for each service it invokes.
pub const COMPOSITION_WEIGHT: i64 = 1;

/// Services and mashups.
///
/// # Storage
///
/// Stored under [crate::key::service_key] of their name. Services and mashups share a namespace.
///
/// # Invariants
///
/// * `developer` and `is_mashup` are immutable.
/// * `status` never leaves [ServiceStatus::Invalid] once it is reached.
/// * The `composition` of a mashup has at least one entry.
///
/// # Relevant messages
///
/// * [crate::message::RegisterService]
/// * [crate::message::PublishService]
/// * [crate::message::InvalidateService]
/// * [crate::message::EditService]
/// * [crate::message::CreateMashup]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: ServiceName,
    #[serde(rename = "type")]
    pub service_type: String,
    /// Name of the user that developed the service. Resolved to an address on every
    /// authorization check.
    pub developer: UserName,
    pub description: String,
    pub created_time: String,
    /// Empty until the first edit.
    pub updated_time: String,
    pub status: ServiceStatus,
    pub is_mashup: bool,
    pub composition: Composition,
}

impl Service {
    /// A plain service in status [ServiceStatus::Created].
    pub fn new(
        name: ServiceName,
        service_type: String,
        description: String,
        developer: UserName,
        created_time: String,
    ) -> Self {
        Service {
            name,
            service_type,
            developer,
            description,
            created_time,
            updated_time: String::new(),
            status: ServiceStatus::Created,
            is_mashup: false,
            composition: Composition::new(),
        }
    }

    /// A mashup in status [ServiceStatus::Created] that invokes the services in `composition`.
    pub fn new_mashup(
        name: ServiceName,
        service_type: String,
        description: String,
        developer: UserName,
        created_time: String,
        composition: Composition,
    ) -> Self {
        Service {
            is_mashup: true,
            composition,
            ..Service::new(name, service_type, description, developer, created_time)
        }
    }

    pub fn publish(mut self) -> Self {
        self.status = self.status.published();
        self
    }

    pub fn invalidate(mut self) -> Self {
        self.status = ServiceStatus::Invalid;
        self
    }

    /// Sets `field` to `value` and records the time of the edit.
    pub fn edit(mut self, field: EditableField, value: String, updated_time: String) -> Self {
        match field {
            EditableField::Type => self.service_type = value,
            EditableField::Description => self.description = value,
        }
        self.updated_time = updated_time;
        self
    }
}

/// Fields of a [Service] its developer may change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditableField {
    Type,
    Description,
}

impl FromStr for EditableField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Type" => Ok(EditableField::Type),
            "Description" => Ok(EditableField::Description),
            other => Err(RegistryError::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditableField::Type => write!(f, "Type"),
            EditableField::Description => write!(f, "Description"),
        }
    }
}
