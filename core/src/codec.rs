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

//! Encoding of entities into ledger values.
//!
//! Values are JSON documents. Range queries splice stored values verbatim into their result, so
//! the encoding has to stay valid JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::key::{ledger_key, EntityKind};
use crate::state::{Service, User};
use crate::RegistryError;

/// An entity that is stored in the ledger under a key derived from its name.
pub trait Entity: Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn name(&self) -> &str;

    fn key(&self) -> String {
        ledger_key(Self::KIND, self.name())
    }

    fn encode(&self) -> Result<Vec<u8>, RegistryError> {
        serde_json::to_vec(self).map_err(|error| RegistryError::Serialization {
            kind: Self::KIND,
            reason: error.to_string(),
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, RegistryError> {
        serde_json::from_slice(bytes).map_err(|error| RegistryError::Serialization {
            kind: Self::KIND,
            reason: error.to_string(),
        })
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Service {
    const KIND: EntityKind = EntityKind::Service;

    fn name(&self) -> &str {
        &self.name
    }
}
