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

//! Messages that can be submitted to the registry and the decoding of their responses.

use serde::{Deserialize, Serialize};

pub use service_registry_core::message::*;
use service_registry_core::state::{Service, User};

use crate::Error;

pub trait Message: Invocable + Send + 'static {
    /// Output of a successfully applied message.
    ///
    /// This value is decoded from the payload the registry answers the transaction with.
    type Output: Send + 'static;

    /// Decode the payload of a successful response.
    ///
    /// Returns an error if the payload is not well formed.
    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error>;
}

/// Entry of a numbered range listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RangeEntry {
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Record")]
    pub record: serde_json::Value,
}

pub fn parse_range_listing(payload: &[u8]) -> Result<Vec<RangeEntry>, Error> {
    Ok(serde_json::from_slice(payload)?)
}

/// Implements [Message] for messages that answer with a confirmation string.
macro_rules! confirmed_message {
    ($($message:ty),*) => {
        $(
            impl Message for $message {
                type Output = ();

                fn output_from_payload(_payload: &[u8]) -> Result<Self::Output, Error> {
                    Ok(())
                }
            }
        )*
    };
}

confirmed_message!(
    RegisterUser,
    RemoveUser,
    RegisterService,
    PublishService,
    InvalidateService,
    CreateMashup,
    RewardService
);

impl Message for QueryUser {
    type Output = User;

    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error> {
        Ok(serde_json::from_slice(payload)?)
    }
}

impl Message for QueryService {
    type Output = Service;

    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error> {
        Ok(serde_json::from_slice(payload)?)
    }
}

/// Outputs the service as it was before the edit.
impl Message for EditService {
    type Output = Service;

    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error> {
        Ok(serde_json::from_slice(payload)?)
    }
}

/// Outputs the raw records in the range, which may be of any kind.
impl Message for QueryServiceByRange {
    type Output = Vec<RangeEntry>;

    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error> {
        parse_range_listing(payload)
    }
}

impl Message for QueryServiceByUser {
    type Output = Vec<Service>;

    fn output_from_payload(payload: &[u8]) -> Result<Self::Output, Error> {
        parse_range_listing(payload)?
            .into_iter()
            .map(|entry| Ok(serde_json::from_value(entry.record)?))
            .collect()
    }
}
