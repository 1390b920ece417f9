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

//! Types and the client trait shared by every client implementation.

pub use service_registry_core::key;
pub use service_registry_core::message::Invocation;
pub use service_registry_core::state::{
    Composition, EditableField, Service, ServiceStatus, User,
};
pub use service_registry_core::{
    AccountId, Balance, ErrorCode, RegistryError, ServiceName, TokenType, UserName,
};
pub use service_registry_runtime::incentive::{INCENTIVE_TOKEN, MASHUP_INVOKE_INCENTIVE};
pub use service_registry_runtime::MemoryLedger;

pub use crate::error::Error;
pub use crate::message::{Message, RangeEntry};

#[derive(Clone, Debug)]
pub struct TransactionIncluded<Message_: Message> {
    /// Position of the transaction in the ledger history.
    pub tx_index: u64,
    /// The result of the message.
    ///
    /// See [Message::output_from_payload].
    pub result: Result<Message_::Output, RegistryError>,
}

impl<Message_: Message> TransactionIncluded<Message_> {
    /// The output of the message, or the rejection as an [Error::Transaction].
    pub fn ok(self) -> Result<Message_::Output, Error> {
        Ok(self.result?)
    }
}

#[async_trait::async_trait]
pub trait ClientT {
    /// Submit a message authored by `author` and wait until it has been applied.
    ///
    /// ```no_run
    /// # use service_registry_client::*;
    /// # async fn example(client: Client, author: AccountId) -> Result<(), Error> {
    /// let message = message::RegisterUser {
    ///     name: "alice".into(),
    ///     introduction: "Hi".into(),
    /// };
    ///
    /// // This call fails if the backend could not apply the transaction or if the response is
    /// // malformed.
    /// let tx_included = client.submit_message(&author, message).await?;
    ///
    /// // This fails if the registry rejected the transaction.
    /// tx_included.result?;
    /// # Ok(())
    /// # }
    /// ```
    async fn submit_message<Message_: Message>(
        &self,
        author: &AccountId,
        message: Message_,
    ) -> Result<TransactionIncluded<Message_>, Error>;

    /// Submit a raw invocation without interpreting the response.
    async fn submit_invocation(
        &self,
        author: &AccountId,
        invocation: Invocation,
    ) -> Result<Result<Vec<u8>, RegistryError>, Error>;

    async fn free_balance(&self, account_id: &AccountId, token: &str) -> Result<Balance, Error>;

    async fn get_user(&self, name: &str) -> Result<Option<User>, Error>;

    async fn list_users(&self) -> Result<Vec<UserName>, Error>;

    async fn get_service(&self, name: &str) -> Result<Option<Service>, Error>;

    /// Names of all services and mashups.
    async fn list_services(&self) -> Result<Vec<ServiceName>, Error>;
}
