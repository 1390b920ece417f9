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

//! Client for the service registry.
//!
//! [Client] submits messages to a [backend::Backend] and decodes the responses. The only
//! backend shipped with this crate is the [backend::Emulator], which applies transactions to an
//! in-memory ledger.
//!
//! ```no_run
//! # use service_registry_client::*;
//! # async fn example() -> Result<(), Error> {
//! let client = Client::new_emulator();
//! let author = backend::GENESIS_ACCOUNT.to_string();
//! client
//!     .submit_message(
//!         &author,
//!         message::RegisterUser {
//!             name: "alice".into(),
//!             introduction: "Hi".into(),
//!         },
//!     )
//!     .await?
//!     .ok()?;
//! let alice = client.get_user("alice").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod backend;
mod error;
mod interface;
pub mod message;

pub use crate::interface::{ClientT, *};

use service_registry_core::codec::Entity;
use service_registry_core::key::{entity_name, EntityKind};

#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn backend::Backend + Sync + Send>,
}

impl Client {
    /// Create a client with a fresh [backend::Emulator].
    pub fn new_emulator() -> Self {
        Self::from_backend(backend::Emulator::new())
    }

    pub fn from_backend(backend: impl backend::Backend + Sync + Send + 'static) -> Self {
        Client {
            backend: Arc::new(backend),
        }
    }

    async fn fetch_entity<E: Entity>(&self, name: &str) -> Result<Option<E>, Error> {
        let key = key::ledger_key(E::KIND, name);
        match self.backend.fetch(&key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list_names(&self, kind: EntityKind) -> Result<Vec<String>, Error> {
        let keys = self.backend.fetch_keys(kind.prefix()).await?;
        Ok(keys
            .iter()
            .filter_map(|key| entity_name(kind, key))
            .map(String::from)
            .collect())
    }
}

#[async_trait::async_trait]
impl ClientT for Client {
    async fn submit_message<Message_: Message>(
        &self,
        author: &AccountId,
        message: Message_,
    ) -> Result<TransactionIncluded<Message_>, Error> {
        let applied = self
            .backend
            .submit(author, message.into_invocation())
            .await?;
        let result = match applied.result {
            Ok(payload) => Ok(Message_::output_from_payload(&payload)?),
            Err(error) => Err(error),
        };
        Ok(TransactionIncluded {
            tx_index: applied.tx_index,
            result,
        })
    }

    async fn submit_invocation(
        &self,
        author: &AccountId,
        invocation: Invocation,
    ) -> Result<Result<Vec<u8>, RegistryError>, Error> {
        Ok(self.backend.submit(author, invocation).await?.result)
    }

    async fn free_balance(&self, account_id: &AccountId, token: &str) -> Result<Balance, Error> {
        self.backend.free_balance(account_id, token).await
    }

    async fn get_user(&self, name: &str) -> Result<Option<User>, Error> {
        self.fetch_entity(name).await
    }

    async fn list_users(&self) -> Result<Vec<UserName>, Error> {
        self.list_names(EntityKind::User).await
    }

    async fn get_service(&self, name: &str) -> Result<Option<Service>, Error> {
        self.fetch_entity(name).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceName>, Error> {
        self.list_names(EntityKind::Service).await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[async_std::test]
    async fn submit_and_fetch() {
        let client = Client::new_emulator();
        let author = "addr-a".to_string();

        let tx_included = client
            .submit_message(
                &author,
                message::RegisterUser {
                    name: "alice".into(),
                    introduction: "Hi".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(tx_included.result, Ok(()));

        let alice = client.get_user("alice").await.unwrap().unwrap();
        assert_eq!(alice.address, author);
        assert_eq!(
            client.list_users().await.unwrap(),
            vec!["alice".to_string()]
        );
        assert_eq!(client.get_user("bob").await.unwrap(), None);
    }

    #[async_std::test]
    async fn rejected_message() {
        let client = Client::new_emulator();
        let tx_included = client
            .submit_message(
                &"addr-a".to_string(),
                message::RemoveUser {
                    name: "nobody".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            tx_included.result,
            Err(RegistryError::not_found(EntityKind::User, "nobody"))
        );
        assert!(matches!(tx_included.ok(), Err(Error::Transaction(_))));
    }

    #[async_std::test]
    async fn raw_invocation() {
        let client = Client::new_emulator();
        let result = client
            .submit_invocation(
                &"addr-a".to_string(),
                Invocation {
                    function: "init".into(),
                    args: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(result, Ok(b"Init success.".to_vec()));
    }
}
