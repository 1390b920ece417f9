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

//! Miscellaneous helpers used throughout registry tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use service_registry_client::backend::Emulator;
use service_registry_client::*;

/// Balance of the incentive token that [random_funded_account] equips accounts with.
pub const FUNDING: u32 = 100_000;

/// A client for a fresh emulator. The emulator is returned as well so that tests can fund
/// accounts and inspect the ledger.
pub fn emulated_client() -> (Client, Emulator) {
    let emulator = Emulator::new();
    (Client::from_backend(emulator.clone()), emulator)
}

/// Submit a message and wait for it to be applied.
///
/// Panics if submission errors. The registry may still have rejected the message.
pub async fn submit_ok<Message_: Message>(
    client: &Client,
    author: &AccountId,
    message: Message_,
) -> TransactionIncluded<Message_> {
    client.submit_message(author, message).await.unwrap()
}

pub fn random_alnum_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .collect::<String>()
}

pub fn random_name() -> String {
    let size = rand::thread_rng().gen_range(8, 33);
    random_alnum_string(size).to_lowercase()
}

pub fn random_address() -> AccountId {
    format!("addr-{}", random_alnum_string(16))
}

/// A random address that holds [FUNDING] of the incentive token.
pub fn random_funded_account(emulator: &Emulator) -> AccountId {
    let account_id = random_address();
    emulator
        .mint(&account_id, INCENTIVE_TOKEN, Balance::from(FUNDING))
        .unwrap();
    account_id
}

/// Create a [message::RegisterUser] with random parameters.
pub fn random_register_user_message() -> message::RegisterUser {
    message::RegisterUser {
        name: random_name(),
        introduction: random_alnum_string(20),
    }
}

/// Create a [message::RegisterService] with random parameters for a service developed by
/// `owner`.
pub fn random_register_service_message(owner: &str) -> message::RegisterService {
    message::RegisterService {
        name: random_name(),
        service_type: "REST".into(),
        description: random_alnum_string(20),
        owner: owner.into(),
    }
}

/// Register a user with a random name bound to `author`. Returns the name.
pub async fn register_random_user(client: &Client, author: &AccountId) -> UserName {
    let register_user_message = random_register_user_message();
    let name = register_user_message.name.clone();
    let tx_applied = submit_ok(client, author, register_user_message).await;
    assert_eq!(tx_applied.result, Ok(()));
    name
}

/// A funded account and the random user bound to it.
pub async fn account_with_user(client: &Client, emulator: &Emulator) -> (AccountId, UserName) {
    let account_id = random_funded_account(emulator);
    let name = register_random_user(client, &account_id).await;
    (account_id, name)
}

/// Register a service with a random name developed by `owner`, who must be bound to `author`.
pub async fn register_random_service(
    client: &Client,
    author: &AccountId,
    owner: &str,
) -> ServiceName {
    let register_service_message = random_register_service_message(owner);
    let name = register_service_message.name.clone();
    let tx_applied = submit_ok(client, author, register_service_message).await;
    assert_eq!(tx_applied.result, Ok(()));
    name
}

/// Check if the user with the given name exists in the ledger state.
pub async fn user_exists(client: &Client, name: &str) -> bool {
    client
        .list_users()
        .await
        .unwrap()
        .iter()
        .any(|user| user == name)
}

/// Fetch a service that must exist.
pub async fn get_service(client: &Client, name: &str) -> Service {
    client.get_service(name).await.unwrap().unwrap()
}
