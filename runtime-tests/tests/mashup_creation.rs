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

/// Runtime tests implemented with the emulated [Client].
///
/// The tests in this module concern mashups and the incentives paid for them.
use service_registry_client::{self as client, ClientT, ErrorCode, RegistryError};
use service_registry_test_utils as utils;

use client::key::EntityKind;
use client::message;
use client::{Balance, ServiceStatus, INCENTIVE_TOKEN, MASHUP_INVOKE_INCENTIVE};

fn create_mashup_message(services: &[&String]) -> message::CreateMashup {
    message::CreateMashup {
        name: utils::random_name(),
        service_type: "mashup".into(),
        description: utils::random_alnum_string(20),
        services: services.iter().map(|name| name.to_string()).collect(),
    }
}

async fn balance(client: &client::Client, account_id: &client::AccountId) -> Balance {
    client
        .free_balance(account_id, INCENTIVE_TOKEN)
        .await
        .unwrap()
}

#[async_std::test]
async fn create_mashup_pays_each_developer_once() {
    let (client, emulator) = utils::emulated_client();
    let (alice, alice_name) = utils::account_with_user(&client, &emulator).await;
    let (bob, bob_name) = utils::account_with_user(&client, &emulator).await;
    let (author, author_name) = utils::account_with_user(&client, &emulator).await;
    let weather = utils::register_random_service(&client, &alice, &alice_name).await;
    let maps = utils::register_random_service(&client, &alice, &alice_name).await;
    let news = utils::register_random_service(&client, &bob, &bob_name).await;

    let create_mashup_message = create_mashup_message(&[&weather, &news, &maps, &weather]);
    let tx_applied = utils::submit_ok(&client, &author, create_mashup_message.clone()).await;
    assert_eq!(tx_applied.result, Ok(()));

    let incentive = Balance::from(MASHUP_INVOKE_INCENTIVE);
    let funding = Balance::from(utils::FUNDING);
    assert_eq!(balance(&client, &alice).await, &funding + &incentive);
    assert_eq!(balance(&client, &bob).await, &funding + &incentive);
    assert_eq!(
        balance(&client, &author).await,
        &funding - &incentive - &incentive
    );

    let mashup = utils::get_service(&client, &create_mashup_message.name).await;
    assert!(mashup.is_mashup);
    assert_eq!(mashup.status, ServiceStatus::Created);
    assert_eq!(mashup.developer, author_name);
    assert_eq!(mashup.composition.len(), 3);
    for invoked in &[&weather, &maps, &news] {
        assert_eq!(mashup.composition.get(*invoked), Some(&1));
    }
}

#[async_std::test]
async fn create_mashup_with_missing_service() {
    let (client, emulator) = utils::emulated_client();
    let (alice, alice_name) = utils::account_with_user(&client, &emulator).await;
    let (author, _) = utils::account_with_user(&client, &emulator).await;
    let weather = utils::register_random_service(&client, &alice, &alice_name).await;
    let missing = utils::random_name();

    let create_mashup_message = create_mashup_message(&[&weather, &missing]);
    let tx_applied = utils::submit_ok(&client, &author, create_mashup_message.clone()).await;

    assert_eq!(
        tx_applied.result,
        Err(RegistryError::not_found(EntityKind::Service, missing))
    );
    assert_eq!(
        balance(&client, &alice).await,
        Balance::from(utils::FUNDING)
    );
    assert_eq!(
        client
            .get_service(&create_mashup_message.name)
            .await
            .unwrap(),
        None
    );
}

#[async_std::test]
async fn create_mashup_with_taken_name() {
    let (client, emulator) = utils::emulated_client();
    let (alice, alice_name) = utils::account_with_user(&client, &emulator).await;
    let weather = utils::register_random_service(&client, &alice, &alice_name).await;

    let mut create_mashup_message = create_mashup_message(&[&weather]);
    create_mashup_message.name = weather.clone();
    let tx_applied = utils::submit_ok(&client, &alice, create_mashup_message).await;

    assert_eq!(
        tx_applied.result,
        Err(RegistryError::already_exists(EntityKind::Service, weather))
    );
}

#[async_std::test]
async fn create_mashup_without_user() {
    let (client, emulator) = utils::emulated_client();
    let (alice, alice_name) = utils::account_with_user(&client, &emulator).await;
    let weather = utils::register_random_service(&client, &alice, &alice_name).await;
    let author = utils::random_funded_account(&emulator);

    let create_mashup_message = create_mashup_message(&[&weather]);
    let tx_applied = utils::submit_ok(&client, &author, create_mashup_message.clone()).await;
    assert_eq!(tx_applied.result, Ok(()));

    let incentive = Balance::from(MASHUP_INVOKE_INCENTIVE);
    let funding = Balance::from(utils::FUNDING);
    assert_eq!(balance(&client, &author).await, &funding - &incentive);
    assert_eq!(balance(&client, &alice).await, &funding + &incentive);
    // No user is bound to the author, so the mashup records the address.
    let mashup = utils::get_service(&client, &create_mashup_message.name).await;
    assert_eq!(mashup.developer, author);
}

#[async_std::test]
async fn failed_payout_is_rolled_back() {
    let (client, emulator) = utils::emulated_client();
    let (alice, alice_name) = utils::account_with_user(&client, &emulator).await;
    let (bob, bob_name) = utils::account_with_user(&client, &emulator).await;
    let weather = utils::register_random_service(&client, &alice, &alice_name).await;
    let news = utils::register_random_service(&client, &bob, &bob_name).await;

    // Enough funds for a single payout.
    let author = utils::random_address();
    let funds = Balance::from(MASHUP_INVOKE_INCENTIVE);
    emulator.mint(&author, INCENTIVE_TOKEN, funds).unwrap();
    utils::register_random_user(&client, &author).await;

    let create_mashup_message = create_mashup_message(&[&weather, &news]);
    let tx_applied = utils::submit_ok(&client, &author, create_mashup_message).await;

    assert_eq!(
        tx_applied.result.unwrap_err().code(),
        ErrorCode::TransferFailed
    );
    // The emulator drops all effects of the failed transaction, including the first payout.
    assert_eq!(
        balance(&client, &alice).await,
        Balance::from(utils::FUNDING)
    );
    assert_eq!(balance(&client, &bob).await, Balance::from(utils::FUNDING));
    assert_eq!(
        balance(&client, &author).await,
        Balance::from(MASHUP_INVOKE_INCENTIVE)
    );
}

#[async_std::test]
async fn create_mashup_without_services() {
    let (client, emulator) = utils::emulated_client();
    let (author, _) = utils::account_with_user(&client, &emulator).await;

    let tx_applied = utils::submit_ok(&client, &author, create_mashup_message(&[])).await;

    assert_eq!(tx_applied.result.unwrap_err().code(), ErrorCode::Arity);
}
