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
/// The tests in this module concern the lifecycle of services.
use service_registry_client::{self as client, ClientT, ErrorCode, RegistryError};
use service_registry_test_utils as utils;

use client::key::EntityKind;
use client::message;
use client::ServiceStatus;

#[async_std::test]
async fn register_service() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let register_service_message = utils::random_register_service_message(&owner);

    let tx_applied = utils::submit_ok(&client, &author, register_service_message.clone()).await;
    assert_eq!(tx_applied.result, Ok(()));

    let service = utils::get_service(&client, &register_service_message.name).await;
    assert_eq!(service.name, register_service_message.name);
    assert_eq!(service.service_type, register_service_message.service_type);
    assert_eq!(service.description, register_service_message.description);
    assert_eq!(service.developer, owner);
    assert_eq!(service.status, ServiceStatus::Created);
    assert!(!service.is_mashup);
    assert!(service.composition.is_empty());
    assert!(service.created_time.contains(" UTC "));
    assert_eq!(service.updated_time, "");

    let services = client.list_services().await.unwrap();
    assert_eq!(services, vec![register_service_message.name]);
}

#[async_std::test]
async fn register_service_for_somebody_else() {
    let (client, emulator) = utils::emulated_client();
    let (_, owner) = utils::account_with_user(&client, &emulator).await;
    let register_service_message = utils::random_register_service_message(&owner);

    let tx_applied = utils::submit_ok(
        &client,
        &utils::random_address(),
        register_service_message.clone(),
    )
    .await;

    assert_eq!(
        tx_applied.result.unwrap_err().code(),
        ErrorCode::Unauthorized
    );
    assert_eq!(
        client
            .get_service(&register_service_message.name)
            .await
            .unwrap(),
        None
    );
}

#[async_std::test]
async fn register_service_for_missing_owner() {
    let (client, _) = utils::emulated_client();
    let owner = utils::random_name();

    let tx_applied = utils::submit_ok(
        &client,
        &utils::random_address(),
        utils::random_register_service_message(&owner),
    )
    .await;

    assert_eq!(
        tx_applied.result,
        Err(RegistryError::not_found(EntityKind::User, owner))
    );
}

#[async_std::test]
async fn register_service_with_duplicate_name() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    let before = utils::get_service(&client, &name).await;

    let tx_applied = utils::submit_ok(
        &client,
        &author,
        message::RegisterService {
            name: name.clone(),
            service_type: "SOAP".into(),
            description: "again".into(),
            owner: owner.clone(),
        },
    )
    .await;

    assert_eq!(
        tx_applied.result,
        Err(RegistryError::already_exists(EntityKind::Service, name.clone()))
    );
    assert_eq!(utils::get_service(&client, &name).await, before);
}

#[async_std::test]
async fn publish_and_invalidate() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;

    let published = utils::submit_ok(
        &client,
        &author,
        message::PublishService { name: name.clone() },
    )
    .await;
    assert_eq!(published.result, Ok(()));
    assert_eq!(
        utils::get_service(&client, &name).await.status,
        ServiceStatus::Available
    );

    let invalidated = utils::submit_ok(
        &client,
        &author,
        message::InvalidateService { name: name.clone() },
    )
    .await;
    assert_eq!(invalidated.result, Ok(()));
    assert_eq!(
        utils::get_service(&client, &name).await.status,
        ServiceStatus::Invalid
    );

    // Nothing brings an invalid service back.
    let republished = utils::submit_ok(
        &client,
        &author,
        message::PublishService { name: name.clone() },
    )
    .await;
    assert_eq!(republished.result, Ok(()));
    assert_eq!(
        utils::get_service(&client, &name).await.status,
        ServiceStatus::Invalid
    );
}

#[async_std::test]
async fn mutations_require_developer_address() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    let before = utils::get_service(&client, &name).await;
    let stranger = utils::random_address();

    let published = utils::submit_ok(
        &client,
        &stranger,
        message::PublishService { name: name.clone() },
    )
    .await;
    let invalidated = utils::submit_ok(
        &client,
        &stranger,
        message::InvalidateService { name: name.clone() },
    )
    .await;
    let edited = utils::submit_ok(
        &client,
        &stranger,
        message::EditService {
            name: name.clone(),
            field: "Description".into(),
            value: "defaced".into(),
        },
    )
    .await;

    assert_eq!(
        published.result.unwrap_err().code(),
        ErrorCode::Unauthorized
    );
    assert_eq!(
        invalidated.result.unwrap_err().code(),
        ErrorCode::Unauthorized
    );
    assert_eq!(edited.result.unwrap_err().code(), ErrorCode::Unauthorized);
    assert_eq!(utils::get_service(&client, &name).await, before);
}

#[async_std::test]
async fn removed_developer_cannot_be_authorized() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    utils::submit_ok(
        &client,
        &author,
        message::RemoveUser {
            name: owner.clone(),
        },
    )
    .await
    .result
    .unwrap();

    let published = utils::submit_ok(
        &client,
        &author,
        message::PublishService { name: name.clone() },
    )
    .await;

    assert_eq!(
        published.result.unwrap_err().code(),
        ErrorCode::Unauthorized
    );
}

#[async_std::test]
async fn edit_service() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    let before = utils::get_service(&client, &name).await;

    let edited = utils::submit_ok(
        &client,
        &author,
        message::EditService {
            name: name.clone(),
            field: "Type".into(),
            value: "SOAP".into(),
        },
    )
    .await;

    // The response holds the service as it was.
    assert_eq!(edited.result, Ok(before.clone()));
    let after = utils::get_service(&client, &name).await;
    assert_eq!(after.service_type, "SOAP");
    assert_eq!(after.description, before.description);
    assert_eq!(after.status, before.status);
    assert!(!after.updated_time.is_empty());
}

#[async_std::test]
async fn edit_unknown_field() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    let before = utils::get_service(&client, &name).await;

    let result = client
        .submit_invocation(
            &author,
            client::Invocation {
                function: "editService".into(),
                args: vec![name.clone(), "Developer".into(), "mallory".into()],
            },
        )
        .await
        .unwrap();

    assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidField);
    assert_eq!(utils::get_service(&client, &name).await, before);
}

#[async_std::test]
async fn edit_unknown_field_reports_missing_service_and_stranger_first() {
    let (client, emulator) = utils::emulated_client();
    let (author, owner) = utils::account_with_user(&client, &emulator).await;
    let name = utils::register_random_service(&client, &author, &owner).await;
    let missing = utils::random_name();

    let on_missing = utils::submit_ok(
        &client,
        &author,
        message::EditService {
            name: missing.clone(),
            field: "Owner".into(),
            value: "x".into(),
        },
    )
    .await;
    let by_stranger = utils::submit_ok(
        &client,
        &utils::random_address(),
        message::EditService {
            name: name.clone(),
            field: "Owner".into(),
            value: "x".into(),
        },
    )
    .await;

    assert_eq!(
        on_missing.result,
        Err(RegistryError::not_found(EntityKind::Service, missing))
    );
    assert_eq!(
        by_stranger.result.unwrap_err().code(),
        ErrorCode::Unauthorized
    );
}

#[async_std::test]
async fn query_missing_service() {
    let (client, _) = utils::emulated_client();
    let name = utils::random_name();

    let queried = utils::submit_ok(
        &client,
        &utils::random_address(),
        message::QueryService { name: name.clone() },
    )
    .await;

    assert_eq!(
        queried.result,
        Err(RegistryError::not_found(EntityKind::Service, name))
    );
}
