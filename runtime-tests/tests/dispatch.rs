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
/// The tests in this module submit raw invocations and check the response payloads.
use service_registry_client::{self as client, ClientT, ErrorCode, RegistryError};
use service_registry_test_utils as utils;

async fn invoke(
    client: &client::Client,
    author: &client::AccountId,
    function: &str,
    args: &[&str],
) -> Result<String, RegistryError> {
    client
        .submit_invocation(
            author,
            client::Invocation {
                function: function.into(),
                args: args.iter().map(|arg| arg.to_string()).collect(),
            },
        )
        .await
        .unwrap()
        .map(|payload| String::from_utf8(payload).unwrap())
}

#[async_std::test]
async fn confirmation_strings() {
    let (client, emulator) = utils::emulated_client();
    let author = utils::random_funded_account(&emulator);
    let user = utils::random_name();
    let service = utils::random_name();
    let mashup = utils::random_name();

    let steps: Vec<(&str, Vec<&str>, &str)> = vec![
        ("init", vec![], "Init success."),
        ("registerUser", vec![user.as_str(), "hi"], "User register success."),
        (
            "registerService",
            vec![service.as_str(), "REST", "", user.as_str()],
            "Service register success.",
        ),
        ("publishService", vec![service.as_str()], "Publish Service success."),
        (
            "createMashup",
            vec![mashup.as_str(), "mashup", "", service.as_str()],
            "Mashup register success.",
        ),
        (
            "rewardService",
            vec![service.as_str(), "INK", "3"],
            "Reward the service success.",
        ),
        (
            "invalidateService",
            vec![service.as_str()],
            "Invalidate Service success.",
        ),
        ("removeUser", vec![user.as_str()], "User delete success."),
    ];
    for (function, args, confirmation) in steps {
        assert_eq!(
            invoke(&client, &author, function, &args).await,
            Ok(confirmation.to_string()),
            "{}",
            function
        );
    }
}

#[async_std::test]
async fn wrong_argument_count() {
    let (client, _) = utils::emulated_client();
    let author = utils::random_address();

    let error = invoke(&client, &author, "registerService", &["a", "b"])
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::Arity);
    assert_eq!(
        error.to_string(),
        "Incorrect number of arguments for registerService. Expecting 4."
    );
    assert!(client.list_services().await.unwrap().is_empty());
}

#[async_std::test]
async fn unknown_function() {
    let (client, _) = utils::emulated_client();

    let result = invoke(&client, &utils::random_address(), "transfer", &["x"]).await;

    assert_eq!(
        result,
        Err(RegistryError::UnknownFunction("transfer".into()))
    );
}

#[async_std::test]
async fn transaction_index_advances() {
    let (client, _) = utils::emulated_client();
    let author = utils::random_address();

    let first = utils::submit_ok(&client, &author, utils::random_register_user_message()).await;
    let failed = utils::submit_ok(
        &client,
        &author,
        client::message::RemoveUser {
            name: utils::random_name(),
        },
    )
    .await;
    let third = utils::submit_ok(&client, &author, utils::random_register_user_message()).await;

    assert!(failed.result.is_err());
    assert_eq!(first.tx_index + 1, failed.tx_index);
    assert_eq!(failed.tx_index + 1, third.tx_index);
}
