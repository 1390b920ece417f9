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

use service_registry_core::key::{user_key, EntityKind};
use service_registry_core::message;
use service_registry_core::state::User;

use super::{exists, listing, load_raw, store};
use crate::{AccountId, Ledger, RegistryError};

/// Register a user bound to the address of the caller.
pub fn register_user<L: Ledger + ?Sized>(
    ledger: &mut L,
    caller: &AccountId,
    message: message::RegisterUser,
) -> Result<(), RegistryError> {
    if exists(ledger, EntityKind::User, &message.name)? {
        return Err(RegistryError::already_exists(EntityKind::User, message.name));
    }

    let user = User::new(message.name, message.introduction, caller.clone());
    store(ledger, &user)?;
    log::info!("Registered user {} bound to {}", user.name, user.address);
    Ok(())
}

/// Remove a user. Anybody may remove any user.
///
/// Services developed by the user are kept. Nobody is authorized to administer them until a
/// user with the same name registers again.
pub fn remove_user<L: Ledger + ?Sized>(
    ledger: &mut L,
    message: message::RemoveUser,
) -> Result<(), RegistryError> {
    if !exists(ledger, EntityKind::User, &message.name)? {
        return Err(RegistryError::not_found(EntityKind::User, message.name));
    }

    ledger.del_state(&user_key(&message.name))?;
    log::info!("Removed user {}", message.name);
    Ok(())
}

/// The stored user record.
pub fn get_user<L: Ledger + ?Sized>(
    ledger: &L,
    message: message::QueryUser,
) -> Result<Vec<u8>, RegistryError> {
    load_raw(ledger, EntityKind::User, &message.name)?
        .ok_or_else(|| RegistryError::not_found(EntityKind::User, message.name))
}

/// First user in key order that is bound to `address`.
pub fn find_by_address<L: Ledger + ?Sized>(
    ledger: &L,
    address: &AccountId,
) -> Result<Option<User>, RegistryError> {
    let users: Vec<User> = listing::collect_entities(ledger)?;
    let found = users.into_iter().find(|user| &user.address == address);
    log::debug!(
        "Address {} resolves to user {:?}",
        address,
        found.as_ref().map(|user| &user.name)
    );
    Ok(found)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registry::test_helpers::{ledger, stored};
    use service_registry_core::codec::Entity;

    #[test]
    fn register_binds_caller_address() {
        let mut ledger = ledger();
        register_user(
            &mut ledger,
            &"addr-a".to_string(),
            message::RegisterUser {
                name: "alice".into(),
                introduction: "hi".into(),
            },
        )
        .unwrap();

        let user = User::decode(&stored(&ledger, &user_key("alice")).unwrap()).unwrap();
        assert_eq!(
            user,
            User::new("alice".into(), "hi".into(), "addr-a".into())
        );
        assert_eq!(user.contribution, 0);
    }

    #[test]
    fn duplicate_user_leaves_record_unchanged() {
        let mut ledger = ledger();
        register_helper(&mut ledger, "alice", "addr-a");
        let before = stored(&ledger, &user_key("alice"));

        let result = register_user(
            &mut ledger,
            &"addr-b".to_string(),
            message::RegisterUser {
                name: "alice".into(),
                introduction: "impostor".into(),
            },
        );

        assert_eq!(
            result,
            Err(RegistryError::already_exists(EntityKind::User, "alice"))
        );
        assert_eq!(stored(&ledger, &user_key("alice")), before);
    }

    #[test]
    fn remove_and_query() {
        let mut ledger = ledger();
        register_helper(&mut ledger, "alice", "addr-a");

        let bytes = get_user(
            &ledger,
            message::QueryUser {
                name: "alice".into(),
            },
        )
        .unwrap();
        assert_eq!(Some(bytes), stored(&ledger, &user_key("alice")));

        remove_user(
            &mut ledger,
            message::RemoveUser {
                name: "alice".into(),
            },
        )
        .unwrap();
        assert_eq!(stored(&ledger, &user_key("alice")), None);

        let query = get_user(
            &ledger,
            message::QueryUser {
                name: "alice".into(),
            },
        );
        assert_eq!(
            query,
            Err(RegistryError::not_found(EntityKind::User, "alice"))
        );
    }

    #[test]
    fn remove_missing_user() {
        let mut ledger = ledger();
        let result = remove_user(
            &mut ledger,
            message::RemoveUser {
                name: "nobody".into(),
            },
        );
        assert_eq!(
            result,
            Err(RegistryError::not_found(EntityKind::User, "nobody"))
        );
    }

    #[test]
    fn address_resolves_to_first_user_in_key_order() {
        let mut ledger = ledger();
        register_helper(&mut ledger, "carol", "addr-shared");
        register_helper(&mut ledger, "bob", "addr-shared");
        register_helper(&mut ledger, "alice", "addr-a");

        let found = find_by_address(&ledger, &"addr-shared".to_string()).unwrap();
        assert_eq!(found.map(|user| user.name), Some("bob".to_string()));

        let none = find_by_address(&ledger, &"addr-unknown".to_string()).unwrap();
        assert_eq!(none, None);
        assert_eq!(ledger.open_iterators(), 0);
    }

    fn register_helper(ledger: &mut crate::MemoryLedger, name: &str, address: &str) {
        crate::registry::test_helpers::register_user(ledger, name, address)
    }
}
