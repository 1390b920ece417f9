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

//! Mapping from entity names to ledger keys.
//!
//! Users and services live in separate namespaces. Services and mashups share one namespace so
//! a mashup can never take the name of an existing service.

use std::fmt;

pub const USER_PREFIX: &str = "USER_";
pub const SERVICE_PREFIX: &str = "SER_";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    User,
    /// Plain services and mashups.
    Service,
}

impl EntityKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::User => USER_PREFIX,
            EntityKind::Service => SERVICE_PREFIX,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Service => write!(f, "service"),
        }
    }
}

/// Ledger key of the entity of the given kind registered as `name`.
pub fn ledger_key(kind: EntityKind, name: &str) -> String {
    format!("{}{}", kind.prefix(), name)
}

pub fn user_key(name: &str) -> String {
    ledger_key(EntityKind::User, name)
}

pub fn service_key(name: &str) -> String {
    ledger_key(EntityKind::Service, name)
}

/// Half-open key range `[start, end)` that covers exactly the keys of one namespace.
pub fn namespace_range(kind: EntityKind) -> (String, String) {
    let start = kind.prefix().to_string();
    // Both prefixes end in '_'. The next byte, '`', bounds the namespace from above.
    let end = format!("{}`", &start[..start.len() - 1]);
    (start, end)
}

/// Strips the namespace prefix from a ledger key.
///
/// Returns [None] if the key does not belong to the namespace of `kind`.
pub fn entity_name(kind: EntityKind, key: &str) -> Option<&str> {
    key.strip_prefix(kind.prefix())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn namespaces_are_disjoint() {
        assert_eq!(user_key("alice"), "USER_alice");
        assert_eq!(service_key("alice"), "SER_alice");
        assert_ne!(user_key("SER_x"), service_key("x"));
    }

    #[test]
    fn namespace_range_bounds() {
        let (start, end) = namespace_range(EntityKind::Service);
        assert_eq!(start, "SER_");
        assert_eq!(end, "SER`");

        for name in &["", "a", "zzz", "~~~", "SER_"] {
            let key = service_key(name);
            assert!(start <= key && key < end, "{} is outside the range", key);
        }
        assert!(user_key("a") < start || user_key("a") >= end);
    }

    #[test]
    fn entity_name_of_key() {
        assert_eq!(entity_name(EntityKind::User, "USER_bob"), Some("bob"));
        assert_eq!(entity_name(EntityKind::Service, "USER_bob"), None);
    }
}
