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

//! Transaction related types used in the Service Registry.
//!
//! Every registry function takes a list of positional string arguments. Each message type
//! knows how to build itself from that list and how to turn itself back into it.

use std::fmt;
use std::str::FromStr;

use crate::{Arity, RegistryError, ServiceName, TokenType, UserName};

/// Names of the functions a transaction may invoke.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Function {
    Init,
    RegisterUser,
    RemoveUser,
    QueryUser,
    RegisterService,
    InvalidateService,
    PublishService,
    QueryService,
    EditService,
    CreateMashup,
    QueryServiceByRange,
    QueryServiceByUser,
    RewardService,
}

impl Function {
    pub const ALL: [Function; 13] = [
        Function::Init,
        Function::RegisterUser,
        Function::RemoveUser,
        Function::QueryUser,
        Function::RegisterService,
        Function::InvalidateService,
        Function::PublishService,
        Function::QueryService,
        Function::EditService,
        Function::CreateMashup,
        Function::QueryServiceByRange,
        Function::QueryServiceByUser,
        Function::RewardService,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Init => "init",
            Function::RegisterUser => "registerUser",
            Function::RemoveUser => "removeUser",
            Function::QueryUser => "queryUser",
            Function::RegisterService => "registerService",
            Function::InvalidateService => "invalidateService",
            Function::PublishService => "publishService",
            Function::QueryService => "queryService",
            Function::EditService => "editService",
            Function::CreateMashup => "createMashup",
            Function::QueryServiceByRange => "queryServiceByRange",
            Function::QueryServiceByUser => "queryServiceByUser",
            Function::RewardService => "rewardService",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Init => Arity::AtLeast(0),
            Function::RegisterUser => Arity::Exactly(2),
            Function::RemoveUser
            | Function::QueryUser
            | Function::InvalidateService
            | Function::PublishService
            | Function::QueryService
            | Function::QueryServiceByUser => Arity::Exactly(1),
            Function::RegisterService => Arity::Exactly(4),
            Function::EditService => Arity::Exactly(3),
            Function::CreateMashup => Arity::AtLeast(4),
            Function::QueryServiceByRange => Arity::Exactly(2),
            Function::RewardService => Arity::AtLeast(3),
        }
    }

    /// Fails with [RegistryError::Arity] if `args` has the wrong length for this function.
    pub fn check_arity(self, args: &[String]) -> Result<(), RegistryError> {
        let expected = self.arity();
        if expected.accepts(args.len()) {
            Ok(())
        } else {
            Err(RegistryError::Arity {
                function: self.name().to_string(),
                expected,
            })
        }
    }
}

impl FromStr for Function {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .iter()
            .copied()
            .find(|function| function.name() == s)
            .ok_or_else(|| RegistryError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function name together with its raw arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

/// Implemented by every message so it can travel as an [Invocation].
pub trait Invocable: Sized {
    const FUNCTION: Function;

    /// Parses the positional arguments. The arity was already checked.
    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError>;

    fn into_args(self) -> Vec<String>;

    fn from_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Self::FUNCTION.check_arity(&args)?;
        Self::parse_args(args)
    }

    fn into_invocation(self) -> Invocation {
        Invocation {
            function: Self::FUNCTION.name().to_string(),
            args: self.into_args(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterUser {
    pub name: UserName,
    pub introduction: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveUser {
    pub name: UserName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryUser {
    pub name: UserName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterService {
    pub name: ServiceName,
    pub service_type: String,
    pub description: String,
    /// User that will own the service. Must be bound to the transaction author.
    pub owner: UserName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidateService {
    pub name: ServiceName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublishService {
    pub name: ServiceName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryService {
    pub name: ServiceName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditService {
    pub name: ServiceName,
    /// Name of the field to update. Checked against [crate::state::EditableField] once the
    /// caller is authorized.
    pub field: String,
    pub value: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateMashup {
    pub name: ServiceName,
    pub service_type: String,
    pub description: String,
    /// Services the mashup invokes. Duplicates are allowed and collapse into one entry.
    pub services: Vec<ServiceName>,
}

/// List all records with keys in `[start_key, end_key)`. Empty bounds are unbounded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryServiceByRange {
    pub start_key: String,
    pub end_key: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryServiceByUser {
    pub user: UserName,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardService {
    pub service: ServiceName,
    pub token: TokenType,
    /// Decimal representation of the amount. Parsed when the message is applied.
    pub amount: String,
}

/// Takes the next positional argument. Only called after the arity check.
fn next_arg(args: &mut std::vec::IntoIter<String>) -> String {
    args.next().unwrap_or_default()
}

impl Invocable for RegisterUser {
    const FUNCTION: Function = Function::RegisterUser;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(RegisterUser {
            name: next_arg(&mut args),
            introduction: next_arg(&mut args),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name, self.introduction]
    }
}

impl Invocable for RemoveUser {
    const FUNCTION: Function = Function::RemoveUser;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(RemoveUser {
            name: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name]
    }
}

impl Invocable for QueryUser {
    const FUNCTION: Function = Function::QueryUser;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(QueryUser {
            name: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name]
    }
}

impl Invocable for RegisterService {
    const FUNCTION: Function = Function::RegisterService;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(RegisterService {
            name: next_arg(&mut args),
            service_type: next_arg(&mut args),
            description: next_arg(&mut args),
            owner: next_arg(&mut args),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name, self.service_type, self.description, self.owner]
    }
}

impl Invocable for InvalidateService {
    const FUNCTION: Function = Function::InvalidateService;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(InvalidateService {
            name: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name]
    }
}

impl Invocable for PublishService {
    const FUNCTION: Function = Function::PublishService;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(PublishService {
            name: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name]
    }
}

impl Invocable for QueryService {
    const FUNCTION: Function = Function::QueryService;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(QueryService {
            name: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name]
    }
}

impl Invocable for EditService {
    const FUNCTION: Function = Function::EditService;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(EditService {
            name: next_arg(&mut args),
            field: next_arg(&mut args),
            value: next_arg(&mut args),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.name, self.field, self.value]
    }
}

impl Invocable for CreateMashup {
    const FUNCTION: Function = Function::CreateMashup;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(CreateMashup {
            name: next_arg(&mut args),
            service_type: next_arg(&mut args),
            description: next_arg(&mut args),
            services: args.collect(),
        })
    }

    fn into_args(self) -> Vec<String> {
        let mut args = vec![self.name, self.service_type, self.description];
        args.extend(self.services);
        args
    }
}

impl Invocable for QueryServiceByRange {
    const FUNCTION: Function = Function::QueryServiceByRange;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(QueryServiceByRange {
            start_key: next_arg(&mut args),
            end_key: next_arg(&mut args),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.start_key, self.end_key]
    }
}

impl Invocable for QueryServiceByUser {
    const FUNCTION: Function = Function::QueryServiceByUser;

    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        Ok(QueryServiceByUser {
            user: next_arg(&mut args.into_iter()),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.user]
    }
}

impl Invocable for RewardService {
    const FUNCTION: Function = Function::RewardService;

    /// Arguments after the amount are accepted and ignored.
    fn parse_args(args: Vec<String>) -> Result<Self, RegistryError> {
        let mut args = args.into_iter();
        Ok(RewardService {
            service: next_arg(&mut args),
            token: next_arg(&mut args),
            amount: next_arg(&mut args),
        })
    }

    fn into_args(self) -> Vec<String> {
        vec![self.service, self.token, self.amount]
    }
}
