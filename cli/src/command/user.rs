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

//! Define the commands supported by the CLI related to users.

use super::*;

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Register a user bound to the author address
    Register(Register),
    /// Remove a user
    Unregister(Unregister),
    /// Show a registered user
    Show(Show),
    /// List the names of all registered users
    List(List),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Register(cmd) => cmd.run(ctx).await,
            Command::Unregister(cmd) => cmd.run(ctx).await,
            Command::Show(cmd) => cmd.run(ctx).await,
            Command::List(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Register {
    /// Name of the user to register.
    name: UserName,

    /// Free text about the user.
    #[structopt(long, default_value = "")]
    introduction: String,
}

#[async_trait::async_trait]
impl CommandT for Register {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let user_registered = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::RegisterUser {
                    name: self.name.clone(),
                    introduction: self.introduction.clone(),
                },
            )
            .await?;
        transaction_applied_ok(user_registered)?;
        println!("User {} is now registered to {}.", self.name, ctx.tx_author);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Unregister {
    /// Name of the user to remove.
    name: UserName,
}

#[async_trait::async_trait]
impl CommandT for Unregister {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let user_unregistered = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::RemoveUser {
                    name: self.name.clone(),
                },
            )
            .await?;
        transaction_applied_ok(user_unregistered)?;
        println!("User {} is now unregistered.", self.name);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Show {
    name: UserName,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let user = ctx
            .client
            .get_user(&self.name)
            .await?
            .ok_or_else(|| CommandError::UserNotFound {
                name: self.name.clone(),
            })?;
        println!("user {}", user.name);
        println!("  address: {}", user.address);
        println!("  introduction: {}", user.introduction);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let users = ctx.client.list_users().await?;
        println!("USERS ({})", users.len());
        for name in users {
            println!("{}", name)
        }
        Ok(())
    }
}
