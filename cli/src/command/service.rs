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

//! Define the commands supported by the CLI related to services.

use super::*;

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Register a service developed by a user bound to the author address
    Register(Register),
    /// Make a service available
    Publish(Publish),
    /// Invalidate a service for good
    Invalidate(Invalidate),
    /// Change the type or the description of a service
    Edit(Edit),
    /// Show a service or mashup
    Show(Show),
    /// List the names of all services and mashups
    List(List),
    /// List the records stored in a key range
    ListRange(ListRange),
    /// List the services and mashups developed by a user
    ByUser(ByUser),
    /// Transfer tokens from the author to the developer of a service
    Reward(Reward),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Register(cmd) => cmd.run(ctx).await,
            Command::Publish(cmd) => cmd.run(ctx).await,
            Command::Invalidate(cmd) => cmd.run(ctx).await,
            Command::Edit(cmd) => cmd.run(ctx).await,
            Command::Show(cmd) => cmd.run(ctx).await,
            Command::List(cmd) => cmd.run(ctx).await,
            Command::ListRange(cmd) => cmd.run(ctx).await,
            Command::ByUser(cmd) => cmd.run(ctx).await,
            Command::Reward(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Register {
    /// Name of the service. Services and mashups share their names.
    name: ServiceName,

    /// User that develops the service.
    owner: UserName,

    #[structopt(long = "type", value_name = "type", default_value = "")]
    service_type: String,

    #[structopt(long, default_value = "")]
    description: String,
}

#[async_trait::async_trait]
impl CommandT for Register {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let service_registered = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::RegisterService {
                    name: self.name.clone(),
                    service_type: self.service_type.clone(),
                    description: self.description.clone(),
                    owner: self.owner.clone(),
                },
            )
            .await?;
        transaction_applied_ok(service_registered)?;
        println!("Service {} is now registered.", self.name);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Publish {
    name: ServiceName,
}

#[async_trait::async_trait]
impl CommandT for Publish {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let published = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::PublishService {
                    name: self.name.clone(),
                },
            )
            .await?;
        transaction_applied_ok(published)?;
        println!("Service {} is published.", self.name);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Invalidate {
    name: ServiceName,
}

#[async_trait::async_trait]
impl CommandT for Invalidate {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let invalidated = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::InvalidateService {
                    name: self.name.clone(),
                },
            )
            .await?;
        transaction_applied_ok(invalidated)?;
        println!("Service {} is invalid.", self.name);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Edit {
    name: ServiceName,

    /// Field to change: "Type" or "Description".
    field: EditableField,

    value: String,
}

#[async_trait::async_trait]
impl CommandT for Edit {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let edited = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::EditService {
                    name: self.name.clone(),
                    field: self.field.to_string(),
                    value: self.value.clone(),
                },
            )
            .await?;
        let previous = transaction_applied_ok(edited)?;
        println!("Service {} is edited. It was:", self.name);
        print_service(&previous);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Show {
    name: ServiceName,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let service = ctx
            .client
            .get_service(&self.name)
            .await?
            .ok_or_else(|| CommandError::ServiceNotFound {
                name: self.name.clone(),
            })?;
        print_service(&service);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let services = ctx.client.list_services().await?;
        println!("SERVICES ({})", services.len());
        for name in services {
            println!("{}", name)
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct ListRange {
    /// First key of the range. Unbounded if empty.
    #[structopt(default_value = "")]
    start_key: String,

    /// Key after the end of the range. Unbounded if empty.
    #[structopt(default_value = "")]
    end_key: String,
}

#[async_trait::async_trait]
impl CommandT for ListRange {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let listed = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::QueryServiceByRange {
                    start_key: self.start_key.clone(),
                    end_key: self.end_key.clone(),
                },
            )
            .await?;
        for entry in transaction_applied_ok(listed)? {
            println!("{}: {}", entry.number, entry.record);
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct ByUser {
    user: UserName,
}

#[async_trait::async_trait]
impl CommandT for ByUser {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let listed = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::QueryServiceByUser {
                    user: self.user.clone(),
                },
            )
            .await?;
        let services = transaction_applied_ok(listed)?;
        println!("SERVICES OF {} ({})", self.user, services.len());
        for service in services {
            print_service(&service);
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Reward {
    service: ServiceName,

    /// Non-negative integer amount.
    amount: String,

    #[structopt(long, default_value = INCENTIVE_TOKEN)]
    token: TokenType,
}

#[async_trait::async_trait]
impl CommandT for Reward {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let rewarded = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::RewardService {
                    service: self.service.clone(),
                    token: self.token.clone(),
                    amount: self.amount.clone(),
                },
            )
            .await?;
        transaction_applied_ok(rewarded)?;
        println!(
            "Rewarded the developer of {} with {} {}.",
            self.service, self.amount, self.token
        );
        Ok(())
    }
}
