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

//! Define the commands supported by the CLI related to mashups.

use super::*;

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Create a mashup and pay the developers of the invoked services
    Create(Create),
    /// Show a mashup
    Show(service::Show),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Create(cmd) => cmd.run(ctx).await,
            Command::Show(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Create {
    /// Name of the mashup. Services and mashups share their names.
    name: ServiceName,

    /// Services the mashup invokes.
    #[structopt(required = true, min_values = 1)]
    services: Vec<ServiceName>,

    #[structopt(long = "type", value_name = "type", default_value = "")]
    service_type: String,

    #[structopt(long, default_value = "")]
    description: String,
}

#[async_trait::async_trait]
impl CommandT for Create {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let mashup_created = ctx
            .client
            .submit_message(
                &ctx.tx_author,
                message::CreateMashup {
                    name: self.name.clone(),
                    service_type: self.service_type.clone(),
                    description: self.description.clone(),
                    services: self.services.clone(),
                },
            )
            .await?;
        transaction_applied_ok(mashup_created)?;
        println!(
            "Mashup {} is now registered. Every distinct developer was paid {} {}.",
            self.name, MASHUP_INVOKE_INCENTIVE, INCENTIVE_TOKEN
        );
        Ok(())
    }
}
