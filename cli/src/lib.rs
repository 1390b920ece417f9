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

//! Command line interface to the service registry.
//!
//! Every invocation loads the emulated ledger from a local file, applies the command to it and
//! saves the ledger again.

use lazy_static::lazy_static;
use service_registry_client::backend::{Emulator, GENESIS_ACCOUNT};
use service_registry_client::*;
use std::path::PathBuf;
use structopt::StructOpt;
use thiserror::Error as ThisError;

pub mod ledger_storage;

mod command;
use command::{account, mashup, other, service, user};

#[derive(StructOpt, Clone)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(flatten)]
    pub ledger_options: LedgerOptions,

    #[structopt(flatten)]
    pub tx_options: TxOptions,

    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub async fn run(self) -> Result<(), CommandError> {
        let path = self.ledger_options.path()?;
        let emulator = match ledger_storage::load(&path)? {
            Some(ledger) => Emulator::from_ledger(ledger),
            None => {
                log::info!("Creating a new ledger at {}", path.display());
                Emulator::new()
            }
        };
        let command_context = CommandContext {
            client: Client::from_backend(emulator.clone()),
            tx_author: self.tx_options.author,
        };

        self.command.run(&command_context).await?;
        ledger_storage::save(&path, &emulator.snapshot()?)?;
        Ok(())
    }
}

lazy_static! {
    static ref DEFAULT_LEDGER_PATH: Option<PathBuf> = ledger_storage::default_path();
}

#[derive(StructOpt, Clone, Debug)]
pub struct LedgerOptions {
    /// File that holds the ledger state. Defaults to a file in the data directory of the
    /// current user.
    #[structopt(long, env = "SERVICE_REGISTRY_LEDGER", value_name = "path")]
    pub ledger: Option<PathBuf>,
}

impl LedgerOptions {
    pub fn path(&self) -> Result<PathBuf, ledger_storage::Error> {
        self.ledger
            .clone()
            .or_else(|| DEFAULT_LEDGER_PATH.clone())
            .ok_or(ledger_storage::Error::NoDataDir)
    }
}

#[derive(StructOpt, Clone, Debug)]
pub struct TxOptions {
    /// Address that authors transactions.
    #[structopt(
        long,
        env = "SERVICE_REGISTRY_AUTHOR",
        value_name = "address",
        default_value = GENESIS_ACCOUNT,
    )]
    pub author: AccountId,
}

/// Contextual data for running commands. Created from command line options.
pub struct CommandContext {
    pub client: Client,
    pub tx_author: AccountId,
}

#[derive(StructOpt, Clone)]
pub enum Command {
    /// Show balances
    Account(account::Command),
    /// Create mashups
    Mashup(mashup::Command),
    /// Manage and query services
    Service(service::Command),
    /// Manage and query users
    User(user::Command),

    #[structopt(flatten)]
    Other(other::Command),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Account(cmd) => cmd.run(ctx).await,
            Command::Mashup(cmd) => cmd.run(ctx).await,
            Command::Service(cmd) => cmd.run(ctx).await,
            Command::User(cmd) => cmd.run(ctx).await,
            Command::Other(cmd) => cmd.run(ctx).await,
        }
    }
}

/// Every CLI command must implement this trait.
#[async_trait::async_trait]
pub trait CommandT {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError>;
}

#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("client error: {0}")]
    ClientError(#[from] Error),

    #[error(transparent)]
    FailedTransaction(#[from] RegistryError),

    #[error("cannot find user {name}")]
    UserNotFound { name: UserName },

    #[error("cannot find service {name}")]
    ServiceNotFound { name: ServiceName },

    #[error(transparent)]
    LedgerStorageError(#[from] ledger_storage::Error),
}

/// The output of an applied transaction, or the registry error it was rejected with.
fn transaction_applied_ok<Message_: Message>(
    tx_included: TransactionIncluded<Message_>,
) -> Result<Message_::Output, CommandError> {
    let tx_index = tx_included.tx_index;
    tx_included.result.map_err(|error| {
        log::debug!("Transaction #{} failed", tx_index);
        CommandError::FailedTransaction(error)
    })
}
