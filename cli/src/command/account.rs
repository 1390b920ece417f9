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

//! Define the commands supported by the CLI related to accounts and balances.

use super::*;

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Show the balance of an account
    Balance(ShowBalance),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Balance(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct ShowBalance {
    /// Address of the account. Defaults to the author address.
    #[structopt(value_name = "address")]
    account_id: Option<AccountId>,

    #[structopt(long, default_value = INCENTIVE_TOKEN)]
    token: TokenType,
}

#[async_trait::async_trait]
impl CommandT for ShowBalance {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let account_id = self.account_id.as_ref().unwrap_or(&ctx.tx_author);
        let balance = ctx.client.free_balance(account_id, &self.token).await?;
        println!("{} {}", balance, self.token);
        Ok(())
    }
}
