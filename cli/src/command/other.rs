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

use super::*;

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Submit a raw invocation and print the response payload
    Invoke(Invoke),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Invoke(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Invoke {
    /// Name of the function, for example "queryServiceByRange".
    function: String,

    /// Positional arguments of the function.
    args: Vec<String>,
}

#[async_trait::async_trait]
impl CommandT for Invoke {
    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let payload = ctx
            .client
            .submit_invocation(
                &ctx.tx_author,
                Invocation {
                    function: self.function.clone(),
                    args: self.args.clone(),
                },
            )
            .await??;
        println!("{}", String::from_utf8_lossy(&payload));
        Ok(())
    }
}
