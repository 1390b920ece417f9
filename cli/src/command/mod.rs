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

use crate::{transaction_applied_ok, CommandContext, CommandError, CommandT};
use service_registry_client::*;

use structopt::StructOpt;

pub mod account;
pub mod mashup;
pub mod other;
pub mod service;
pub mod user;

fn print_service(service: &Service) {
    println!("service {}", service.name);
    println!("  type: {}", service.service_type);
    println!("  developer: {}", service.developer);
    println!("  description: {}", service.description);
    println!("  status: {}", service.status);
    println!("  created: {}", service.created_time);
    if !service.updated_time.is_empty() {
        println!("  updated: {}", service.updated_time);
    }
    if service.is_mashup {
        let invoked: Vec<&str> = service.composition.keys().map(String::as_str).collect();
        println!("  invokes: {}", invoked.join(", "));
    }
}
