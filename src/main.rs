// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod backend;
mod command;
mod error;
mod guard;
mod metadata;
mod password;
mod role;
mod routes;
mod session;
mod storage;

use std::{path::PathBuf, process};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{error, warn};
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Logout(command::logout::Command),
    Register(command::register::Command),
    Whoami(command::whoami::Command),
    Open(command::open::Command),
    Routes(command::routes::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, app: &mut command::App) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(app).await,
            Self::Logout(cmd) => cmd.execute(app).await,
            Self::Register(cmd) => cmd.execute(app).await,
            Self::Whoami(cmd) => cmd.execute(app).await,
            Self::Open(cmd) => cmd.execute(app).await,
            Self::Routes(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the FindMyTutor backend.
    #[arg(long, env = "FINDMYTUTOR_URL", default_value = metadata::DEFAULT_BACKEND_URL, value_parser = Url::parse)]
    url: Url,

    /// Keep the session in memory only, so it is forgotten when this command
    /// exits.
    #[arg(long)]
    no_persist_session: bool,

    /// The path to the Pinentry program to use when asking for passwords.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage> {
    if !args.no_persist_session {
        if let Some(file_storage) = storage::File::new(metadata::SESSION_FILE_NAME) {
            return Box::new(file_storage);
        }
        warn!("We need to fall back to memory storage because there is no data directory for this user");
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let mut session = session::Session::new(get_session_storage(&args));
    let _principal = session.restore().await;

    let mut app = command::App {
        session,
        backend: Box::new(backend::Rest::new(args.url)?),
        prompt: Box::new(prompt),
    };

    command::Command::execute(args.command, &mut app).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("FINDMYTUTOR_LOG", "warn")
        .write_style("FINDMYTUTOR_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
