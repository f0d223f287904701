// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table, Tabled};

use crate::{error::Result, storage::IsPersistent as _};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Token", display_with = "Self::format_token")]
    token: bool,
    #[tabled(rename = "Remembered")]
    persistent: bool,
}

impl Row {
    fn format_token(token: &bool) -> String {
        if *token { "Bearer" } else { "None" }.to_owned()
    }
}

/// Show who is logged in.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Print the profile the backend returned at login as JSON instead of a
    /// summary table.
    #[arg(long)]
    json: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut super::App) -> Result<()> {
        if !app.session.is_authenticated().await {
            println!("Not logged in.");
            return Ok(());
        }

        let persistent = app.session.storage().is_persistent();
        if let Some(principal) = app.session.principal() {
            if self.json {
                println!("{}", serde_json::to_string_pretty(principal.identity())?);
            } else {
                let row = Row {
                    name: principal.display_name(),
                    role: principal.role().title(),
                    token: principal.auth_header().is_some(),
                    persistent,
                };
                println!("{}", Table::new([row]).with(Style::rounded()));
            }
        }
        Ok(())
    }
}
