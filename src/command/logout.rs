// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::error::Result;

/// Forget the current session.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut super::App) -> Result<()> {
        let who = app.session.principal().map(|p| p.display_name());
        app.session.logout().await?;

        match who {
            Some(name) => println!("Logged out {name}."),
            None => println!("Nobody was logged in."),
        }
        Ok(())
    }
}
