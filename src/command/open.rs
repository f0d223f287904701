// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::Result,
    routes::{self, Navigation},
};

/// Open a page as the current session would see it.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The path of the page, e.g. `/student/bookings`.
    #[clap()]
    path: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut super::App) -> Result<()> {
        let state = app.session.snapshot().await;
        match routes::navigate(&state, &self.path) {
            Navigation::Render(page) => println!("{page}"),
            Navigation::Loading => println!("Loading..."),
            Navigation::Redirect {
                to,
                from: Some(from),
            } => println!("Redirect to {to} (from {from})"),
            Navigation::Redirect { to, from: None } => println!("Redirect to {to}"),
        }
        Ok(())
    }
}
