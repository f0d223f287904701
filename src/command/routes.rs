// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table,
};

use crate::{error::Result, routes::ROUTES};

/// List the pages of the application and who may open them.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, _app: &mut super::App) -> Result<()> {
        println!(
            "{}",
            Table::new(ROUTES.iter())
                .with(Style::rounded())
                .with(Modify::new(Segment::all()).with(Alignment::left()))
        );
        Ok(())
    }
}
