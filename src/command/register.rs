// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use serde_json::Value;

use crate::{
    backend::Registration,
    error::{self, Result},
    password,
};

/// Create a student account. This does not log in.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[arg(long)]
    username: String,

    /// Full name.
    #[arg(long)]
    name: String,

    #[arg(long)]
    gender: String,

    #[arg(long)]
    email: String,

    /// Phone number.
    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut super::App) -> Result<()> {
        let password = app
            .prompt
            .prompt(
                password::RequestBuilder::new(&format!("New password for {}", self.username))
                    .into_request(),
            )
            .await?
            .ok_or(error::Password::NoPrompt)?;

        let registration = Registration {
            username: self.username,
            password,
            name: self.name,
            gender: self.gender,
            email: self.email,
            ph_no: self.phone,
            address: self.address,
        };

        match app
            .session
            .register(app.backend.as_ref(), &registration)
            .await?
        {
            Value::String(message) => println!("{message}"),
            _ => println!("Registration successful."),
        }

        println!(
            "Log in with: {} login student {}",
            *crate::metadata::CLIENT_NAME,
            registration.username
        );
        Ok(())
    }
}
