// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::warn;

use crate::{
    backend::Credentials,
    error::{self, Error, Result},
    password::{self, Prompt, StdinPrompt},
    role::Role,
    routes,
};

const MAX_ATTEMPTS: usize = 3;

/// Log in to the backend and keep the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Read the password from the first line of standard input instead of
    /// prompting for it.
    #[arg(long)]
    password_stdin: bool,

    /// The page the login was redirected from. It is resumed after logging in
    /// if the account may open it.
    #[arg(long, value_name = "PATH")]
    resume: Option<String>,

    /// The kind of account to log in as.
    #[arg(value_enum)]
    role: Role,

    #[clap()]
    username: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut super::App) -> Result<()> {
        let description = format!("Password for {} ({})", self.username, self.role.title());
        // Anything left over from restoring the saved session is not a login
        // failure worth showing in the prompt.
        app.session.clear_error();

        for attempt in 1..=MAX_ATTEMPTS {
            let mut req = password::RequestBuilder::new(&description);
            if let Some(e) = app.session.last_error() {
                req = req.with_error(e);
            }

            let password = if self.password_stdin {
                StdinPrompt.prompt(req.into_request()).await?
            } else {
                app.prompt.prompt(req.into_request()).await?
            }
            .ok_or(error::Password::NoPrompt)?;

            let credentials = Credentials::with_secret(self.role, &self.username, password);
            match app
                .session
                .authenticate(app.backend.as_ref(), &credentials)
                .await
            {
                Ok(principal) => {
                    println!(
                        "Logged in as {} ({}).",
                        principal.display_name(),
                        principal.role().title()
                    );
                    println!(
                        "Continue at {}",
                        routes::resume_path(self.role, self.resume.as_deref())
                    );
                    return Ok(());
                }
                Err(Error::Api(ref e @ (error::Api::InvalidCredentials | error::Api::Server { .. })))
                    if !self.password_stdin && attempt < MAX_ATTEMPTS =>
                {
                    warn!("Login failed, so you need to try again: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::Command)
    }
}
