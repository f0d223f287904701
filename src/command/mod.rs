// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{backend::Backend, error::Result, password::Prompt, session::Session, storage::Storage};

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod open;
pub(crate) mod register;
pub(crate) mod routes;
pub(crate) mod whoami;

/// Everything a command may touch: the one session of this process, the
/// backend it authenticates against and the way to ask for passwords.
pub(crate) struct App {
    pub(crate) session: Session<Box<dyn Storage>>,
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) prompt: Box<dyn Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, app: &mut App) -> Result<()>;
}
