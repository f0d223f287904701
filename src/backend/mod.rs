// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

mod rest;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;

use crate::{
    error::{self, Result},
    role::Role,
    session::Identity,
};

pub(crate) use rest::Rest;

pub(crate) struct Credentials {
    role: Role,
    username: String,
    password: SecretString,
}

impl Credentials {
    #[cfg(test)]
    pub(crate) fn new(role: Role, username: &str, password: &str) -> Self {
        Self::with_secret(role, username, SecretString::new(password.to_owned()))
    }

    pub(crate) fn with_secret(role: Role, username: &str, password: SecretString) -> Self {
        Self {
            role,
            username: username.to_owned(),
            password,
        }
    }

    pub(crate) const fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) const fn password(&self) -> &SecretString {
        &self.password
    }
}

/// A new student account.
pub(crate) struct Registration {
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) name: String,
    pub(crate) gender: String,
    pub(crate) email: String,
    pub(crate) ph_no: String,
    pub(crate) address: String,
}

impl Registration {
    /// The form fields in the order they are checked and sent, password
    /// excluded.
    pub(crate) fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("username", self.username.as_str()),
            ("name", self.name.as_str()),
            ("gender", self.gender.as_str()),
            ("email", self.email.as_str()),
            ("ph_no", self.ph_no.as_str()),
            ("address", self.address.as_str()),
        ]
    }

    /// Fails with the first required field that is blank.
    pub(crate) fn validate(&self) -> Result<()> {
        use secrecy::ExposeSecret as _;

        let [username, rest @ ..] = self.fields();
        let blank = [username, ("password", self.password.expose_secret().as_str())]
            .into_iter()
            .chain(rest)
            .find(|&(_, value)| value.trim().is_empty());

        match blank {
            Some((field, _)) => Err(error::Api::MissingField(field).into()),
            None => Ok(()),
        }
    }
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: SecretString::new(String::new()),
            name: String::new(),
            gender: String::new(),
            email: String::new(),
            ph_no: String::new(),
            address: String::new(),
        }
    }
}

/// The backend's account endpoints.
#[async_trait]
pub(crate) trait Backend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Identity>;

    async fn register(&self, registration: &Registration) -> Result<Value>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Box<T> {
    async fn login(&self, credentials: &Credentials) -> Result<Identity> {
        (**self).login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<Value> {
        (**self).register(registration).await
    }
}
