// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use reqwest::StatusCode;
use thiserror::Error;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("data conversion error: {0}")]
    Conversion(#[from] Conversion),
    #[error("storage error: {0}")]
    Storage(#[from] Storage),
    // Displayed without a prefix so the message can be shown next to the
    // form that triggered it.
    #[error("{0}")]
    Api(#[from] Api),
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_builder() {
            Self::Api(Api::Request(value))
        } else if value.is_connect() || value.is_timeout() || value.is_request() {
            Self::Api(Api::NoResponse(value))
        } else {
            Self::Http(value)
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

#[derive(Error, Debug)]
pub(crate) enum Conversion {
    #[error("unrecognized role {0:?}")]
    UnknownRole(String),
    #[error("expected {0} to be a JSON object")]
    NotAnObject(&'static str),
}

#[derive(Error, Debug)]
pub(crate) enum Storage {
    #[error("key {0:?} is present without its companion key {1:?}")]
    HalfPresent(&'static str, &'static str),
    #[error("key {0:?} holds an empty value")]
    Empty(&'static str),
}

#[derive(Error, Debug)]
pub(crate) enum Api {
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("No response from server. Please try again later.")]
    NoResponse(#[source] reqwest::Error),
    #[error("Error setting up request. Please try again.")]
    Request(#[source] reqwest::Error),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{} is required", .0.replace('_', " "))]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}
