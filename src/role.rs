// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use inflector::Inflector as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error;

/// Prefix some backend responses put in front of the role name.
const ROLE_PREFIX: &str = "ROLE_";

/// The kind of account a principal is logged in as.
///
/// The backend is inconsistent about whether it sends `STUDENT` or
/// `ROLE_STUDENT`; both parse to the same variant and only the unprefixed form
/// is ever written back out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub(crate) enum Role {
    Student,
    Tutor,
    Admin,
}

impl Role {
    pub(crate) const ALL: [Self; 3] = [Self::Student, Self::Tutor, Self::Admin];

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Tutor => "TUTOR",
            Self::Admin => "ADMIN",
        }
    }

    pub(crate) fn title(self) -> String {
        self.as_str().to_title_case()
    }

    /// The path prefix of the pages that belong to this role.
    pub(crate) const fn section(self) -> &'static str {
        match self {
            Self::Student => "/student",
            Self::Tutor => "/tutor",
            Self::Admin => "/admin",
        }
    }

    pub(crate) const fn login_path(self) -> &'static str {
        match self {
            Self::Student => "/student/login",
            Self::Tutor => "/tutor/login",
            Self::Admin => "/admin/login",
        }
    }

    /// Where a freshly logged-in principal lands when there is nothing to
    /// resume.
    pub(crate) const fn home_path(self) -> &'static str {
        match self {
            Self::Student => "/student/home",
            Self::Tutor => "/tutor/dashboard",
            Self::Admin => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = error::Conversion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unprefixed = match trimmed.get(..ROLE_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(ROLE_PREFIX) => {
                &trimmed[ROLE_PREFIX.len()..]
            }
            _ => trimmed,
        };

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(unprefixed))
            .ok_or_else(|| error::Conversion::UnknownRole(s.to_owned()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn parse_canonical_and_prefixed() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
            assert_eq!(
                format!("{ROLE_PREFIX}{role}").parse::<Role>().ok(),
                Some(role)
            );
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" tutor ".parse::<Role>().ok(), Some(Role::Tutor));
        assert_eq!("role_admin".parse::<Role>().ok(), Some(Role::Admin));
    }

    #[test]
    fn parse_rejects_unknown() {
        for raw in ["", "ROLE_", "TEACHER", "ROLE_ROLE_STUDENT", "STUDENTS"] {
            assert!(
                matches!(raw.parse::<Role>(), Err(error::Conversion::UnknownRole(ref v)) if v == raw),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn wire_form_is_unprefixed() {
        assert_tokens(&Role::Admin, &[Token::Str("ADMIN")]);
        assert_de_tokens(&Role::Student, &[Token::Str("ROLE_STUDENT")]);
        assert_de_tokens_error::<Role>(
            &[Token::Str("JANITOR")],
            r#"unrecognized role "JANITOR""#,
        );
    }

    #[test]
    fn title() {
        assert_eq!(Role::Tutor.title(), "Tutor");
    }
}
