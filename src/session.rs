// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::{
    backend::{Backend, Credentials, Registration},
    error::{self, Result},
    guard::SessionState,
    role::Role,
    storage::Storage,
};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const ROLE_KEY: &str = "role";

/// The profile record the backend returns for a logged-in account. Its shape
/// differs per role, so it is kept verbatim.
pub(crate) type Identity = Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Principal {
    identity: Identity,
    role: Role,
}

impl Principal {
    pub(crate) const fn new(identity: Identity, role: Role) -> Self {
        Self { identity, role }
    }

    pub(crate) const fn identity(&self) -> &Identity {
        &self.identity
    }

    pub(crate) const fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn display_name(&self) -> String {
        ["name", "username"]
            .into_iter()
            .find_map(|field| {
                self.identity
                    .get(field)
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
            })
            .map_or_else(|| self.role.title(), str::to_owned)
    }

    /// The `Authorization` header value for endpoints that want a bearer token,
    /// if the backend issued one.
    pub(crate) fn auth_header(&self) -> Option<String> {
        self.identity
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
    }
}

/// Who is logged in, as what, for the lifetime of the application.
///
/// Every mutation is written to storage before the in-memory principal is
/// touched, so memory is never ahead of what a reload would restore.
pub(crate) struct Session<S> {
    storage: S,
    principal: Option<Principal>,
    loading: bool,
    restored: bool,
    last_error: Option<String>,
}

impl<S: Storage> Session<S> {
    /// Creates an empty session that reports itself as loading until
    /// [`Session::restore`] has run.
    pub(crate) const fn new(storage: S) -> Self {
        Self {
            storage,
            principal: None,
            loading: true,
            restored: false,
            last_error: None,
        }
    }

    pub(crate) const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub(crate) fn role(&self) -> Option<Role> {
        self.principal.as_ref().map(Principal::role)
    }

    pub(crate) const fn loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) const fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the persisted principal, if any. Anything unreadable is logged
    /// and treated as being logged out.
    pub(crate) async fn restore(&mut self) -> Option<&Principal> {
        if self.restored {
            debug!("Session was already restored");
            return self.principal.as_ref();
        }

        match self.read_record().await {
            Ok(principal) => self.principal = principal,
            Err(e) => {
                warn!("Failed to load the saved session, so starting logged out: {}", e);
                self.principal = None;
                self.last_error = Some(format!("Failed to load user data: {e}"));
            }
        }

        self.restored = true;
        self.loading = false;
        self.principal.as_ref()
    }

    async fn read_record(&mut self) -> Result<Option<Principal>> {
        let user = self.storage.get(USER_KEY).await?;
        let role = self.storage.get(ROLE_KEY).await?;

        let (user, role) = match (user, role) {
            (Some(user), Some(role)) => (user, role),
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(error::Storage::HalfPresent(USER_KEY, ROLE_KEY).into()),
            (None, Some(_)) => return Err(error::Storage::HalfPresent(ROLE_KEY, USER_KEY).into()),
        };

        if user.trim().is_empty() {
            return Err(error::Storage::Empty(USER_KEY).into());
        }
        let role = role.parse::<Role>()?;
        match serde_json::from_str::<Value>(&user)? {
            Value::Object(identity) => Ok(Some(Principal::new(identity, role))),
            _ => Err(error::Conversion::NotAnObject(USER_KEY).into()),
        }
    }

    /// Records `identity` as logged in with `role`, replacing whoever was
    /// logged in before.
    pub(crate) async fn login(&mut self, identity: Identity, role: Role) -> Result<&Principal> {
        self.loading = true;
        self.last_error = None;

        let written = match serde_json::to_string(&identity) {
            Ok(user) => {
                self.storage
                    .set_all(&[(USER_KEY, user.as_str()), (ROLE_KEY, role.as_str())])
                    .await
            }
            Err(e) => Err(e.into()),
        };
        self.loading = false;

        match written {
            Ok(()) => Ok(&*self.principal.insert(Principal::new(identity, role))),
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Logs in against the backend with `credentials` and, on success, records
    /// the returned identity tagged with the credentials' role.
    pub(crate) async fn authenticate<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        credentials: &Credentials,
    ) -> Result<&Principal> {
        self.loading = true;
        self.last_error = None;
        let result = backend.login(credentials).await;
        self.loading = false;

        match result {
            Ok(mut identity) => {
                let role = credentials.role();
                let _previous = identity.insert(
                    ROLE_KEY.to_owned(),
                    Value::String(role.as_str().to_owned()),
                );
                self.login(identity, role).await
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub(crate) async fn logout(&mut self) -> Result<()> {
        if let Err(e) = self.storage.remove_all(&[USER_KEY, ROLE_KEY]).await {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.principal = None;
        Ok(())
    }

    /// Creates a backend account. This never logs anyone in.
    pub(crate) async fn register<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        registration: &Registration,
    ) -> Result<Value> {
        self.loading = true;
        self.last_error = None;
        let result = backend.register(registration).await;
        self.loading = false;

        if let Err(ref e) = result {
            self.last_error = Some(e.to_string());
        }
        result
    }

    /// Whether a principal is held in memory and storage still has a record
    /// for it. The storage check catches another process having logged out
    /// underneath us.
    pub(crate) async fn is_authenticated(&mut self) -> bool {
        self.principal.is_some() && self.storage_is_live().await
    }

    async fn storage_is_live(&mut self) -> bool {
        for key in [USER_KEY, ROLE_KEY] {
            match self.storage.get(key).await {
                Ok(Some(value)) if !value.trim().is_empty() => {}
                Ok(_) => return false,
                Err(e) => {
                    warn!("Could not read {:?} from session storage: {}", key, e);
                    return false;
                }
            }
        }
        true
    }

    pub(crate) async fn snapshot(&mut self) -> SessionState {
        SessionState {
            loading: self.loading(),
            authenticated: self.is_authenticated().await,
            role: self.role(),
        }
    }
}
