// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::role::Role;

pub(crate) const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What the authorizer needs to know about the session at the moment of a
/// navigation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionState {
    pub(crate) loading: bool,
    pub(crate) authenticated: bool,
    pub(crate) role: Option<Role>,
}

/// The roles allowed onto a protected page. An empty set lets in any
/// authenticated principal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RouteGuard {
    allowed_roles: BTreeSet<Role>,
}

impl RouteGuard {
    #[cfg(test)]
    pub(crate) fn any() -> Self {
        Self::default()
    }

    pub(crate) fn only<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self {
            allowed_roles: roles.into_iter().collect(),
        }
    }

    pub(crate) const fn allowed_roles(&self) -> &BTreeSet<Role> {
        &self.allowed_roles
    }

    pub(crate) fn permits(&self, role: Option<Role>) -> bool {
        self.allowed_roles.is_empty() || role.is_some_and(|r| self.allowed_roles.contains(&r))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    /// The session is still being restored; show a loading indicator.
    Pending,
    Grant,
    /// Nobody is logged in. `from` is the path that was attempted.
    RedirectLogin {
        to: &'static str,
        from: String,
    },
    RedirectUnauthorized,
}

/// Picks the login page for an attempted path by its section.
pub(crate) fn login_path_for(path: &str) -> &'static str {
    [Role::Tutor, Role::Admin]
        .into_iter()
        .find(|role| path.starts_with(role.section()))
        .unwrap_or(Role::Student)
        .login_path()
}

pub(crate) fn authorize(state: &SessionState, guard: &RouteGuard, path: &str) -> Decision {
    if state.loading {
        Decision::Pending
    } else if !state.authenticated {
        Decision::RedirectLogin {
            to: login_path_for(path),
            from: path.to_owned(),
        }
    } else if !guard.permits(state.role) {
        Decision::RedirectUnauthorized
    } else {
        Decision::Grant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn logged_in(role: Option<Role>) -> SessionState {
        SessionState {
            loading: false,
            authenticated: true,
            role,
        }
    }

    const LOGGED_OUT: SessionState = SessionState {
        loading: false,
        authenticated: false,
        role: None,
    };

    fn admin_only() -> RouteGuard {
        RouteGuard::only([Role::Admin])
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = SessionState {
            loading: true,
            ..LOGGED_OUT
        };
        assert_eq!(authorize(&state, &admin_only(), "/admin/dashboard"), Decision::Pending);

        let state = SessionState {
            loading: true,
            ..logged_in(Some(Role::Student))
        };
        assert_eq!(authorize(&state, &admin_only(), "/admin/dashboard"), Decision::Pending);
    }

    #[test]
    fn logged_out_goes_to_the_section_login() {
        for (path, to) in [
            ("/unrelated", "/student/login"),
            ("/student/home", "/student/login"),
            ("/tutor/bookings", "/tutor/login"),
            ("/tutor", "/tutor/login"),
            ("/admin/dashboard", "/admin/login"),
            ("", "/student/login"),
        ] {
            assert_eq!(
                authorize(&LOGGED_OUT, &admin_only(), path),
                Decision::RedirectLogin {
                    to,
                    from: path.to_owned()
                },
            );
        }
    }

    #[test]
    fn principal_without_live_storage_is_logged_out() {
        let state = SessionState {
            authenticated: false,
            ..logged_in(Some(Role::Admin))
        };
        assert!(matches!(
            authorize(&state, &admin_only(), "/admin/dashboard"),
            Decision::RedirectLogin { to: "/admin/login", .. }
        ));
    }

    #[test]
    fn wrong_role_is_unauthorized() {
        for role in [Role::Student, Role::Tutor] {
            assert_eq!(
                authorize(&logged_in(Some(role)), &admin_only(), "/admin/dashboard"),
                Decision::RedirectUnauthorized,
            );
        }
    }

    #[test]
    fn missing_role_never_matches_a_restricted_guard() {
        assert_eq!(
            authorize(&logged_in(None), &admin_only(), "/admin/dashboard"),
            Decision::RedirectUnauthorized,
        );
    }

    #[test]
    fn matching_role_is_granted() {
        assert_eq!(
            authorize(&logged_in(Some(Role::Admin)), &admin_only(), "/admin/dashboard"),
            Decision::Grant,
        );
        let guard = RouteGuard::only([Role::Tutor, Role::Admin]);
        assert_eq!(
            authorize(&logged_in(Some(Role::Tutor)), &guard, "/tutor/dashboard"),
            Decision::Grant,
        );
    }

    #[test]
    fn empty_guard_admits_any_authenticated_principal() {
        let guard = RouteGuard::any();
        assert!(guard.allowed_roles().is_empty());
        for role in Role::ALL.map(Some).into_iter().chain([None]) {
            assert_eq!(authorize(&logged_in(role), &guard, "/anything"), Decision::Grant);
        }
        assert!(matches!(
            authorize(&LOGGED_OUT, &guard, "/anything"),
            Decision::RedirectLogin { .. }
        ));
    }
}
