// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use once_cell::sync::Lazy;
use tabled::Tabled;

use crate::{
    guard::{self, Decision, RouteGuard, SessionState},
    role::Role,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Page {
    Home,
    About,
    Contact,
    Unauthorized,
    NotFound,
    StudentLogin,
    StudentRegistration,
    TutorLogin,
    AdminLogin,
    StudentHome,
    StudentDashboard,
    StudentBookings,
    StudentFindTutors,
    StudentProfile,
    TutorProfile,
    TutorBookings,
    AdminDashboard,
    TutorManagement,
}

impl Page {
    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Contact => "Contact",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::StudentLogin => "Student Login",
            Self::StudentRegistration => "Student Registration",
            Self::TutorLogin => "Tutor Login",
            Self::AdminLogin => "Admin Login",
            Self::StudentHome => "Student Home",
            Self::StudentDashboard => "Student Dashboard",
            Self::StudentBookings => "My Bookings",
            Self::StudentFindTutors => "Find Tutors",
            Self::StudentProfile => "Student Profile",
            Self::TutorProfile => "Tutor Profile",
            Self::TutorBookings => "Tutor Bookings",
            Self::AdminDashboard => "Admin Dashboard",
            Self::TutorManagement => "Tutor Management",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Clone, Debug, Tabled)]
pub(crate) struct Route {
    #[tabled(rename = "Path")]
    pub(crate) path: &'static str,
    #[tabled(rename = "Page")]
    pub(crate) page: Page,
    /// `None` for pages anyone may open.
    #[tabled(rename = "Access", display_with = "Self::format_guard")]
    pub(crate) guard: Option<RouteGuard>,
}

impl Route {
    fn public(path: &'static str, page: Page) -> Self {
        Self {
            path,
            page,
            guard: None,
        }
    }

    fn guarded(path: &'static str, page: Page, role: Role) -> Self {
        Self {
            path,
            page,
            guard: Some(RouteGuard::only([role])),
        }
    }

    fn format_guard(guard: &Option<RouteGuard>) -> String {
        match guard.as_ref() {
            None => "Public".to_owned(),
            Some(g) if g.allowed_roles().is_empty() => "Any signed-in user".to_owned(),
            Some(g) => g
                .allowed_roles()
                .iter()
                .map(|role| role.title())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub(crate) static ROUTES: Lazy<Vec<Route>> = Lazy::new(|| {
    vec![
        Route::public("/", Page::Home),
        Route::public("/about", Page::About),
        Route::public("/contact", Page::Contact),
        Route::public(guard::UNAUTHORIZED_PATH, Page::Unauthorized),
        Route::public(Role::Student.login_path(), Page::StudentLogin),
        Route::public("/student/register", Page::StudentRegistration),
        Route::guarded("/student/home", Page::StudentHome, Role::Student),
        Route::guarded("/student/dashboard", Page::StudentDashboard, Role::Student),
        Route::guarded("/student/bookings", Page::StudentBookings, Role::Student),
        Route::guarded("/student/search-tutors", Page::StudentFindTutors, Role::Student),
        Route::guarded("/student/profile", Page::StudentProfile, Role::Student),
        Route::public(Role::Tutor.login_path(), Page::TutorLogin),
        Route::guarded("/tutor/dashboard", Page::TutorProfile, Role::Tutor),
        Route::guarded("/tutor/bookings", Page::TutorBookings, Role::Tutor),
        Route::public(Role::Admin.login_path(), Page::AdminLogin),
        Route::guarded("/admin/dashboard", Page::AdminDashboard, Role::Admin),
        Route::guarded("/admin/tutor-management", Page::TutorManagement, Role::Admin),
    ]
});

/// The outcome of opening a path, as the presentation layer should act on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Navigation {
    Render(Page),
    Loading,
    Redirect {
        to: &'static str,
        from: Option<String>,
    },
}

/// Strips the query string, fragment and any trailing slashes.
fn normalize(path: &str) -> &str {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub(crate) fn resolve(path: &str) -> Option<&'static Route> {
    let path = normalize(path);
    ROUTES.iter().find(|route| route.path == path)
}

pub(crate) fn navigate(state: &SessionState, path: &str) -> Navigation {
    let Some(route) = resolve(path) else {
        return Navigation::Render(Page::NotFound);
    };
    let Some(route_guard) = route.guard.as_ref() else {
        return Navigation::Render(route.page);
    };

    match guard::authorize(state, route_guard, normalize(path)) {
        Decision::Pending => Navigation::Loading,
        Decision::Grant => Navigation::Render(route.page),
        Decision::RedirectLogin { to, from } => Navigation::Redirect {
            to,
            from: Some(from),
        },
        Decision::RedirectUnauthorized => Navigation::Redirect {
            to: guard::UNAUTHORIZED_PATH,
            from: None,
        },
    }
}

/// Where to go after `role` has logged in, given the path the login redirect
/// came from.
pub(crate) fn resume_path(role: Role, from: Option<&str>) -> &'static str {
    from.and_then(resolve)
        .filter(|route| {
            route
                .guard
                .as_ref()
                .is_some_and(|g| g.permits(Some(role)))
        })
        .map_or_else(|| role.home_path(), |route| route.path)
}
