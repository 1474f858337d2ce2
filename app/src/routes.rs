use std::fmt;

use log::*;

use infra::persistence::Storage;

use crate::admin::AdminGate;

pub const ACCESS_DENIED_ALERT: &str = "Access denied. Admins only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Menu,
    Admin,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded {
    Allow(Route),
    Redirect { to: Route, alert: &'static str },
}

impl Route {
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.split(|c| c == '?' || c == '#').next().unwrap_or("");
        match trimmed.trim_end_matches('/') {
            "" => Route::Home,
            "/menu" => Route::Menu,
            "/admin" => Route::Admin,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Menu => "/menu",
            Route::Admin => "/admin",
            Route::NotFound => "*",
        }
    }

    pub fn is_admin_only(&self) -> bool {
        *self == Route::Admin
    }
}

impl fmt::Display for Route {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.path())
    }
}

/// Admin-only routes bounce anonymous visitors home with an alert.
pub fn guard<S: Storage>(route: Route, gate: &AdminGate<S>) -> Guarded {
    if route.is_admin_only() && !gate.is_authenticated() {
        info!("Redirecting anonymous visitor from {}", route);
        Guarded::Redirect {
            to: Route::Home,
            alert: ACCESS_DENIED_ALERT,
        }
    } else {
        Guarded::Allow(route)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use infra::persistence::MemoryStorage;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/menu"), Route::Menu);
        assert_eq!(Route::from_path("/menu/"), Route::Menu);
        assert_eq!(Route::from_path("/admin?tab=items"), Route::Admin);
        assert_eq!(Route::from_path("/orders"), Route::NotFound);
        assert_eq!(Route::from_path("/menu/extra"), Route::NotFound);
    }

    #[test]
    fn paths_resolve_back_to_their_route() {
        for route in &[Route::Home, Route::Menu, Route::Admin] {
            assert_eq!(Route::from_path(route.path()), *route);
        }
    }

    #[test]
    fn anonymous_visitors_are_redirected_from_admin() {
        let gate = AdminGate::open(MemoryStorage::new());

        assert_eq!(
            guard(Route::Admin, &gate),
            Guarded::Redirect {
                to: Route::Home,
                alert: ACCESS_DENIED_ALERT
            }
        );
        assert_eq!(guard(Route::Menu, &gate), Guarded::Allow(Route::Menu));
        assert_eq!(
            guard(Route::NotFound, &gate),
            Guarded::Allow(Route::NotFound)
        );
    }

    #[test]
    fn admins_reach_admin() {
        let mut gate = AdminGate::open(MemoryStorage::new());
        let (next, _) = gate.login("zaykaaAdmin123").expect("login");

        assert_eq!(guard(next, &gate), Guarded::Allow(Route::Admin));
    }
}
