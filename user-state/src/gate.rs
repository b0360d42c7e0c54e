use crate::session::is_signed_in;
use kv_storage::KeyValueStorage;

/// Whether a page is reachable without authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Where the gate sends a misplaced visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
}

impl Redirect {
    pub fn target(self) -> &'static str {
        match self {
            Redirect::Login => "/login/",
            Redirect::Dashboard => "/dashboard/",
        }
    }
}

/// Result of the once-per-page-load gate check. `Redirect` aborts the
/// rest of page initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Proceed,
    Redirect(Redirect),
}

const PUBLIC_ROUTES: &[&str] = &["/login", "/register"];

/// Canonical form of a request path: lower-case, no trailing slashes,
/// an optional `.html` suffix on the final segment stripped.
pub fn normalize_route_path(pathname: &str) -> String {
    let raw = pathname.to_lowercase();
    let raw = raw.trim_end_matches('/');
    if raw.is_empty() {
        return "/".to_owned();
    }

    let last_segment = raw
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("");
    if let Some(stem) = last_segment.strip_suffix(".html") {
        return format!("/{}", stem);
    }

    raw.to_owned()
}

pub fn classify_route(pathname: &str) -> RouteClass {
    if PUBLIC_ROUTES.contains(&normalize_route_path(pathname).as_str()) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

/// The 2-state redirect machine: signed-out visitors only reach public
/// routes, signed-in visitors never see them.
pub fn evaluate_gate(signed_in: bool, pathname: &str) -> GateOutcome {
    match (signed_in, classify_route(pathname)) {
        (false, RouteClass::Protected) => {
            GateOutcome::Redirect(Redirect::Login)
        }
        (true, RouteClass::Public) => {
            GateOutcome::Redirect(Redirect::Dashboard)
        }
        _ => GateOutcome::Proceed,
    }
}

/// Gate check against the stored session. Runs before any page state is
/// rendered, so a protected page never flashes for a signed-out visitor.
pub fn enforce_access<S: KeyValueStorage>(
    store: &S,
    pathname: &str,
) -> GateOutcome {
    evaluate_gate(is_signed_in(store), pathname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_route_path() {
        assert_eq!(normalize_route_path("/dashboard/"), "/dashboard");
        assert_eq!(normalize_route_path("/Dashboard///"), "/dashboard");
        assert_eq!(normalize_route_path("/register.html"), "/register");
        assert_eq!(
            normalize_route_path("/templates/login.html"),
            "/login"
        );
        assert_eq!(normalize_route_path("/"), "/");
        assert_eq!(normalize_route_path(""), "/");
    }

    #[test]
    fn test_signed_out_protected_redirects_to_login() {
        let outcome = evaluate_gate(false, "/dashboard");
        assert_eq!(outcome, GateOutcome::Redirect(Redirect::Login));
        if let GateOutcome::Redirect(redirect) = outcome {
            assert_eq!(redirect.target(), "/login/");
        }
        // The landing page is protected too.
        assert_eq!(
            evaluate_gate(false, "/"),
            GateOutcome::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn test_signed_in_public_redirects_to_dashboard() {
        assert_eq!(
            evaluate_gate(true, "/register"),
            GateOutcome::Redirect(Redirect::Dashboard)
        );
        assert_eq!(
            evaluate_gate(true, "/register.html"),
            GateOutcome::Redirect(Redirect::Dashboard)
        );
        assert_eq!(
            evaluate_gate(true, "/Login/"),
            GateOutcome::Redirect(Redirect::Dashboard)
        );
    }

    #[test]
    fn test_matching_states_proceed() {
        assert_eq!(evaluate_gate(true, "/dashboard"), GateOutcome::Proceed);
        assert_eq!(evaluate_gate(false, "/login"), GateOutcome::Proceed);
        assert_eq!(
            evaluate_gate(false, "/register/"),
            GateOutcome::Proceed
        );
    }
}
