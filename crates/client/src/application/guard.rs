//! Route guard - gates the protected subtree on session state.

use crate::application::session::{SessionState, SessionStore};

/// What the router should do with a request for a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected subtree.
    Allow,
    /// Send the user to the login entry point.
    RedirectToLogin,
    /// Hydration has not finished; render nothing yet.
    ///
    /// Redirecting here would bounce a signed-in user to login on
    /// every reload.
    Wait,
}

/// Pure decision over a session state.
pub fn decide(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Unknown => RouteDecision::Wait,
        SessionState::LoggedOut => RouteDecision::RedirectToLogin,
        SessionState::Active(_) => RouteDecision::Allow,
    }
}

/// Guard bound to a session store handle.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self) -> RouteDecision {
        decide(&self.session.state())
    }
}
