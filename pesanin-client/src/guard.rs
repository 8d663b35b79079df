//! Route guard for staff areas
//!
//! A guarded view asks the guard what to do on every render. Until the auth
//! store is hydrated the answer is always [`GuardDecision::Loading`], so a
//! session that is still being read from storage never bounces to login.

use shared::models::UserRole;

use crate::auth::AuthStore;
use crate::navigation::{NavigationMode, Navigator, routes};

/// What a guarded view should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Store not hydrated yet; show a neutral loading state
    Loading,
    /// Render the protected content
    Render,
    /// Not logged in; go to login and come back to `from` afterwards
    RedirectToLogin { from: String },
    /// Logged in with a role that may not see this area
    RedirectToUnauthorized,
}

/// Guard configuration for one area
#[derive(Debug, Clone)]
pub struct RouteGuard {
    require_auth: bool,
    allowed_roles: Option<Vec<UserRole>>,
}

impl RouteGuard {
    pub fn new(require_auth: bool) -> Self {
        Self {
            require_auth,
            allowed_roles: None,
        }
    }

    /// Staff back-office: any logged-in staff role
    pub fn admin() -> Self {
        Self::new(true).with_roles(UserRole::ALL)
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = UserRole>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    /// Decide for the view at `location`
    pub fn evaluate(&self, auth: &AuthStore, location: &str) -> GuardDecision {
        if !auth.is_hydrated() {
            return GuardDecision::Loading;
        }

        if self.require_auth && !auth.is_authenticated() {
            return GuardDecision::RedirectToLogin {
                from: location.to_string(),
            };
        }

        if let (Some(allowed), Some(role)) = (&self.allowed_roles, auth.role())
            && !allowed.contains(&role)
        {
            return GuardDecision::RedirectToUnauthorized;
        }

        GuardDecision::Render
    }

    /// Evaluate and perform any redirect. Returns the decision taken.
    pub fn enforce(&self, auth: &AuthStore, navigator: &dyn Navigator) -> GuardDecision {
        let location = navigator.current_path();
        let decision = self.evaluate(auth, &location);
        match &decision {
            GuardDecision::RedirectToLogin { from } => {
                tracing::debug!(from = %from, "Guard redirect to login");
                navigator.navigate(routes::LOGIN, NavigationMode::Replace);
            }
            GuardDecision::RedirectToUnauthorized => {
                navigator.navigate(routes::UNAUTHORIZED, NavigationMode::Replace);
            }
            GuardDecision::Loading | GuardDecision::Render => {}
        }
        decision
    }
}
