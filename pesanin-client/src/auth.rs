//! Auth store
//!
//! Holds the logged-in staff identity and bearer token, plus the hydration
//! gate. The persisted projection is `{user, token, isAuthenticated}`;
//! the hydration flag is never persisted and starts false on every launch.
//!
//! The token is mirrored into its own storage slot ([`keys::TOKEN`]) so the
//! HTTP client can read it without knowing this store's blob layout.

use serde::{Deserialize, Serialize};
use shared::models::{User, UserPatch, UserRole};

use crate::storage::{self, Persisted, SharedStorage, keys};

/// Hydration state machine. Moves `Unhydrated -> Hydrated` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    #[default]
    Unhydrated,
    Hydrated,
}

/// Persisted slice of the auth store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthSession {
    /// Enforce `is_authenticated <=> user && token`
    fn normalized(self) -> Self {
        match (self.user, self.token) {
            (Some(user), Some(token)) if self.is_authenticated => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
            },
            _ => Self::default(),
        }
    }
}

type HydratedCallback = Box<dyn FnOnce() + Send + Sync>;

/// Auth store
pub struct AuthStore {
    storage: SharedStorage,
    session: AuthSession,
    hydration: Hydration,
    on_hydrated: Vec<HydratedCallback>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("user", &self.session.user)
            .field("is_authenticated", &self.session.is_authenticated)
            .field("hydration", &self.hydration)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Fresh, unhydrated, logged-out store
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            session: AuthSession::default(),
            hydration: Hydration::Unhydrated,
            on_hydrated: Vec::new(),
        }
    }

    /// Load the persisted projection into memory, then mark the store hydrated.
    ///
    /// A restored token is written back into the token slot. A blob that
    /// claims to be authenticated without both user and token loads as
    /// logged out.
    pub fn restore(&mut self) {
        let persisted = storage::read_json::<Persisted<AuthSession>>(&*self.storage, keys::USER)
            .map(|p| p.state)
            .unwrap_or_default();

        self.session = persisted.normalized();

        if let Some(token) = &self.session.token {
            storage::write_json(&*self.storage, keys::TOKEN, token);
        }

        tracing::info!(
            authenticated = self.session.is_authenticated,
            user = ?self.session.user.as_ref().map(|u| &u.email),
            "Auth session restored"
        );

        self.mark_hydrated();
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn role(&self) -> Option<UserRole> {
        self.session.user.as_ref().map(|u| u.role)
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydration == Hydration::Hydrated
    }

    /// Run `callback` once the store is hydrated (immediately if it already is)
    pub fn on_hydrated(&mut self, callback: impl FnOnce() + Send + Sync + 'static) {
        if self.is_hydrated() {
            callback();
        } else {
            self.on_hydrated.push(Box::new(callback));
        }
    }

    /// Enter `Hydrated`. Repeated calls are no-ops; listeners fire once.
    pub fn mark_hydrated(&mut self) {
        if self.is_hydrated() {
            return;
        }
        self.hydration = Hydration::Hydrated;
        tracing::debug!(listeners = self.on_hydrated.len(), "Auth store hydrated");
        for callback in self.on_hydrated.drain(..) {
            callback();
        }
    }

    /// Store a fresh login. Also mirrors the token into the token slot.
    pub fn set_auth(&mut self, user: User, token: impl Into<String>) {
        let token = token.into();
        storage::write_json(&*self.storage, keys::TOKEN, &token);

        tracing::info!(user = %user.email, role = %user.role, "Logged in");
        self.session = AuthSession {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        };
        self.persist();
    }

    /// Drop identity and token, including the token slot
    pub fn logout(&mut self) {
        storage::remove(&*self.storage, keys::TOKEN);

        if let Some(user) = &self.session.user {
            tracing::info!(user = %user.email, "Logged out");
        }
        self.session = AuthSession::default();
        self.persist();
    }

    /// Shallow-merge into the current user; ignored when logged out
    pub fn update_user(&mut self, patch: UserPatch) {
        let Some(user) = self.session.user.as_mut() else {
            return;
        };
        user.merge(patch);
        self.persist();
    }

    fn persist(&self) {
        storage::write_json(&*self.storage, keys::USER, &Persisted::new(&self.session));
    }
}
