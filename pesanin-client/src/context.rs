//! Application context
//!
//! Owns the two stores, the storage backend, the navigator and the API
//! client, and wires them the way every front-end needs: the API client
//! shares the auth store with the 401 interceptor, flows share the cart.

use std::sync::Arc;

use shared::models::{MenuSnapshot, Order, User, UserPatch};
use tokio::sync::RwLock;

use crate::api::OrderListQuery;
use crate::auth::AuthStore;
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::error::{CheckoutError, ClientError, ClientResult};
use crate::flows::{self, OrderGateway, ScanFlow, ScanOutcome};
use crate::guard::{GuardDecision, RouteGuard};
use crate::http::ApiClient;
use crate::navigation::{NavigationMode, Navigator, routes};
use crate::poll::{self, Poller};
use crate::storage::SharedStorage;

pub struct AppContext {
    config: ClientConfig,
    storage: SharedStorage,
    auth: Arc<RwLock<AuthStore>>,
    cart: Arc<RwLock<CartStore>>,
    navigator: Arc<dyn Navigator>,
    api: ApiClient,
}

impl AppContext {
    /// Wire the context. The cart is loaded eagerly; the auth store stays
    /// unhydrated until [`Self::restore`].
    pub fn new(
        config: ClientConfig,
        storage: SharedStorage,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let auth = Arc::new(RwLock::new(AuthStore::new(storage.clone())));
        let cart = Arc::new(RwLock::new(CartStore::load(storage.clone())));
        let api = ApiClient::new(&config, storage.clone(), auth.clone(), navigator.clone())?;

        Ok(Self {
            config,
            storage,
            auth,
            cart,
            navigator,
            api,
        })
    }

    /// [`Self::new`] followed by [`Self::restore`]
    pub async fn bootstrap(
        config: ClientConfig,
        storage: SharedStorage,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let ctx = Self::new(config, storage, navigator)?;
        ctx.restore().await;
        Ok(ctx)
    }

    /// Restore the persisted auth session and open the hydration gate.
    ///
    /// Safe to call again: later calls reload the session, the gate stays open.
    pub async fn restore(&self) {
        self.auth.write().await.restore();
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &Arc<RwLock<AuthStore>> {
        &self.auth
    }

    pub fn cart(&self) -> &Arc<RwLock<CartStore>> {
        &self.cart
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    // ========== Staff session ==========

    /// Log in and go back to `from`, or to the dashboard
    pub async fn login(&self, email: &str, password: &str, from: Option<&str>) -> ClientResult<User> {
        let response = match self.api.login(email, password).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(email, error = %e, "Login failed");
                return Err(e);
            }
        };

        let user = response.user.clone();
        self.auth.write().await.set_auth(response.user, response.token);

        let target = from
            .filter(|path| *path != routes::LOGIN)
            .unwrap_or(routes::ADMIN_DASHBOARD);
        self.navigator.navigate(target, NavigationMode::Replace);
        Ok(user)
    }

    /// User-initiated logout
    pub async fn logout(&self) {
        self.auth.write().await.logout();
        self.navigator.navigate(routes::LOGIN, NavigationMode::Push);
    }

    /// Re-read the profile from the server and merge it into the auth store
    pub async fn refresh_profile(&self) -> ClientResult<User> {
        let user = self.api.profile().await?;
        self.auth.write().await.update_user(UserPatch::from(user.clone()));
        Ok(user)
    }

    /// Run `guard` against the current location, redirecting if needed
    pub async fn guard(&self, guard: &RouteGuard) -> GuardDecision {
        let auth = self.auth.read().await;
        guard.enforce(&auth, self.navigator.as_ref())
    }

    // ========== Customer ==========

    /// Bind the cart to a scanned table
    pub async fn scan_table(&self, table_id: &str) -> ScanOutcome {
        ScanFlow::new(&self.api, &self.cart, self.navigator.as_ref())
            .with_redirect_delay(self.config.scan_redirect_delay)
            .run(table_id)
            .await
    }

    /// Look up a menu item and add it to the cart.
    ///
    /// Fails without touching the cart when the quantity is zero or the item
    /// is not available.
    pub async fn add_to_cart(
        &self,
        menu_id: &str,
        quantity: u32,
        notes: Option<String>,
    ) -> ClientResult<MenuSnapshot> {
        if quantity == 0 {
            return Err(ClientError::Validation("Jumlah minimal 1".into()));
        }

        let menu = self.api.public_menu(menu_id).await?;
        if !menu.is_available {
            return Err(ClientError::Validation(format!("{} sedang tidak tersedia", menu.name)));
        }

        let snapshot = MenuSnapshot::from(menu);
        self.cart
            .write()
            .await
            .add_item(snapshot.clone(), quantity, notes);
        Ok(snapshot)
    }

    pub async fn checkout(&self, notes: Option<String>) -> Result<Order, CheckoutError> {
        flows::checkout(&self.api, &self.cart, self.navigator.as_ref(), notes).await
    }

    fn gateway(&self) -> Arc<dyn OrderGateway> {
        Arc::new(self.api.clone())
    }

    /// Poll one order at the order-status interval
    pub fn watch_order(&self, order_id: &str) -> Poller<Order> {
        poll::watch_order(self.gateway(), order_id, self.config.order_status_interval)
    }

    /// Poll the orders of the bound table; `None` when no table is bound
    pub async fn watch_table_orders(&self) -> Option<Poller<Vec<Order>>> {
        let table_id = self.cart.read().await.table_id()?.to_string();
        Some(poll::watch_table_orders(
            self.gateway(),
            table_id,
            self.config.order_list_interval,
        ))
    }

    /// Poll the staff order list
    pub fn watch_orders(&self, query: OrderListQuery) -> Poller<Vec<Order>> {
        let api = self.api.clone();
        Poller::spawn("orders", self.config.order_list_interval, move || {
            let api = api.clone();
            async move { api.orders(&query).await.map(|page| page.data) }
        })
    }
}
