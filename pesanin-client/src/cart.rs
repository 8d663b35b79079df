//! Cart/session store
//!
//! Holds the table the customer scanned and the menu items picked so far.
//! Every mutator writes the whole session through to storage before it
//! returns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{MenuSnapshot, OrderItemCreate};

use crate::storage::{self, Persisted, SharedStorage, keys};

/// One distinct menu item in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub menu: MenuSnapshot,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartLine {
    /// `price * quantity` at the snapshot price
    pub fn subtotal(&self) -> Decimal {
        self.menu.price * Decimal::from(self.quantity)
    }
}

/// Cart lines in insertion order plus the bound table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub table_id: Option<String>,
}

/// Cart/session store
pub struct CartStore {
    storage: SharedStorage,
    session: CartSession,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Empty store; nothing is read from storage
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            session: CartSession::default(),
        }
    }

    /// Store restored from storage; a missing or corrupt blob yields an empty cart
    pub fn load(storage: SharedStorage) -> Self {
        let session = storage::read_json::<Persisted<CartSession>>(&*storage, keys::CART)
            .map(|p| p.state)
            .unwrap_or_default();

        tracing::debug!(
            lines = session.items.len(),
            table_id = ?session.table_id,
            "Cart restored"
        );

        Self { storage, session }
    }

    pub fn session(&self) -> &CartSession {
        &self.session
    }

    pub fn items(&self) -> &[CartLine] {
        &self.session.items
    }

    pub fn table_id(&self) -> Option<&str> {
        self.session.table_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.session.items.is_empty()
    }

    pub fn line(&self, menu_id: &str) -> Option<&CartLine> {
        self.session.items.iter().find(|l| l.menu.id == menu_id)
    }

    fn line_mut(&mut self, menu_id: &str) -> Option<&mut CartLine> {
        self.session.items.iter_mut().find(|l| l.menu.id == menu_id)
    }

    /// Bind the session to a table. Lines are left alone.
    pub fn bind_table(&mut self, table_id: impl Into<String>) {
        let table_id = table_id.into();
        tracing::debug!(table_id = %table_id, "Table bound");
        self.session.table_id = Some(table_id);
        self.persist();
    }

    /// Add `quantity` of `menu`.
    ///
    /// An existing line accumulates the quantity and keeps its own notes;
    /// `notes` only applies to a newly created line. A zero quantity is ignored.
    pub fn add_item(&mut self, menu: MenuSnapshot, quantity: u32, notes: Option<String>) {
        if quantity == 0 {
            tracing::debug!(menu_id = %menu.id, "Ignoring zero quantity add");
            return;
        }
        match self.line_mut(&menu.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                tracing::debug!(menu_id = %menu.id, quantity = line.quantity, "Cart line incremented");
            }
            None => {
                tracing::debug!(menu_id = %menu.id, quantity, "Cart line added");
                let notes = notes.filter(|n| !n.is_empty());
                self.session.items.push(CartLine {
                    menu,
                    quantity,
                    notes,
                });
            }
        }
        self.persist();
    }

    /// Remove the line for `menu_id`; absent ids are ignored
    pub fn remove_item(&mut self, menu_id: &str) {
        self.session.items.retain(|l| l.menu.id != menu_id);
        self.persist();
    }

    /// Set a line's quantity exactly. Zero or negative removes the line.
    pub fn update_quantity(&mut self, menu_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(menu_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(menu_id) {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Replace a line's notes; absent ids are ignored
    pub fn update_notes(&mut self, menu_id: &str, notes: impl Into<String>) {
        let notes = notes.into();
        if let Some(line) = self.line_mut(menu_id) {
            line.notes = Some(notes).filter(|n| !n.is_empty());
        }
        self.persist();
    }

    /// Drop every line and the table binding
    pub fn clear(&mut self) {
        self.session = CartSession::default();
        tracing::debug!("Cart cleared");
        self.persist();
    }

    /// Sum of `price * quantity` over all lines
    pub fn total(&self) -> Decimal {
        self.session.items.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities (not the number of distinct lines)
    pub fn item_count(&self) -> u64 {
        self.session.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Order lines for the checkout payload
    pub fn order_items(&self) -> Vec<OrderItemCreate> {
        self.session
            .items
            .iter()
            .map(|l| OrderItemCreate {
                menu_id: l.menu.id.clone(),
                quantity: l.quantity,
                notes: l.notes.clone(),
            })
            .collect()
    }

    fn persist(&self) {
        storage::write_json(&*self.storage, keys::CART, &Persisted::new(&self.session));
    }
}
