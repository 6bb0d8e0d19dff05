use crate::cart::Cart;
use crate::catalog::{Catalog, CategoryFilter};
use crate::models::{MenuItem, Order, Table};

/// Screens of the ordering flow.
///
/// Welcome -> Menu -> (OrderConfirmed <-> Menu) -> BillRequested -> Welcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Welcome,
    Menu,
    OrderConfirmed,
    BillRequested,
}

/// A customer seated at a table. Lives only in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub table_number: u32,
    pub customer_name: String,
    pub table: Table,
    pub order: Option<Order>,
}

impl Session {
    pub fn new(table_number: u32, customer_name: impl Into<String>, table: Table, order: Order) -> Self {
        Self {
            table_number,
            customer_name: customer_name.into(),
            table,
            order: Some(order),
        }
    }
}

/// Everything the ordering screens are rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderingState {
    pub screen: Screen,
    pub session: Option<Session>,
    pub catalog: Catalog,
    pub filter: CategoryFilter,
    pub cart: Cart,
}

impl OrderingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item_id` to the cart. `None` when the catalog does
    /// not know the id, in which case nothing changes.
    pub fn add_to_cart(&mut self, item_id: i64) -> Option<MenuItem> {
        let item = self.catalog.find(item_id)?.clone();
        self.cart.add(&item);
        Some(item)
    }

    /// Back to a blank welcome screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
