//! The HTTP seam. Services depend on these traits, never on reqwest.

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::models::{Order, Statistics, Table};
use async_trait::async_trait;

/// Table and order returned when a session starts.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub table: Table,
    pub order: Order,
}

/// Result of asking for the bill.
#[derive(Debug, Clone)]
pub struct BillClosure {
    pub order: Order,
    pub table: Option<Table>,
}

#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub message: Option<String>,
    pub table: Option<Table>,
}

#[async_trait]
pub trait OrderingApi: Send + Sync {
    async fn start_session(
        &self,
        table_number: u32,
        customer_name: &str,
    ) -> Result<SessionStart, ApiError>;

    async fn fetch_catalog(&self) -> Result<Catalog, ApiError>;

    async fn add_item(&self, order_id: i64, item_id: i64, quantity: u32) -> Result<Order, ApiError>;

    async fn close_order(&self, order_id: i64) -> Result<BillClosure, ApiError>;

    async fn close_table(&self, table_id: i64) -> Result<Table, ApiError>;
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn fetch_statistics(&self) -> Result<Statistics, ApiError>;

    async fn fetch_tables(&self) -> Result<Vec<Table>, ApiError>;

    async fn confirm_payment(&self, table_number: u32) -> Result<PaymentConfirmation, ApiError>;
}
