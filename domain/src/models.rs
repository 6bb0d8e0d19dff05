use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: Decimal,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "disponivel", default = "default_true")]
    pub available: bool,
    #[serde(rename = "imagem_url", default)]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "aberto")]
    Open,
    #[serde(rename = "fechado")]
    Closed,
    #[serde(rename = "pago")]
    Paid,
}

impl OrderStatus {
    /// Orders the dashboard still cares about: not yet paid.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::Closed)
    }
}

/// One line of a backend order. Prices are frozen at the moment the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    #[serde(rename = "item_cardapio_id")]
    pub menu_item_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "preco_unitario")]
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "item_cardapio", default)]
    pub menu_item: Option<MenuItem>,
}

impl OrderLine {
    /// Name of the ordered item, falling back to its id when the backend
    /// did not embed the menu entry.
    pub fn display_name(&self) -> String {
        match &self.menu_item {
            Some(item) => item.name.clone(),
            None => format!("Item #{}", self.menu_item_id),
        }
    }
}

/// Backend order. The client only ever holds a cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "mesa_id")]
    pub table_id: i64,
    #[serde(rename = "cliente_nome", default)]
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(rename = "itens", default)]
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    #[serde(rename = "livre")]
    Free,
    #[serde(rename = "aberta")]
    Occupied,
    #[serde(rename = "aguardando_pagamento")]
    AwaitingPayment,
}

impl TableStatus {
    pub fn label(self) -> &'static str {
        match self {
            TableStatus::Free => "Livre",
            TableStatus::Occupied => "Ocupada",
            TableStatus::AwaitingPayment => "Aguardando Pagamento",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    #[serde(rename = "numero")]
    pub number: u32,
    pub status: TableStatus,
    #[serde(rename = "cliente_nome", default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// Only filled by the admin listing.
    #[serde(rename = "pedido_ativo", default)]
    pub active_order: Option<Order>,
}

/// Dashboard counters. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total_mesas", default)]
    pub total_tables: u32,
    #[serde(rename = "mesas_livres", default)]
    pub free_tables: u32,
    #[serde(rename = "mesas_ocupadas", default)]
    pub occupied_tables: u32,
    #[serde(rename = "mesas_aguardando_pagamento", default)]
    pub awaiting_payment_tables: u32,
    #[serde(rename = "pedidos_hoje", default)]
    pub orders_today: u32,
}
