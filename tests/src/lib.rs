//! Backend fixtures shared by the integration suites: wire-format payloads
//! and a mock server wired to a real [`RestaurantClient`].

use infrastructure::{Config, RestaurantClient};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub const TOAST_TTL: Duration = Duration::from_secs(5);

pub struct Backend {
    pub server: MockServer,
}

impl Backend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> Config {
        Config::default().with_api_base_url(format!("{}/api", self.server.uri()))
    }

    pub fn client(&self) -> RestaurantClient {
        RestaurantClient::new(&self.config()).expect("client builds")
    }
}

pub fn menu_item(id: i64, name: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "nome": name,
        "descricao": format!("{} da casa", name),
        "preco": price,
        "categoria": category,
        "disponivel": true,
        "imagem_url": null
    })
}

/// Drinks listed before starters, the way the server orders them.
pub fn menu() -> Value {
    json!({
        "success": true,
        "cardapio": {
            "bebida": [menu_item(1, "Água", 5.0, "bebida"), menu_item(2, "Suco", 8.5, "bebida")],
            "entrada": [menu_item(3, "Bruschetta", 18.9, "entrada")]
        }
    })
}

pub fn table(id: i64, number: u32, status: &str, customer: Option<&str>) -> Value {
    json!({
        "id": id,
        "numero": number,
        "status": status,
        "cliente_nome": customer,
        "created_at": "2024-03-09T12:00:00",
        "updated_at": "2024-03-09T12:30:00"
    })
}

pub fn order(id: i64, table_id: i64, status: &str, lines: Vec<Value>, total: f64) -> Value {
    json!({
        "id": id,
        "mesa_id": table_id,
        "cliente_nome": "Ana",
        "status": status,
        "total": total,
        "observacoes": null,
        "created_at": "2024-03-09T12:00:00",
        "updated_at": null,
        "itens": lines
    })
}

pub fn order_line(id: i64, item: Value, quantity: u32) -> Value {
    let price = item["preco"].as_f64().unwrap_or_default();
    json!({
        "id": id,
        "item_cardapio_id": item["id"],
        "quantidade": quantity,
        "preco_unitario": price,
        "subtotal": price * f64::from(quantity),
        "observacoes": null,
        "item_cardapio": item
    })
}

pub fn session_started(table_id: i64, number: u32, order_id: i64) -> Value {
    json!({
        "success": true,
        "mesa": table(table_id, number, "aberta", Some("Ana")),
        "pedido": order(order_id, table_id, "aberto", vec![], 0.0)
    })
}

pub fn failure(message: &str) -> Value {
    json!({"success": false, "error": message})
}
