use crate::config::Config;
use crate::envelope;
use async_trait::async_trait;
use domain::gateway::{AdminApi, BillClosure, OrderingApi, PaymentConfirmation, SessionStart};
use domain::{ApiError, Catalog, Order, Statistics, Table};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use shared::telemetry::Telemetry;
use shared::types::Result;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Serialize)]
struct StartSessionRequest<'a> {
    cliente_nome: &'a str,
}

#[derive(Serialize)]
struct AddItemRequest {
    item_cardapio_id: i64,
    quantidade: u32,
}

/// reqwest-backed client for the restaurant API.
#[derive(Clone)]
pub struct RestaurantClient {
    client: Arc<Client>,
    base_url: String,
}

impl RestaurantClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends the request and returns status plus raw body.
    async fn send(&self, request: RequestBuilder) -> std::result::Result<(u16, String), ApiError> {
        let timer = Telemetry::new();
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "request failed before a response arrived");
            ApiError::transport(err)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;
        debug!(status, elapsed_ms = timer.elapsed_ms(), "response received");
        Ok((status, body))
    }

    async fn get_envelope(&self, path: &str, fallback: &str) -> std::result::Result<Value, ApiError> {
        let (status, body) = self.send(self.client.get(self.url(path))).await?;
        envelope::open(status, &body, fallback)
    }

    async fn post_envelope<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> std::result::Result<Value, ApiError> {
        let (status, text) = self.send(self.post(path, body)).await?;
        envelope::open(status, &text, fallback)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> RequestBuilder {
        let request = self.client.post(self.url(path));
        match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        }
    }
}

#[async_trait]
impl OrderingApi for RestaurantClient {
    #[instrument(skip(self))]
    async fn start_session(
        &self,
        table_number: u32,
        customer_name: &str,
    ) -> std::result::Result<SessionStart, ApiError> {
        let request = StartSessionRequest {
            cliente_nome: customer_name,
        };
        let mut value = self
            .post_envelope(
                &format!("mesas/{}/iniciar", table_number),
                Some(&request),
                "Erro ao iniciar sessão",
            )
            .await?;
        Ok(SessionStart {
            table: envelope::field(&mut value, "mesa")?,
            order: envelope::field(&mut value, "pedido")?,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> std::result::Result<Catalog, ApiError> {
        let mut value = self.get_envelope("cardapio", "Erro ao carregar cardápio").await?;
        envelope::field(&mut value, "cardapio")
    }

    #[instrument(skip(self))]
    async fn add_item(
        &self,
        order_id: i64,
        item_id: i64,
        quantity: u32,
    ) -> std::result::Result<Order, ApiError> {
        let request = AddItemRequest {
            item_cardapio_id: item_id,
            quantidade: quantity,
        };
        let mut value = self
            .post_envelope(
                &format!("pedidos/{}/adicionar-item", order_id),
                Some(&request),
                "Erro ao adicionar item",
            )
            .await?;
        envelope::field(&mut value, "pedido")
    }

    #[instrument(skip(self))]
    async fn close_order(&self, order_id: i64) -> std::result::Result<BillClosure, ApiError> {
        let mut value = self
            .post_envelope::<()>(&format!("pedidos/{}/fechar", order_id), None, "Erro ao fechar conta")
            .await?;
        Ok(BillClosure {
            order: envelope::field(&mut value, "pedido")?,
            table: envelope::optional_field(&mut value, "mesa")?,
        })
    }

    #[instrument(skip(self))]
    async fn close_table(&self, table_id: i64) -> std::result::Result<Table, ApiError> {
        let (status, body) = self
            .send(self.post::<()>(&format!("mesas/{}/fechar", table_id), None))
            .await?;
        envelope::open_plain(status, &body, "Erro ao fechar mesa")
    }
}

#[async_trait]
impl AdminApi for RestaurantClient {
    #[instrument(skip(self))]
    async fn fetch_statistics(&self) -> std::result::Result<Statistics, ApiError> {
        let mut value = self
            .get_envelope("admin/estatisticas", "Erro ao carregar estatísticas")
            .await?;
        Ok(envelope::optional_field(&mut value, "estatisticas")?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn fetch_tables(&self) -> std::result::Result<Vec<Table>, ApiError> {
        let mut value = self.get_envelope("admin/mesas", "Erro ao carregar mesas").await?;
        Ok(envelope::optional_field(&mut value, "mesas")?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn confirm_payment(
        &self,
        table_number: u32,
    ) -> std::result::Result<PaymentConfirmation, ApiError> {
        let mut value = self
            .post_envelope::<()>(
                &format!("admin/mesas/{}/confirmar-pagamento", table_number),
                None,
                "Erro ao confirmar pagamento",
            )
            .await?;
        Ok(PaymentConfirmation {
            message: envelope::optional_field(&mut value, "message")?,
            table: envelope::optional_field(&mut value, "mesa")?,
        })
    }
}
