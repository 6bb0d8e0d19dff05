use crate::error::AppError;
use domain::cart::MAX_LINE_QUANTITY;
use domain::gateway::OrderingApi;
use domain::{CategoryFilter, Notifications, OrderingState, Screen, Session};
use shared::telemetry::Telemetry;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const CLOSE_TABLE_PROMPT: &str =
    "Tem certeza que deseja fechar a mesa? Esta ação não pode ser desfeita.";

/// Everything a customer can do from the ordering screens.
///
/// The presentation layer translates key presses into these and hands them
/// to [`OrderingService::dispatch`]; it never touches state directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartSession {
        customer_name: String,
        table_number: String,
    },
    FilterCategory(String),
    AddToCart(i64),
    SetQuantity { item_id: i64, quantity: i64 },
    RemoveFromCart(i64),
    SubmitOrder,
    AddMoreItems,
    RequestBill,
    /// `confirmed` is the customer's answer to [`CLOSE_TABLE_PROMPT`].
    CloseTable { confirmed: bool },
}

/// Session and cart controller for one table.
pub struct OrderingService<A> {
    api: A,
    state: OrderingState,
    notifications: Notifications,
}

impl<A: OrderingApi> OrderingService<A> {
    pub fn new(api: A, toast_duration: Duration) -> Self {
        Self {
            api,
            state: OrderingState::new(),
            notifications: Notifications::new(toast_duration),
        }
    }

    pub fn state(&self) -> &OrderingState {
        &self.state
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Runs one action. Failures are also raised as error toasts, so callers
    /// may ignore the returned error.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), AppError> {
        debug!(?action, "dispatch");
        let result = match action {
            Action::StartSession {
                customer_name,
                table_number,
            } => self.start_session(&customer_name, &table_number).await,
            Action::FilterCategory(category) => {
                self.filter_category(&category);
                Ok(())
            }
            Action::AddToCart(item_id) => self.add_to_cart(item_id),
            Action::SetQuantity { item_id, quantity } => self.set_quantity(item_id, quantity),
            Action::RemoveFromCart(item_id) => {
                self.remove_from_cart(item_id);
                Ok(())
            }
            Action::SubmitOrder => self.submit_order().await,
            Action::AddMoreItems => self.back_to_menu(),
            Action::RequestBill => self.request_bill().await,
            Action::CloseTable { confirmed } => self.close_table(confirmed).await.map(|_| ()),
        };

        if let Err(err) = &result {
            self.notifications.error(err.user_message());
        }
        result
    }

    pub async fn start_session(&mut self, customer_name: &str, table_number: &str) -> Result<(), AppError> {
        let customer_name = customer_name.trim();
        let table_number = parse_table_number(table_number);
        let table_number = match table_number {
            Some(number) if !customer_name.is_empty() => number,
            _ => {
                return Err(AppError::Validation(
                    "Por favor, preencha todos os campos".to_string(),
                ))
            }
        };

        let timer = Telemetry::new();
        let started = self.api.start_session(table_number, customer_name).await?;
        info!(
            table_number,
            table_id = started.table.id,
            order_id = started.order.id,
            "session started"
        );

        self.state.reset();
        self.state.session = Some(Session::new(
            table_number,
            customer_name,
            started.table,
            started.order,
        ));
        self.load_catalog().await;
        self.state.screen = Screen::Menu;
        self.notifications
            .success("Bem-vindo! Escolha seus itens do cardápio");
        debug!(elapsed_ms = timer.elapsed_ms(), "bootstrap finished");
        Ok(())
    }

    /// A failed menu fetch leaves the session open with an empty menu.
    async fn load_catalog(&mut self) {
        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                debug!(categories = catalog.sections().len(), "catalog loaded");
                self.state.catalog = catalog;
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                self.notifications.error("Erro ao carregar cardápio");
            }
        }
    }

    pub fn filter_category(&mut self, category: &str) {
        self.state.filter = CategoryFilter::parse(category);
    }

    pub fn add_to_cart(&mut self, item_id: i64) -> Result<(), AppError> {
        let item = self
            .state
            .add_to_cart(item_id)
            .ok_or_else(|| AppError::NotFound("Item não encontrado".to_string()))?;
        self.notifications
            .success(format!("{} adicionado ao pedido", item.name));
        Ok(())
    }

    /// Zero or less removes the line; above [`MAX_LINE_QUANTITY`] is refused
    /// and the cart stays as it was.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) -> Result<(), AppError> {
        if quantity > i64::from(MAX_LINE_QUANTITY) {
            return Err(AppError::Validation(format!(
                "Quantidade máxima por item: {}",
                MAX_LINE_QUANTITY
            )));
        }
        self.state.cart.set_quantity(item_id, quantity);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, item_id: i64) {
        self.state.cart.remove(item_id);
    }

    /// Sends the cart one line at a time, stopping at the first failure.
    ///
    /// Lines the backend already accepted stay on the order and the cart is
    /// left exactly as it was; the error says how far submission got.
    pub async fn submit_order(&mut self) -> Result<(), AppError> {
        if self.state.cart.is_empty() {
            return Err(AppError::Validation(
                "Adicione itens ao carrinho antes de confirmar".to_string(),
            ));
        }
        let order_id = self.ensure_order().await?;

        let pending: Vec<(i64, u32)> = self
            .state
            .cart
            .lines()
            .iter()
            .map(|line| (line.item.id, line.quantity))
            .collect();
        let total = pending.len();

        let mut latest = None;
        for (accepted, (item_id, quantity)) in pending.into_iter().enumerate() {
            match self.api.add_item(order_id, item_id, quantity).await {
                Ok(order) => latest = Some(order),
                Err(source) => {
                    warn!(order_id, accepted, total, error = %source, "order submission aborted");
                    if let (Some(order), Some(session)) = (latest, self.state.session.as_mut()) {
                        session.order = Some(order);
                    }
                    return Err(AppError::Submission {
                        accepted,
                        total,
                        source,
                    });
                }
            }
        }

        if let Some(session) = self.state.session.as_mut() {
            session.order = latest.or(session.order.take());
        }
        self.state.cart.clear();
        self.state.screen = Screen::OrderConfirmed;
        self.notifications.success("Pedido confirmado com sucesso!");
        info!(order_id, lines = total, "order submitted");
        Ok(())
    }

    /// "Add more items" from the confirmation screen.
    pub fn back_to_menu(&mut self) -> Result<(), AppError> {
        self.session()?;
        self.state.screen = Screen::Menu;
        Ok(())
    }

    pub async fn request_bill(&mut self) -> Result<(), AppError> {
        let order_id = self.ensure_order().await?;
        let closure = self.api.close_order(order_id).await?;

        let session = self.state.session.as_mut().ok_or(AppError::NoSession)?;
        session.order = Some(closure.order);
        if let Some(table) = closure.table {
            session.table = table;
        }
        self.state.screen = Screen::BillRequested;
        self.notifications
            .success("Conta solicitada! Aguarde o atendente");
        info!(order_id, "bill requested");
        Ok(())
    }

    /// Returns `Ok(false)` when the customer declined the confirmation.
    /// A rejected close leaves session, cart and screen untouched.
    pub async fn close_table(&mut self, confirmed: bool) -> Result<bool, AppError> {
        if !confirmed {
            return Ok(false);
        }
        let table_id = self.session()?.table.id;
        self.api.close_table(table_id).await?;

        self.state.reset();
        self.notifications
            .success("Mesa fechada com sucesso! Obrigado pela visita!");
        info!(table_id, "table closed");
        Ok(true)
    }

    fn session(&self) -> Result<&Session, AppError> {
        self.state.session.as_ref().ok_or(AppError::NoSession)
    }

    /// Order id of the session, opening a fresh order through the bootstrap
    /// endpoint when the session has none.
    async fn ensure_order(&mut self) -> Result<i64, AppError> {
        let session = self.session()?;
        if let Some(order) = &session.order {
            return Ok(order.id);
        }

        let (table_number, customer_name) = (session.table_number, session.customer_name.clone());
        let started = self.api.start_session(table_number, &customer_name).await?;
        let order_id = started.order.id;
        if let Some(session) = self.state.session.as_mut() {
            session.table = started.table;
            session.order = Some(started.order);
        }
        debug!(order_id, "opened order lazily");
        Ok(order_id)
    }
}

/// Positive integer, as typed in the welcome form.
fn parse_table_number(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
