use crate::render;
use application::ordering_service::CLOSE_TABLE_PROMPT;
use application::{Action, OrderingService};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use domain::catalog::category_label;
use domain::gateway::OrderingApi;
use domain::Screen;
use shared::confirmation::ask_confirmation;
use shared::types::Result;
use std::time::Instant;
use tracing::debug;

/// Interactive customer flow. Owns the ordering context for the lifetime of
/// the program and turns menu choices into [`Action`]s.
pub struct OrderingApp<A> {
    service: OrderingService<A>,
    table_hint: Option<u32>,
    theme: ColorfulTheme,
    last_toast: u64,
}

enum Flow {
    Continue,
    Quit,
}

impl<A: OrderingApi> OrderingApp<A> {
    pub fn new(service: OrderingService<A>, table_hint: Option<u32>) -> Self {
        Self {
            service,
            table_hint,
            theme: ColorfulTheme::default(),
            last_toast: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.show_toasts();
            let flow = match self.service.state().screen {
                Screen::Welcome => self.welcome().await?,
                Screen::Menu => self.menu().await?,
                Screen::OrderConfirmed => self.order_confirmed().await?,
                Screen::BillRequested => self.bill_requested().await?,
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        self.show_toasts();
        println!("{}", "Até logo!".cyan());
        Ok(())
    }

    async fn dispatch(&mut self, action: Action) {
        // Failures are already on the toast board.
        if let Err(err) = self.service.dispatch(action).await {
            debug!(error = %err, "action failed");
        }
    }

    /// Prints toasts raised since the last call.
    fn show_toasts(&mut self) {
        let board = self.service.notifications_mut();
        board.prune(Instant::now());
        let fresh: Vec<_> = board
            .active()
            .iter()
            .filter(|n| n.id > self.last_toast)
            .cloned()
            .collect();
        if let Some(last) = fresh.last() {
            self.last_toast = last.id;
        }
        print!("{}", render::toasts(&fresh));
    }

    fn banner(&self) {
        if let Some(session) = &self.service.state().session {
            println!("\n{}", render::session_banner(session));
        }
    }

    async fn welcome(&mut self) -> Result<Flow> {
        println!("\n{}", render::welcome(self.table_hint));
        let choice = Select::with_theme(&self.theme)
            .items(&["Iniciar Pedido", "Sair"])
            .default(0)
            .interact()?;
        if choice == 1 {
            return Ok(Flow::Quit);
        }

        let customer_name: String = Input::with_theme(&self.theme)
            .with_prompt("Seu nome")
            .allow_empty(true)
            .interact_text()?;
        let mut table_input = Input::<String>::with_theme(&self.theme);
        table_input = table_input.with_prompt("Número da mesa").allow_empty(true);
        if let Some(number) = self.table_hint {
            table_input = table_input.default(number.to_string());
        }
        let table_number = table_input.interact_text()?;

        self.dispatch(Action::StartSession {
            customer_name,
            table_number,
        })
        .await;
        Ok(Flow::Continue)
    }

    async fn menu(&mut self) -> Result<Flow> {
        self.banner();
        let state = self.service.state();
        print!("{}", render::menu(&state.catalog, &state.filter));
        if let Some(indicator) = render::cart_indicator(state.cart.totals()) {
            println!("\n{}", indicator.yellow().bold());
        }

        let options = [
            "Adicionar item",
            "Filtrar categoria",
            "Ver carrinho",
            "Confirmar pedido",
            "Fechar conta",
            "Sair",
        ];
        let choice = Select::with_theme(&self.theme)
            .with_prompt("O que deseja fazer?")
            .items(&options)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let item_id: i64 = Input::with_theme(&self.theme)
                    .with_prompt("Código do item")
                    .interact_text()?;
                self.dispatch(Action::AddToCart(item_id)).await;
            }
            1 => self.pick_category().await?,
            2 => self.cart().await?,
            3 => self.dispatch(Action::SubmitOrder).await,
            4 => self.dispatch(Action::RequestBill).await,
            _ => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn pick_category(&mut self) -> Result<()> {
        let mut keys = vec!["todas".to_string()];
        keys.extend(self.service.state().catalog.categories().map(str::to_string));
        let labels: Vec<&str> = keys
            .iter()
            .map(|key| if key == "todas" { "Todas" } else { category_label(key) })
            .collect();

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Categoria")
            .items(&labels)
            .default(0)
            .interact()?;
        let category = keys[choice].clone();
        self.dispatch(Action::FilterCategory(category)).await;
        Ok(())
    }

    async fn cart(&mut self) -> Result<()> {
        loop {
            let cart = &self.service.state().cart;
            println!("\n{}", render::cart(cart));
            if cart.is_empty() {
                return Ok(());
            }
            let lines: Vec<(i64, String, u32)> = cart
                .lines()
                .iter()
                .map(|line| (line.item.id, line.item.name.clone(), line.quantity))
                .collect();

            let choice = Select::with_theme(&self.theme)
                .items(&["Alterar quantidade", "Remover item", "Confirmar pedido", "Voltar"])
                .default(3)
                .interact()?;
            if choice == 2 {
                self.dispatch(Action::SubmitOrder).await;
                return Ok(());
            }
            if choice == 3 {
                return Ok(());
            }

            let names: Vec<String> = lines
                .iter()
                .map(|(_, name, quantity)| format!("{} (x{})", name, quantity))
                .collect();
            let picked = Select::with_theme(&self.theme)
                .with_prompt("Item")
                .items(&names)
                .default(0)
                .interact()?;
            let (item_id, quantity) = (lines[picked].0, lines[picked].2);

            if choice == 0 {
                let quantity: i64 = Input::with_theme(&self.theme)
                    .with_prompt("Quantidade")
                    .default(i64::from(quantity))
                    .interact_text()?;
                self.dispatch(Action::SetQuantity { item_id, quantity }).await;
            } else {
                self.dispatch(Action::RemoveFromCart(item_id)).await;
            }
            self.show_toasts();
        }
    }

    async fn order_confirmed(&mut self) -> Result<Flow> {
        self.banner();
        println!("{}", render::order_confirmed());
        let choice = Select::with_theme(&self.theme)
            .items(&["Adicionar Mais Itens", "Fechar Conta", "Sair"])
            .default(0)
            .interact()?;
        match choice {
            0 => self.dispatch(Action::AddMoreItems).await,
            1 => self.dispatch(Action::RequestBill).await,
            _ => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn bill_requested(&mut self) -> Result<Flow> {
        self.banner();
        let order = self
            .service
            .state()
            .session
            .as_ref()
            .and_then(|session| session.order.as_ref());
        println!("{}", render::bill(order));

        let choice = Select::with_theme(&self.theme)
            .items(&["Fechar Mesa", "Sair"])
            .default(0)
            .interact()?;
        if choice == 1 {
            return Ok(Flow::Quit);
        }
        let confirmed = ask_confirmation(CLOSE_TABLE_PROMPT, false)?;
        self.dispatch(Action::CloseTable { confirmed }).await;
        Ok(Flow::Continue)
    }
}
