//! Text renderers. Each function is a pure mapping from state to the text
//! printed on screen; nothing here reads input or talks to the network.

use application::DashboardSnapshot;
use chrono::NaiveDateTime;
use colored::{ColoredString, Colorize};
use domain::catalog::category_label;
use domain::{
    Cart, CartTotals, Catalog, CategoryFilter, Notification, NotificationKind, Order, Session,
    Statistics, Table, TableStatus,
};
use shared::utils::{format_brl, format_elapsed, format_timestamp};
use std::fmt::Display;

/// Screen text under construction, one line at a time.
#[derive(Default)]
struct Lines(String);

impl Lines {
    fn push(&mut self, line: impl Display) {
        self.0.push_str(&line.to_string());
        self.0.push('\n');
    }

    fn blank(&mut self) {
        self.0.push('\n');
    }

    fn finish(self) -> String {
        self.0
    }
}

pub fn welcome(table_hint: Option<u32>) -> String {
    let mut out = Lines::default();
    out.push("Bem-vindo ao Restaurante!".bold());
    out.push("Faça seu pedido diretamente pela mesa.");
    if let Some(number) = table_hint {
        out.push(format!("Mesa {}", number));
    }
    out.finish()
}

/// Header line shown above every screen once a session exists.
pub fn session_banner(session: &Session) -> String {
    format!(
        "{} | {}",
        format!("Mesa {}", session.table_number).cyan().bold(),
        session.customer_name
    )
}

/// Menu sections admitted by `filter`, in catalog order. Each item shows the
/// id the customer types to add it.
pub fn menu(catalog: &Catalog, filter: &CategoryFilter) -> String {
    let mut out = Lines::default();
    let mut shown = 0;
    for (category, items) in catalog.visible(filter) {
        shown += 1;
        out.blank();
        out.push(format!("== {} ==", category_label(category)).bold());
        for item in items {
            out.push(format!(
                "  [{}] {}  {}",
                item.id,
                item.name,
                format_brl(item.price).green()
            ));
            if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                out.push(format!("       {}", description.dimmed()));
            }
        }
    }
    if shown == 0 {
        out.push("Nenhum item disponível");
    }
    out.finish()
}

/// Floating cart indicator; `None` while the cart is empty.
pub fn cart_indicator(totals: CartTotals) -> Option<String> {
    if !totals.indicator_visible() {
        return None;
    }
    let noun = if totals.item_count == 1 { "item" } else { "itens" };
    Some(format!(
        "Carrinho: {} {} | {}",
        totals.item_count,
        noun,
        format_brl(totals.value)
    ))
}

pub fn cart(cart: &Cart) -> String {
    let mut out = Lines::default();
    out.push("Seu Pedido".bold());
    if cart.is_empty() {
        out.push("Seu carrinho está vazio");
    }
    for line in cart.lines() {
        out.push(format!(
            "  [{}] {}  {} cada  x{}  = {}",
            line.item.id,
            line.item.name,
            format_brl(line.item.price),
            line.quantity,
            format_brl(line.subtotal())
        ));
    }
    out.push(format!("Total: {}", format_brl(cart.totals().value).green().bold()));
    out.finish()
}

pub fn order_confirmed() -> String {
    let mut out = Lines::default();
    out.push("Pedido Confirmado!".green().bold());
    out.push("Seu pedido foi enviado para a cozinha.");
    out.finish()
}

/// Itemized bill. `None` or an order without lines renders as empty.
pub fn bill(order: Option<&Order>) -> String {
    let mut out = Lines::default();
    out.push("Conta Solicitada".bold());
    match order.filter(|order| !order.lines.is_empty()) {
        None => {
            out.push("Nenhum item no pedido");
            out.push(format!("Total: {}", format_brl(Default::default())));
        }
        Some(order) => {
            for line in &order.lines {
                out.push(format!(
                    "  {}x {}  {}",
                    line.quantity,
                    line.display_name(),
                    format_brl(line.subtotal)
                ));
            }
            out.push(format!("Total: {}", format_brl(order.total).green().bold()));
        }
    }
    out.push("Um atendente virá até sua mesa para finalizar o pagamento.");
    out.finish()
}

pub fn toast(notification: &Notification) -> String {
    let text = match notification.kind {
        NotificationKind::Success => format!("✔ {}", notification.message).green(),
        NotificationKind::Error => format!("✖ {}", notification.message).red(),
    };
    text.to_string()
}

pub fn toasts(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| toast(n) + "\n")
        .collect()
}

fn status_label(status: TableStatus) -> ColoredString {
    match status {
        TableStatus::Free => status.label().green(),
        TableStatus::Occupied => status.label().yellow(),
        TableStatus::AwaitingPayment => status.label().red(),
    }
}

pub fn statistics(stats: &Statistics) -> String {
    let mut out = Lines::default();
    out.push("Painel Administrativo".bold());
    out.push(format!(
        "Total: {}  Livres: {}  Ocupadas: {}  Aguardando Pagamento: {}  Pedidos Hoje: {}",
        stats.total_tables,
        stats.free_tables,
        stats.occupied_tables,
        stats.awaiting_payment_tables,
        stats.orders_today
    ));
    out.finish()
}

/// One table card. Free tables show only number and status.
pub fn table_card(table: &Table, now: NaiveDateTime) -> String {
    let mut out = format!("Mesa {}  [{}]", table.number, status_label(table.status));
    if table.status == TableStatus::Free {
        return out;
    }
    let customer = table.customer_name.as_deref().unwrap_or("N/A");
    out.push_str(&format!("\n  Cliente: {}", customer));
    if let Some(order) = &table.active_order {
        if let Some(created_at) = order.created_at {
            out.push_str(&format!("  ⏱ {}", format_elapsed(created_at, now)));
        }
        out.push_str(&format!("  {}", format_brl(order.total)));
    }
    out
}

pub fn tables(tables: &[Table], now: NaiveDateTime) -> String {
    if tables.is_empty() {
        return "Nenhuma mesa encontrada\nNão há mesas cadastradas no sistema.\n".to_string();
    }
    tables
        .iter()
        .map(|table| table_card(table, now) + "\n")
        .collect()
}

pub fn dashboard(snapshot: &DashboardSnapshot, now: NaiveDateTime) -> String {
    let mut out = statistics(&snapshot.statistics);
    out.push('\n');
    out.push_str(&tables(&snapshot.tables, now));
    out.push_str(&format!(
        "\n{}\n",
        format!("Atualizado em {}", format_timestamp(snapshot.fetched_at)).dimmed()
    ));
    out
}

/// Details of one table: identity, customer, last update, and the lines of
/// its active order while that order is unpaid.
pub fn table_details(table: &Table, now: NaiveDateTime) -> String {
    let mut out = Lines::default();
    out.push(format!("Mesa {} - {}", table.number, table.status.label()).bold());
    out.push(format!("Número da Mesa: {}", table.number));
    out.push(format!("Status: {}", status_label(table.status)));
    if let Some(customer) = &table.customer_name {
        out.push(format!("Cliente: {}", customer));
    }
    if let Some(updated_at) = table.updated_at {
        out.push(format!("Última Atualização: {}", format_timestamp(updated_at)));
    }

    let order = table
        .active_order
        .as_ref()
        .filter(|order| order.status.is_active() && !order.lines.is_empty());
    if let Some(order) = order {
        let elapsed = order
            .created_at
            .map(|created_at| format!(" ({})", format_elapsed(created_at, now)))
            .unwrap_or_default();
        out.blank();
        out.push(format!("Itens do Pedido{}", elapsed));
        for line in &order.lines {
            let notes = line
                .notes
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(|n| format!(" - {}", n))
                .unwrap_or_default();
            out.push(format!(
                "  {}  {}x {}{}  {}",
                line.display_name(),
                line.quantity,
                format_brl(line.unit_price),
                notes,
                format_brl(line.subtotal)
            ));
        }
        out.push(format!("Total: {}", format_brl(order.total).bold()));
    }

    if table.status == TableStatus::AwaitingPayment {
        out.blank();
        out.push(
            format!(
                "Mesa aguardando pagamento. Use `mesa_qr admin confirmar {}` para confirmar.",
                table.number
            )
            .yellow(),
        );
    }
    out.finish()
}
