use crate::render;
use application::admin_service::confirmation_prompt;
use application::{AdminService, RefreshScheduler};
use chrono::Utc;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use domain::gateway::AdminApi;
use shared::confirmation::ask_confirmation;
use shared::types::Result;
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Terminal front end of the admin dashboard.
pub struct AdminConsole<A> {
    service: Arc<AdminService<A>>,
}

impl<A: AdminApi + 'static> AdminConsole<A> {
    pub fn new(service: AdminService<A>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// One-shot dashboard.
    pub async fn overview(&self) -> Result<()> {
        self.service.refresh_and_notify().await;
        print!("{}", screen(&self.service).await);
        Ok(())
    }

    pub async fn table(&self, number: u32) -> Result<()> {
        self.service.refresh_and_notify().await;
        match self.service.table(number).await {
            Ok(table) => print!(
                "{}",
                render::table_details(&table, Utc::now().naive_utc())
            ),
            Err(err) => println!("{}", render_error(&err.user_message())),
        }
        print!("{}", toasts(&self.service).await);
        Ok(())
    }

    pub async fn confirm_payment(&self, number: u32, skip_prompt: bool) -> Result<()> {
        let confirmed = skip_prompt || ask_confirmation(&confirmation_prompt(number), false)?;
        if let Err(err) = self.service.confirm_payment(number, confirmed).await {
            warn!(table = number, error = %err, "payment confirmation failed");
        }
        print!("{}", toasts(&self.service).await);
        Ok(())
    }

    /// Repaints the dashboard every `interval` until Ctrl+C.
    pub async fn watch(&self, interval: Duration) -> Result<()> {
        self.service.refresh_and_notify().await;
        repaint(&self.service).await?;

        let service = Arc::clone(&self.service);
        let scheduler = RefreshScheduler::spawn(interval, move || {
            let service = Arc::clone(&service);
            async move {
                service.refresh_and_notify().await;
                if let Err(err) = repaint(&service).await {
                    warn!(error = %err, "dashboard repaint failed");
                }
            }
        });

        let token = scheduler.token();
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    warn!(error = %err, "could not listen for Ctrl+C");
                }
            }
            _ = token.cancelled() => {}
        }
        let runs = scheduler.shutdown().await;
        info!(runs, "dashboard watch stopped");
        Ok(())
    }
}

async fn toasts<A: AdminApi>(service: &AdminService<A>) -> String {
    render::toasts(&service.notifications(Instant::now()).await)
}

async fn screen<A: AdminApi>(service: &AdminService<A>) -> String {
    let mut out = toasts(service).await;
    match service.snapshot().await {
        Some(snapshot) => out.push_str(&render::dashboard(&snapshot, Utc::now().naive_utc())),
        None => out.push_str("Carregando...\n"),
    }
    out
}

async fn repaint<A: AdminApi>(service: &AdminService<A>) -> Result<()> {
    let text = screen(service).await;
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    print!("{}", text);
    println!("\nCtrl+C para sair");
    Ok(())
}

fn render_error(message: &str) -> String {
    use colored::Colorize;
    format!("✖ {}", message).red().to_string()
}
