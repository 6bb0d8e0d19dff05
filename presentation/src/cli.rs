use crate::admin::AdminConsole;
use crate::ordering::OrderingApp;
use application::{AdminService, OrderingService};
use clap::{Parser, Subcommand};
use infrastructure::{Config, RestaurantClient};
use shared::types::Result;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "mesa_qr")]
#[command(about = "Cliente de terminal para pedidos por QR code e painel do restaurante")]
pub struct Cli {
    /// Backend base URL (overrides MESA_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Customer ordering flow for one table
    Pedido {
        /// Table number, as encoded in the table's QR code
        #[arg(long)]
        mesa: Option<u32>,
    },
    /// Restaurant dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AdminCommand {
    /// Statistics and every table, once
    Painel,
    /// Details of one table
    Mesa { numero: u32 },
    /// Confirm the payment of a table awaiting payment
    Confirmar {
        numero: u32,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        sim: bool,
    },
    /// Repaint the dashboard periodically until Ctrl+C
    Monitorar {
        /// Seconds between refreshes (overrides MESA_ADMIN_REFRESH_SECS)
        #[arg(long)]
        intervalo: Option<u64>,
    },
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Applies command-line overrides on top of the loaded configuration.
    fn effective_config(&self, cli: &Cli) -> Config {
        let mut config = self.config.clone();
        if let Some(url) = &cli.api_url {
            config = config.with_api_base_url(url.clone());
        }
        if let Command::Admin {
            command: AdminCommand::Monitorar {
                intervalo: Some(secs),
            },
        } = &cli.command
        {
            config = config.with_admin_refresh_interval(Duration::from_secs((*secs).max(1)));
        }
        config
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        let config = self.effective_config(&cli);
        debug!(api = %config.api_base_url, "using backend");
        let client = RestaurantClient::new(&config)?;

        match cli.command {
            Command::Pedido { mesa } => {
                let service = OrderingService::new(client, config.toast_duration);
                OrderingApp::new(service, mesa).run().await
            }
            Command::Admin { command } => {
                let console = AdminConsole::new(AdminService::new(client, config.toast_duration));
                match command {
                    AdminCommand::Painel => console.overview().await,
                    AdminCommand::Mesa { numero } => console.table(numero).await,
                    AdminCommand::Confirmar { numero, sim } => {
                        console.confirm_payment(numero, sim).await
                    }
                    AdminCommand::Monitorar { .. } => {
                        console.watch(config.admin_refresh_interval).await
                    }
                }
            }
        }
    }
}
