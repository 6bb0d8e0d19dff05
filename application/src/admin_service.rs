use crate::error::AppError;
use chrono::{NaiveDateTime, Utc};
use domain::gateway::AdminApi;
use domain::{Notification, Notifications, Statistics, Table};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub const CONFIRM_PAYMENT_PROMPT: &str = "Confirmar pagamento da Mesa";

/// What the dashboard shows: counters plus every table, as of `fetched_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub statistics: Statistics,
    pub tables: Vec<Table>,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// Another refresh was still in flight; nothing was requested.
    Skipped,
    Failed,
}

/// Clears the in-flight flag when the refresh that set it ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn try_begin(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Admin dashboard controller. Shared between the polling task and the
/// interactive prompt, hence the interior locking.
pub struct AdminService<A> {
    api: A,
    snapshot: RwLock<Option<DashboardSnapshot>>,
    in_flight: AtomicBool,
    notifications: Mutex<Notifications>,
}

impl<A: AdminApi> AdminService<A> {
    pub fn new(api: A, toast_duration: Duration) -> Self {
        Self {
            api,
            snapshot: RwLock::new(None),
            in_flight: AtomicBool::new(false),
            notifications: Mutex::new(Notifications::new(toast_duration)),
        }
    }

    pub async fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.snapshot.read().await.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetches statistics and tables concurrently. Both must succeed;
    /// otherwise the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<RefreshOutcome, AppError> {
        let Some(_guard) = InFlight::try_begin(&self.in_flight) else {
            debug!("refresh already in flight, skipping");
            return Ok(RefreshOutcome::Skipped);
        };

        let (statistics, tables) =
            tokio::try_join!(self.api.fetch_statistics(), self.api.fetch_tables())?;
        debug!(tables = tables.len(), "dashboard refreshed");

        *self.snapshot.write().await = Some(DashboardSnapshot {
            statistics,
            tables,
            fetched_at: Utc::now().naive_utc(),
        });
        Ok(RefreshOutcome::Refreshed)
    }

    /// [`refresh`](Self::refresh), with failures raised as error toasts.
    pub async fn refresh_and_notify(&self) -> RefreshOutcome {
        match self.refresh().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "dashboard refresh failed");
                self.notifications.lock().await.error(err.user_message());
                RefreshOutcome::Failed
            }
        }
    }

    /// Table by its number, from the latest snapshot.
    pub async fn table(&self, number: u32) -> Result<Table, AppError> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.tables.iter().find(|t| t.number == number))
            .cloned()
            .ok_or_else(|| AppError::NotFound("Mesa não encontrada".to_string()))
    }

    /// `confirmed` is the operator's answer to [`confirmation_prompt`].
    /// Returns `Ok(false)` when declined.
    pub async fn confirm_payment(&self, number: u32, confirmed: bool) -> Result<bool, AppError> {
        if !confirmed {
            return Ok(false);
        }
        match self.api.confirm_payment(number).await {
            Ok(confirmation) => {
                info!(table = number, message = ?confirmation.message, "payment confirmed");
                self.notifications
                    .lock()
                    .await
                    .success("Pagamento confirmado com sucesso!");
                self.refresh_and_notify().await;
                Ok(true)
            }
            Err(err) => {
                let err = AppError::from(err);
                self.notifications.lock().await.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Toasts still on screen at `now`.
    pub async fn notifications(&self, now: Instant) -> Vec<Notification> {
        let mut board = self.notifications.lock().await;
        board.prune(now);
        board.active().to_vec()
    }
}

pub fn confirmation_prompt(number: u32) -> String {
    format!("{} {}?", CONFIRM_PAYMENT_PROMPT, number)
}
