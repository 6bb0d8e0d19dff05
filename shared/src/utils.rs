use chrono::{Duration, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a monetary value the way the restaurant displays it: `R$ 12,50`.
///
/// Two fraction digits, comma separator, no thousands grouping, half-up.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("R$ {}", format!("{:.2}", rounded).replace('.', ","))
}

/// Elapsed time between `since` and `now`, as `2h 05m` style text
/// (`{h}h {m}m`, or just `{m}m` under one hour). Clock skew clamps to zero.
pub fn format_elapsed(since: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - since).max(Duration::zero());
    let hours = diff.num_hours();
    let minutes = diff.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// `dd/mm/yyyy HH:MM:SS`, the pt-BR locale rendering of a timestamp.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %H:%M:%S").to_string()
}
