use crate::types::Result;
use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

/// Yes/no question asked before an irreversible call (closing a table,
/// confirming a payment). Esc or `q` counts as "no".
pub fn ask_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default_yes)
        .wait_for_newline(true)
        .interact_opt()
        .context("confirmation needs an interactive terminal")?;
    Ok(answer.unwrap_or(false))
}
