use anyhow::{anyhow, Context, Result};
use std::process::{Child, Command};
use tracing::debug;

use crate::browsers::OsKind;

/// Command that hands a URL to the desktop's default browser.
pub fn default_open_command(os: OsKind) -> &'static str {
    match os {
        OsKind::MacOs => "open",
        OsKind::Linux => "xdg-open",
        OsKind::Windows => "cmd /c start",
        OsKind::Other => "",
    }
}

/// Split a configured command line and append the URL as the last argument.
pub fn build_open_command(command_line: &str, url: &str) -> Result<Command> {
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow!("No browser command configured. Use 'set-browser <cmd>'."))?;

    let mut cmd = Command::new(program);
    cmd.args(parts).arg(url);
    Ok(cmd)
}

/// Launch the configured browser command for `url` without waiting on it.
pub fn open_url(command_line: &str, url: &str) -> Result<Child> {
    let mut cmd = build_open_command(command_line, url)?;
    debug!("Launching {:?}", cmd);
    cmd.spawn()
        .with_context(|| format!("failed to run '{}'", command_line))
}
