// Startup module - banner printed before the TUI takes over the screen
//
// Shows the backend in use, where the session lives and whether someone is
// already logged in, so a wrong URL or stale session is obvious before the
// alternate screen hides the shell.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// What the banner reports
pub struct StartupInfo<'a> {
    pub config: &'a Config,
    /// URL the client will actually talk to (demo backend or configured)
    pub api_url: &'a str,
    /// Username restored from the session file, if any
    pub restored_user: Option<&'a str>,
}

/// Print the startup banner to stdout
pub fn print_startup(info: &StartupInfo<'_>) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}Storefront{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Products and personalized recommendations{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET}  {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET}  {DIM}(using defaults){RESET}");
        }
    }
    println!(
        "  {DIM}Session:{RESET} {}",
        info.config.session_file.display()
    );
    println!();

    println!("  {MAGENTA}▸{RESET} Backend {BOLD}{}{RESET}", info.api_url);
    if info.config.demo_mode {
        println!(
            "  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(log in as alice@example.com / password123){RESET}"
        );
    }
    match info.restored_user {
        Some(user) => println!("  {GREEN}▸{RESET} Welcome back, {BOLD}{}{RESET}", user),
        None => println!("  {DIM}▸ Not logged in{RESET}"),
    }
    println!();
}

/// Same summary into the log panel
pub fn log_startup(info: &StartupInfo<'_>) {
    tracing::info!("Storefront v{}", VERSION);
    tracing::info!("Backend: {}", info.api_url);
    if info.config.demo_mode {
        tracing::info!("Demo mode active");
    }
    if info.restored_user.is_none() {
        tracing::info!("No saved session");
    }
}
