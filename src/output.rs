//! Colored terminal output for the bootstrapper
//!
//! Uses owo-colors for terminal colors. Progress bars live in [`crate::progress`].

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Configuring build"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print an action with a dependency counter
/// Example: "(1/3) Installing fmod"
pub fn action_numbered(current: usize, total: usize, message: &str) {
    println!(
        "{} {}",
        format!("({}/{})", current, total).cyan(),
        message.bold()
    );
}

/// Print a sub-action (cyan arrow)
/// Example: "  -> fetch"
pub fn sub_action(step: &str) {
    println!("  {} {}", "->".cyan(), step);
}

/// Print a detail line (dimmed)
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print a warning message (yellow, to stderr)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red, to stderr)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a skip message (dimmed)
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}

/// Print a dependency line for `--list`
pub fn list_item(name: &str, url: &str, pinned: bool) {
    if pinned {
        println!("  {} {} {}", name.green(), url.dimmed(), "(sha256)".dimmed());
    } else {
        println!("  {} {}", name, url.dimmed());
    }
}
