//! Terminal output helpers shared by every command.
//!
//! All helpers honor NO_COLOR. Errors are the only output on stderr;
//! hints, warnings, and data go to stdout so scripted callers can split
//! the streams cleanly.
//!
//! Color scheme:
//! - Green: success, commands
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, profile and environment names, hints
//! - Bold: headers, values
//! - Dim: labels, secondary info

use std::fmt::Display;
use std::io::{self, Write as IoWrite};

use console::Style;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Apply `style` to `text` unless colors are off.
fn tint(text: &str, style: Style) -> String {
    if colors_enabled() {
        style.apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Success line with a green checkmark, e.g. `✓ created profile 'dev'`.
pub fn success(msg: &str) {
    println!("{} {}", tint("✓", Style::new().green()), msg);
}

/// Error line on stderr, e.g. `✗ profile 'dev' not found`.
pub fn error(msg: &str) {
    eprintln!("{} {}", tint("✗", Style::new().red()), msg);
}

/// Warning line, e.g. `⚠ no active deployment`.
pub fn warn(msg: &str) {
    println!("{} {}", tint("⚠", Style::new().yellow()), msg);
}

/// Remediation hint, e.g. `→ run caisson profile create dev`.
pub fn hint(msg: &str) {
    let cyan = Style::new().cyan();
    println!("{} {}", tint("→", cyan.clone()), tint(msg, cyan));
}

/// Bold section header.
pub fn header(title: &str) {
    println!("{}", tint(title, Style::new().bold()));
}

/// Indented label/value pair, e.g. `  tenant  acme`.
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        tint(label, Style::new().dim()),
        tint(&value.to_string(), Style::new().bold())
    );
}

/// Bulleted list item, e.g. `  • dev`.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Horizontal rule separator.
pub fn rule() {
    println!("{}", tint(&"─".repeat(RULE_WIDTH), Style::new().dim()));
}

/// A path, cyan, for inline use.
pub fn path(p: &str) -> String {
    tint(p, Style::new().cyan())
}

/// A runnable command, green, for inline use.
pub fn cmd(c: &str) -> String {
    tint(c, Style::new().green())
}

/// A profile or environment name, cyan, for inline use.
pub fn name(n: &str) -> String {
    tint(n, Style::new().cyan())
}

/// Open a `Label... ` progress line; close it with [`progress_done`].
pub fn progress(label: &str) {
    print!("{}... ", tint(label, Style::new().dim()));
    let _ = io::stdout().flush();
}

/// Close a progress line with `ok` or `failed`.
pub fn progress_done(success: bool) {
    if success {
        println!("{}", tint("ok", Style::new().green()));
    } else {
        println!("{}", tint("failed", Style::new().red()));
    }
}

/// Dimmed secondary message, e.g. `no profiles yet`.
pub fn dimmed(msg: &str) {
    println!("{}", tint(msg, Style::new().dim()));
}

/// Blank line, bold title, rule. Opens a block of `kv` lines.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
