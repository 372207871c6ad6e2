//! Tagged terminal output for check diagnostics
//!
//! Informational lines go to stdout, warnings and failures to stderr.
//! The bracket tags are stable text; color is decoration on top so the
//! output stays greppable when piped.

use colored::Colorize;

/// Print a stage banner before a group of checks
pub fn stage(title: &str) {
    banner(&format!("Stage: {title}"));
}

pub fn banner(title: &str) {
    println!();
    println!("{}", format!("=== {title} ===").bold());
}

pub fn ok(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn fail(msg: &str) {
    eprintln!("{} {}", "[FAIL]".red().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", "[INFO]".cyan(), msg);
}

pub fn skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}
