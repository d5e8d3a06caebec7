use std::fmt;

use colored::Colorize;

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "INFO:".cyan().bold(), message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    println!("{} {}", "ERROR:".red().bold(), message);
}

pub fn section(title: impl fmt::Display) {
    println!("\n=== {} ===", title.to_string().trim());
}
