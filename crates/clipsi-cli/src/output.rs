//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use clipsi_core::{Category, LinkView};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single link with its category
    pub fn print_link(&self, view: &LinkView) {
        match self.format {
            OutputFormat::Human => {
                let link = &view.link;
                println!("ID:          {}", link.id);
                println!("Name:        {}", link.name);
                println!("URL:         {}", link.url);
                println!("Category:    {}", view.category);
                if !link.desc.is_empty() {
                    println!("Description: {}", link.desc);
                }
                println!("Opens:       {}", link.open_url());
            }
            OutputFormat::Json => print_json(view),
            OutputFormat::Quiet => {
                println!("{}", view.link.id);
            }
        }
    }

    /// Print a list of links under a heading
    pub fn print_links(&self, title: &str, links: &[LinkView]) {
        match self.format {
            OutputFormat::Human => {
                println!("── {} ──", title);
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for view in links {
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&view.link.id),
                        truncate(&view.link.name, 30),
                        truncate(&view.link.url, 40),
                        view.category
                    );
                    if !view.link.desc.is_empty() {
                        println!("           {}", truncate_line(&view.link.desc, 70));
                    }
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => print_json(links),
            OutputFormat::Quiet => {
                for view in links {
                    println!("{}", view.link.id);
                }
            }
        }
    }

    /// Print categories with their link counts
    pub fn print_categories(&self, categories: &[Category]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories. Create one with `clipsi category add <name>`.");
                    return;
                }
                for category in categories {
                    println!("{} ({})", category.name, category.links.len());
                }
                println!("\n{} categories", categories.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|c| serde_json::json!({"name": c.name, "links": c.links.len()}))
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for category in categories {
                    println!("{}", category.name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Pretty-print a value as JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// First eight characters of an id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
