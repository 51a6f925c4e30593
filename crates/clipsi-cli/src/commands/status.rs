//! Status command handler

use anyhow::Result;

use clipsi_core::Session;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(session: &Session, output: &Output) -> Result<()> {
    let store = session.store();
    let persistence = store.persistence();
    let size = std::fs::metadata(persistence.path())
        .map(|m| m.len())
        .unwrap_or(0);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "store_file": persistence.path(),
                    "store_exists": persistence.exists(),
                    "store_size": size,
                    "counts": {
                        "categories": store.category_count(),
                        "links": store.link_count()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", persistence.path().display());
        }
        OutputFormat::Human => {
            println!("Clipsi Status");
            println!("=============");
            println!();
            println!("Storage:");
            println!("  File: {}", persistence.path().display());
            println!("  Size: {}", human_size(size));
            if persistence.backup_path().exists() {
                println!(
                    "  Unreadable data was preserved at {}",
                    persistence.backup_path().display()
                );
            }
            println!();
            println!("Contents:");
            println!("  Categories: {}", store.category_count());
            println!("  Links:      {}", store.link_count());
        }
    }

    Ok(())
}

/// Format a byte count for display
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
