//! Clear command handler

use anyhow::Result;

use clipsi_core::Session;

use super::report;
use crate::output::Output;
use crate::prompt::{confirm, require_prompt};

/// Delete every category and link
pub fn clear(session: &mut Session, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        require_prompt(output)?;
        println!(
            "Delete all {} categories and {} link(s) saved in {}?",
            session.store().category_count(),
            session.store().link_count(),
            session.store().persistence().path().display()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session.clear().map_err(report)?;
    output.success("Cleared all categories and links");
    Ok(())
}
