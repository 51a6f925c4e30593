//! Category command handlers

use anyhow::Result;

use clipsi_core::{BookmarkError, Session};

use super::report;
use crate::output::Output;
use crate::prompt::{confirm, require_prompt};

/// Create a new category
pub fn add(session: &mut Session, name: String, output: &Output) -> Result<()> {
    let category = session.add_category(&name).map_err(report)?;
    output.success(&format!("Created category: {}", category.name));
    Ok(())
}

/// List categories with link counts
pub fn list(session: &Session, output: &Output) -> Result<()> {
    output.print_categories(session.store().categories());
    Ok(())
}

/// Delete a category and every link in it
pub fn delete(session: &mut Session, name: String, yes: bool, output: &Output) -> Result<()> {
    let Some(category) = session.store().category(&name) else {
        return Err(report(BookmarkError::CategoryNotFound(
            name.trim().to_string(),
        )));
    };

    if !yes {
        require_prompt(output)?;
        println!(
            "Delete category '{}' and its {} link(s)?",
            category.name,
            category.links.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if let Some(removed) = session.remove_category(&name).map_err(report)? {
        output.success(&format!(
            "Deleted category: {} ({} link(s))",
            removed.name,
            removed.links.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clipsi_core::{Config, Store};
    use tempfile::TempDir;

    fn test_session(temp_dir: &TempDir) -> Session {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            seed_sample: false,
            log_file: None,
        };
        Session::new(Store::open_with_config(config).unwrap())
    }

    #[test]
    fn test_quiet_delete_requires_yes() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);
        session.add_category("Docs").unwrap();
        let quiet = Output::new(OutputFormat::Quiet);

        assert!(delete(&mut session, "Docs".to_string(), false, &quiet).is_err());
        assert_eq!(session.store().category_count(), 1);

        delete(&mut session, "docs".to_string(), true, &quiet).unwrap();
        assert_eq!(session.store().category_count(), 0);
    }

    #[test]
    fn test_delete_unknown_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);

        let err = delete(
            &mut session,
            " Missing ".to_string(),
            true,
            &Output::new(OutputFormat::Quiet),
        )
        .unwrap_err();
        let expected = BookmarkError::CategoryNotFound("Missing".to_string()).to_string();
        assert_eq!(err.to_string(), expected);
    }
}
