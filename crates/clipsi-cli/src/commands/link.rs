//! Link command handlers

use anyhow::{bail, Context, Result};

use clipsi_core::{LinkView, NewLink, Session};

use super::report;
use crate::output::Output;
use crate::prompt::{confirm, require_prompt};

/// Add a link to a category
///
/// Without a category there is no selection and the add is rejected.
pub fn create(
    session: &mut Session,
    category: Option<String>,
    input: NewLink,
    output: &Output,
) -> Result<()> {
    if let Some(name) = category {
        session.select(&name).map_err(report)?;
    }

    let link = session.add_link(input).map_err(report)?;
    output.success(&format!("Created link: {}", link.id));
    if let Some(view) = session.store().find_link(&link.id) {
        output.print_link(&view);
    }
    Ok(())
}

/// List links in one category or all of them, optionally filtered
pub fn list(
    session: &mut Session,
    category: Option<String>,
    search: Option<String>,
    output: &Output,
) -> Result<()> {
    match category {
        Some(name) => session.select(&name).map_err(report)?,
        None => session.select_all(),
    }
    session.set_search(search.unwrap_or_default());

    let links = session.visible_links();
    output.print_links(session.title(), &links);
    Ok(())
}

/// Search links across every category
pub fn search(session: &mut Session, query: String, output: &Output) -> Result<()> {
    session.select_all();
    session.set_search(query.as_str());

    let links = session.visible_links();
    output.print_links(&format!("Search: {}", query.trim()), &links);
    Ok(())
}

/// Show a single link
pub fn show(session: &Session, id: String, output: &Output) -> Result<()> {
    let view = resolve_link(session, &id)?;
    output.print_link(&view);
    Ok(())
}

/// Open a link in the default browser
pub fn open(session: &Session, id: String, output: &Output) -> Result<()> {
    let view = resolve_link(session, &id)?;
    let url = view.link.open_url();

    open::that(&url).with_context(|| format!("Failed to open {}", url))?;

    output.success(&format!("Opened {}", url));
    Ok(())
}

/// Delete a link
pub fn delete(session: &mut Session, id: String, yes: bool, output: &Output) -> Result<()> {
    let view = resolve_link(session, &id)?;

    if !yes {
        require_prompt(output)?;
        println!("Delete link: {} - {}", view.link.id, view.link.name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session
        .remove_link_by_id(&view.link.id)
        .map_err(report)?;

    output.success(&format!("Deleted link: {}", view.link.id));
    Ok(())
}

/// Resolve a link from its full id or a unique prefix
fn resolve_link(session: &Session, id: &str) -> Result<LinkView> {
    if let Some(view) = session.store().find_link(id) {
        return Ok(view);
    }

    let mut matches = session.store().links_with_id_prefix(id);
    match matches.len() {
        0 => bail!("No link found matching: {}", id),
        1 => Ok(matches.remove(0)),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for view in &matches {
                eprintln!("  {} - {}", view.link.id, view.link.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn quiet() -> Output {
        Output::new(crate::output::OutputFormat::Quiet)
    }

    #[test]
    fn test_create_without_category_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);
        session.add_category("Docs").unwrap();

        let err = create(&mut session, None, NewLink::new("example.com"), &quiet()).unwrap_err();
        assert!(err.to_string().contains("Select a category"));
        assert_eq!(session.store().link_count(), 0);
    }

    #[test]
    fn test_create_in_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);
        session.add_category("Docs").unwrap();

        create(
            &mut session,
            Some("docs".to_string()),
            NewLink::new("wiki.example.com").name("Wiki"),
            &quiet(),
        )
        .unwrap();

        let links = session.store().visible_links(&clipsi_core::Selection::All, "");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].category, "Docs");
    }

    #[test]
    fn test_resolve_link_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);
        session.add_category("Docs").unwrap();
        session.select("Docs").unwrap();
        let link = session.add_link(NewLink::new("wiki.example.com")).unwrap();

        let view = resolve_link(&session, &link.id[..8]).unwrap();
        assert_eq!(view.link.id, link.id);
        assert!(resolve_link(&session, "zzzz-not-an-id").is_err());
    }

    #[test]
    fn test_quiet_delete_requires_yes() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = test_session(&temp_dir);
        session.add_category("Docs").unwrap();
        session.select("Docs").unwrap();
        let link = session.add_link(NewLink::new("wiki.example.com")).unwrap();

        let err = delete(&mut session, link.id.clone(), false, &quiet()).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert_eq!(session.store().link_count(), 1);

        delete(&mut session, link.id.clone(), true, &quiet()).unwrap();
        assert_eq!(session.store().link_count(), 0);
    }
}
