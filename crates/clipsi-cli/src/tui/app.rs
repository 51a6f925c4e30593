//! Application state and logic

use std::time::{Duration, Instant};

use clipsi_core::{BookmarkError, LinkView, NewLink, Selection, Session};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Live search (after pressing /)
    Search,
    /// Modal form is open
    Form,
    /// Waiting for y/n on a destructive action
    Confirm,
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Categories,
    Links,
    Detail,
}

impl ActivePane {
    /// Move to the next pane (wrapping)
    pub fn next(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Links,
            ActivePane::Links => ActivePane::Detail,
            ActivePane::Detail => ActivePane::Categories,
        }
    }

    /// Move to the previous pane (wrapping)
    pub fn prev(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Detail,
            ActivePane::Links => ActivePane::Categories,
            ActivePane::Detail => ActivePane::Links,
        }
    }
}

/// The two forms the modal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Category,
    Link,
}

/// One text input in a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// Modal form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    /// Modal title
    pub title: String,
    pub fields: Vec<FormField>,
    /// Index of the focused field
    pub focus: usize,
    /// Validation message from the last submit
    pub error: Option<String>,
}

impl Form {
    fn category() -> Self {
        Self {
            kind: FormKind::Category,
            title: "New category".to_string(),
            fields: vec![FormField::new("Name")],
            focus: 0,
            error: None,
        }
    }

    fn link(category: &str) -> Self {
        Self {
            kind: FormKind::Link,
            title: format!("Add link to: {}", category),
            fields: vec![
                FormField::new("Name"),
                FormField::new("URL"),
                FormField::new("Description"),
            ],
            focus: 0,
            error: None,
        }
    }

    fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Move focus to the next field (wrapping)
    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Move focus to the previous field (wrapping)
    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }
}

/// Destructive action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteCategory(String),
    DeleteLink { id: String, name: String },
    ClearAll,
}

impl PendingAction {
    /// Question shown in the confirm dialog
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteCategory(name) => {
                format!("Delete category \"{}\" and all of its links?", name)
            }
            PendingAction::DeleteLink { name, .. } => format!("Delete link \"{}\"?", name),
            PendingAction::ClearAll => "Delete every saved category and link?".to_string(),
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Which pane has focus
    pub active_pane: ActivePane,
    /// Category rows: "All" first, then every category name
    pub categories: Vec<String>,
    /// Highlighted row in the categories pane
    pub category_index: usize,
    /// Links for the current selection and search
    pub links: Vec<LinkView>,
    /// Currently highlighted link index
    pub link_index: usize,
    /// Heading for the links pane
    pub title: String,
    /// Search text being typed
    pub search_input: String,
    /// Open modal form
    pub form: Option<Form>,
    /// Action awaiting y/n
    pub pending: Option<PendingAction>,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
}

/// Label of the pseudo-category showing every link
pub const ALL_LABEL: &str = "All";

impl App {
    /// Create a new app showing every link
    pub fn new(session: &Session) -> Self {
        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            active_pane: ActivePane::Categories,
            categories: Vec::new(),
            category_index: 0,
            links: Vec::new(),
            link_index: 0,
            title: String::new(),
            search_input: String::new(),
            form: None,
            pending: None,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
        };
        app.refresh(session);
        app
    }

    /// Rebuild every derived list from the session
    pub fn refresh(&mut self, session: &Session) {
        self.categories = std::iter::once(ALL_LABEL.to_string())
            .chain(session.store().categories().iter().map(|c| c.name.clone()))
            .collect();
        self.category_index = self.category_index.min(self.categories.len() - 1);

        self.links = session.visible_links();
        self.link_index = self.link_index.min(self.links.len().saturating_sub(1));
        self.title = session.title().to_string();
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Show an error until the next key press
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get the currently highlighted link
    pub fn current_link(&self) -> Option<&LinkView> {
        self.links.get(self.link_index)
    }

    /// Category name under the cursor, `None` for the "All" row
    pub fn highlighted_category(&self) -> Option<&str> {
        match self.category_index {
            0 => None,
            i => self.categories.get(i).map(String::as_str),
        }
    }

    // ==================== Navigation ====================

    /// Move selection up in the current pane
    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Categories => {
                self.category_index = self.category_index.saturating_sub(1);
            }
            ActivePane::Links | ActivePane::Detail => {
                self.link_index = self.link_index.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the current pane
    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Categories => {
                if self.category_index < self.categories.len().saturating_sub(1) {
                    self.category_index += 1;
                }
            }
            ActivePane::Links | ActivePane::Detail => {
                if self.link_index < self.links.len().saturating_sub(1) {
                    self.link_index += 1;
                }
            }
        }
    }

    /// Move focus to the next pane
    pub fn next_pane(&mut self) {
        self.active_pane = self.active_pane.next();
    }

    /// Move focus to the previous pane
    pub fn prev_pane(&mut self) {
        self.active_pane = self.active_pane.prev();
    }

    /// Select the highlighted category row
    pub fn select_highlighted(&mut self, session: &mut Session) {
        match self.highlighted_category().map(str::to_string) {
            None => session.select_all(),
            Some(name) => {
                if let Err(e) = session.select(&name) {
                    self.set_error(e.to_string());
                    return;
                }
            }
        }
        self.link_index = 0;
        self.active_pane = ActivePane::Links;
        self.refresh(session);
    }

    /// Move the category cursor to whatever the session has selected
    fn sync_category_index(&mut self, session: &Session) {
        self.category_index = match session.selection() {
            Selection::All => 0,
            Selection::Category(name) => self
                .categories
                .iter()
                .position(|c| c == name)
                .unwrap_or(0),
        };
    }

    // ==================== Search ====================

    /// Enter live search mode, starting from the current term
    pub fn enter_search_mode(&mut self, session: &Session) {
        self.input_mode = InputMode::Search;
        self.search_input = session.search().to_string();
    }

    /// Type into the search box, filtering as it changes
    pub fn search_insert(&mut self, session: &mut Session, c: char) {
        self.search_input.push(c);
        self.apply_search(session);
    }

    pub fn search_delete(&mut self, session: &mut Session) {
        self.search_input.pop();
        self.apply_search(session);
    }

    /// Leave search mode keeping the filter
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and drop the filter
    pub fn cancel_search(&mut self, session: &mut Session) {
        self.search_input.clear();
        self.apply_search(session);
        self.input_mode = InputMode::Normal;
    }

    fn apply_search(&mut self, session: &mut Session) {
        session.set_search(self.search_input.clone());
        self.link_index = 0;
        self.refresh(session);
    }

    // ==================== Forms ====================

    /// Open the new-category form
    pub fn open_category_form(&mut self) {
        self.form = Some(Form::category());
        self.input_mode = InputMode::Form;
    }

    /// Open the new-link form, only when a category is selected
    pub fn open_link_form(&mut self, session: &Session) {
        match session.selection().category() {
            Some(category) => {
                self.form = Some(Form::link(category));
                self.input_mode = InputMode::Form;
            }
            None => self.set_status("Select a category to add a link."),
        }
    }

    /// Close the form without saving
    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Submit the open form
    ///
    /// Validation failures keep the form open with the message shown inside
    /// it; storage failures close the form and raise an error modal.
    pub fn submit_form(&mut self, session: &mut Session) {
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let result = match form.kind {
            FormKind::Category => session
                .add_category(form.value("Name"))
                .map(|c| format!("Created category '{}'", c.name)),
            FormKind::Link => {
                let input = NewLink::new(form.value("URL"))
                    .name(form.value("Name"))
                    .desc(form.value("Description"));
                session
                    .add_link(input)
                    .map(|l| format!("Added '{}'", l.name))
            }
        };

        match result {
            Ok(message) => {
                self.close_form();
                self.set_status(message);
                self.refresh(session);
            }
            Err(e) if e.is_validation() => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
            Err(e) => {
                self.close_form();
                self.report(e);
            }
        }
    }

    // ==================== Destructive actions ====================

    /// Ask to delete whatever is under the cursor in the focused pane
    pub fn request_delete(&mut self) {
        let action = match self.active_pane {
            ActivePane::Categories => self
                .highlighted_category()
                .map(|name| PendingAction::DeleteCategory(name.to_string())),
            ActivePane::Links | ActivePane::Detail => {
                self.current_link().map(|view| PendingAction::DeleteLink {
                    id: view.link.id.clone(),
                    name: view.link.name.clone(),
                })
            }
        };

        match action {
            Some(action) => {
                self.pending = Some(action);
                self.input_mode = InputMode::Confirm;
            }
            None => self.set_status("Nothing to delete here."),
        }
    }

    /// Ask to delete everything
    pub fn request_clear(&mut self) {
        self.pending = Some(PendingAction::ClearAll);
        self.input_mode = InputMode::Confirm;
    }

    /// Answer the pending confirmation
    pub fn resolve_pending(&mut self, session: &mut Session, confirmed: bool) {
        self.input_mode = InputMode::Normal;
        let Some(action) = self.pending.take() else {
            return;
        };
        if !confirmed {
            self.set_status("Cancelled");
            return;
        }

        let result = match &action {
            PendingAction::DeleteCategory(name) => session
                .remove_category(name)
                .map(|_| format!("Deleted category '{}'", name)),
            PendingAction::DeleteLink { id, name } => session
                .remove_link_by_id(id)
                .map(|_| format!("Deleted '{}'", name)),
            PendingAction::ClearAll => session
                .clear()
                .map(|_| "Cleared all categories and links".to_string()),
        };

        match result {
            Ok(message) => {
                self.set_status(message);
                self.refresh(session);
                self.sync_category_index(session);
            }
            Err(e) => self.report(e),
        }
    }

    // ==================== Links ====================

    /// Open the highlighted link in the browser
    pub fn open_current_link(&mut self) {
        let Some(view) = self.current_link() else {
            return;
        };
        let url = view.link.open_url();
        let name = view.link.name.clone();
        match open::that_detached(&url) {
            Ok(()) => self.set_status(format!("Opened '{}'", name)),
            Err(e) => self.set_status(format!("Failed to open: {}", e)),
        }
    }

    fn report(&mut self, err: BookmarkError) {
        let hint = match &err {
            BookmarkError::Storage(storage) => storage.recovery_suggestion(),
            _ => None,
        };
        match hint {
            Some(hint) => self.set_error(format!("{}\n\n{}", err, hint)),
            None => self.set_error(err.to_string()),
        }
    }
}
