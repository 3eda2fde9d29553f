//! Application state management.

use newsstand_core::{Directory, Entry, KeyValueStore, SubmitError, ViewMode};
use std::path::Path;

pub type Store = Box<dyn KeyValueStore>;

/// Command that opens a URL in the user's browser.
#[cfg(target_os = "macos")]
pub const DEFAULT_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Browsing the directory.
    Browsing,
    /// Application should quit.
    Quit,
}

/// Input mode for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Typing into the search field.
    Search,
    /// Filling in the add-entry form.
    AddForm,
}

/// Field of the add-entry form that receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Website,
    Category,
    Logo,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Website,
        FormField::Category,
        FormField::Logo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Website => "Website",
            FormField::Category => "Category",
            FormField::Logo => "Logo file (optional)",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Website,
            FormField::Website => FormField::Category,
            FormField::Category => FormField::Logo,
            FormField::Logo => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Logo,
            FormField::Website => FormField::Name,
            FormField::Category => FormField::Website,
            FormField::Logo => FormField::Category,
        }
    }
}

/// Contents of the add-entry form.
#[derive(Debug, Clone)]
pub struct AddForm {
    pub name: String,
    pub website: String,
    pub category: String,
    pub logo: String,
    pub focus: FormField,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            website: String::new(),
            category: "national".to_string(),
            logo: String::new(),
            focus: FormField::Name,
        }
    }
}

impl AddForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Website => &self.website,
            FormField::Category => &self.category,
            FormField::Logo => &self.logo,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Website => &mut self.website,
            FormField::Category => &mut self.category,
            FormField::Logo => &mut self.logo,
        }
    }
}

/// A message shown in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// Main application model.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Catalog, favorites and filters.
    pub directory: Directory<Store>,
    /// Index of the active category tab.
    pub category_index: usize,
    /// Index of the highlighted entry in the visible list.
    pub selected_index: usize,
    /// Search field contents.
    pub search_input: String,
    /// Add-entry form contents.
    pub form: AddForm,
    /// Last status message.
    pub status: Option<Status>,
    /// Program launched with an entry's website as its only argument.
    pub opener: String,
}

impl App {
    /// Create a new application instance.
    pub fn new(directory: Directory<Store>) -> Self {
        let status = directory.load_error().map(|e| Status {
            text: format!("Error loading catalog: {e}"),
            is_error: true,
        });

        Self {
            state: AppState::Browsing,
            input_mode: InputMode::Normal,
            directory,
            category_index: 0,
            selected_index: 0,
            search_input: String::new(),
            form: AddForm::default(),
            status,
            opener: DEFAULT_OPENER.to_string(),
        }
    }

    pub fn visible(&self) -> &[Entry] {
        self.directory.visible()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.visible().get(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move selection up in the list.
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down in the list.
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible().len() {
            self.selected_index += 1;
        }
    }

    /// Activate the category tab `offset` steps away, wrapping around.
    pub fn cycle_category(&mut self, offset: isize) {
        let categories = self.directory.categories();
        let len = categories.len() as isize;
        let index = (self.category_index as isize + offset).rem_euclid(len) as usize;
        self.select_category(index);
    }

    /// Activate the category tab at `index`.
    pub fn select_category(&mut self, index: usize) {
        let categories = self.directory.categories();
        let Some(category) = categories.get(index) else {
            return;
        };
        self.category_index = index;
        self.directory.set_category(category);
        self.selected_index = 0;
    }

    /// Switch to the favorites view.
    pub fn show_favorites(&mut self) {
        self.directory.show_favorites();
        self.selected_index = 0;
    }

    /// Toggle the favorite state of the highlighted entry.
    pub fn toggle_selected_favorite(&mut self) {
        let Some(name) = self.selected_entry().map(|e| e.name.clone()) else {
            return;
        };
        let now = self.directory.toggle_favorite(&name);
        tracing::debug!("Favorite {:?} -> {}", name, now);
        self.clamp_selection();
    }

    /// Open the highlighted entry's website in the browser.
    pub fn open_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let url = entry.website.clone();

        self.status = Some(match std::process::Command::new(&self.opener).arg(&url).spawn() {
            Ok(mut child) => {
                tracing::debug!("Opening {} with {}", url, self.opener);
                std::thread::spawn(move || child.wait());
                Status {
                    text: format!("Opening {url}"),
                    is_error: false,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to open URL {}: {}", url, e);
                Status {
                    text: format!("Failed to open {url}: {e}"),
                    is_error: true,
                }
            }
        });
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.directory.toggle_theme();
        tracing::debug!("Theme switched to {}", theme.as_str());
    }

    /// Start search mode.
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn in_favorites_view(&self) -> bool {
        self.directory.view() == ViewMode::Favorites
    }

    /// Leave search mode, keeping the term.
    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        self.apply_search();
    }

    pub fn search_pop(&mut self) {
        self.search_input.pop();
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.directory.set_search(&self.search_input);
        self.selected_index = 0;
    }

    /// Open the add-entry form.
    pub fn start_add(&mut self) {
        self.form = AddForm::default();
        self.input_mode = InputMode::AddForm;
    }

    pub fn cancel_add(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn form_push(&mut self, c: char) {
        self.form.focused_mut().push(c);
    }

    pub fn form_pop(&mut self) {
        self.form.focused_mut().pop();
    }

    pub fn form_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
    }

    pub fn form_prev_field(&mut self) {
        self.form.focus = self.form.focus.prev();
    }

    /// Submit the form. The form stays open when the submission is rejected.
    pub fn submit_form(&mut self) {
        let messages = self.directory.language().messages();
        let logo = self.form.logo.trim();
        let logo = (!logo.is_empty()).then(|| Path::new(logo));

        match self
            .directory
            .add_entry(&self.form.name, &self.form.website, &self.form.category, logo)
        {
            Ok(entry) => {
                tracing::info!("Submitted {:?}", entry.name);
                self.status = Some(Status {
                    text: messages.added.to_string(),
                    is_error: false,
                });
                self.form = AddForm::default();
                self.input_mode = InputMode::Normal;
                self.clamp_selection();
            }
            Err(SubmitError::Invalid(errors)) => {
                self.status = Some(Status {
                    text: messages.validation_report(&errors).replace('\n', " · "),
                    is_error: true,
                });
            }
            Err(e) => {
                tracing::error!("Error adding entry: {}", e);
                self.status = Some(Status {
                    text: format!("{}: {}", messages.add_failed, e),
                    is_error: true,
                });
            }
        }
    }
}
