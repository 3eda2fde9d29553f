//! The directory controller.
//!
//! Owns the catalog, favorites, filter state and the key-value store. Front
//! ends call these operations and re-render from [`Directory::visible`].

use crate::catalog::{self, CatalogSource};
use crate::error::SubmitError;
use crate::favorites::FavoritesStore;
use crate::icon::{resolve_icon, IconSettings, UploadRegistry};
use crate::models::{Entry, Filter, Language, Theme, ViewMode};
use crate::storage::{KeyValueStore, THEME_KEY};
use crate::submission::{validate, UserEntries};
use std::path::Path;

pub struct Directory<S: KeyValueStore> {
    language: Language,
    store: S,
    icons: IconSettings,
    uploads: UploadRegistry,
    entries: Vec<Entry>,
    user: UserEntries,
    favorites: FavoritesStore,
    filter: Filter,
    view: ViewMode,
    theme: Theme,
    visible: Vec<Entry>,
    load_error: Option<String>,
}

impl<S: KeyValueStore> Directory<S> {
    /// Load the static catalog, merge the persisted user entries and derive
    /// the initial view.
    ///
    /// A failed load is logged and leaves the whole catalog empty; stored
    /// user entries are only merged into a successfully loaded catalog.
    pub fn open(source: &dyn CatalogSource, language: Language, store: S, icons: IconSettings) -> Self {
        let user = UserEntries::load(&store, language);
        let favorites = FavoritesStore::load(&store);
        let theme = match store.get(THEME_KEY) {
            Ok(value) => value.map(|v| Theme::from_stored(&v)).unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }
        };

        let (entries, load_error) = match catalog::load(source, language) {
            Ok(static_entries) => (catalog::merge(static_entries, user.entries()), None),
            Err(e) => {
                tracing::error!("Error loading catalog from {}: {}", source.describe(), e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let mut directory = Self {
            language,
            store,
            icons,
            uploads: UploadRegistry::new(),
            entries,
            user,
            favorites,
            filter: Filter::default(),
            view: ViewMode::default(),
            theme,
            visible: Vec::new(),
            load_error,
        };
        directory.refresh();
        directory
    }

    fn refresh(&mut self) {
        self.visible = match self.view {
            ViewMode::Filtered => {
                catalog::derive_visible(&self.entries, &self.filter.category, &self.filter.search)
            }
            ViewMode::Favorites => catalog::derive_favorites_view(&self.entries, self.favorites.names()),
        };
    }

    /// Select a category and return to the filtered view.
    pub fn set_category(&mut self, category: &str) {
        self.filter.category = category.to_lowercase();
        self.view = ViewMode::Filtered;
        self.refresh();
    }

    /// Update the search term and return to the filtered view.
    pub fn set_search(&mut self, search: &str) {
        self.filter.search = search.to_string();
        self.view = ViewMode::Filtered;
        self.refresh();
    }

    /// Show only favorited entries.
    pub fn show_favorites(&mut self) {
        self.view = ViewMode::Favorites;
        self.refresh();
    }

    /// Flip the favorite state of `name` and return the new state.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let now = self.favorites.toggle(name, &mut self.store);
        if self.view == ViewMode::Favorites {
            self.refresh();
        }
        now
    }

    /// Validate, resolve the icon and append a user entry.
    pub fn add_entry(
        &mut self,
        name: &str,
        website: &str,
        kind: &str,
        logo: Option<&Path>,
    ) -> Result<Entry, SubmitError> {
        let input = validate(name, website, kind).map_err(SubmitError::Invalid)?;
        let icon = resolve_icon(logo, &input.website, &self.icons, &mut self.uploads);
        let entry = self.user.submit(input, icon, &mut self.store)?;

        self.entries.push(entry.clone());
        self.refresh();
        Ok(entry)
    }

    /// Switch between light and dark and persist the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            tracing::warn!("Failed to persist theme: {}", e);
        }
        self.theme
    }

    pub fn visible(&self) -> &[Entry] {
        &self.visible
    }

    /// True when the current view has nothing to show.
    pub fn is_empty_result(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.entries)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.is_favorite(name)
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn icons(&self) -> &IconSettings {
        &self.icons
    }

    pub fn uploads(&self) -> &UploadRegistry {
        &self.uploads
    }

    /// Why the static catalog could not be loaded, if it could not.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
