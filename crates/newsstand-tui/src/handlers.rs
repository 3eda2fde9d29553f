//! Keyboard event handling.

use crate::app::{App, AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.state = AppState::Quit;
        return true;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::AddForm => handle_form_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.cycle_category(-1);
            false
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.cycle_category(1);
            false
        }
        KeyCode::Char('/') => {
            app.start_search();
            false
        }
        KeyCode::Char('f') | KeyCode::Char(' ') => {
            app.toggle_selected_favorite();
            false
        }
        KeyCode::Char('v') => {
            app.show_favorites();
            false
        }
        KeyCode::Char('a') => {
            app.start_add();
            false
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            false
        }
        KeyCode::Enter => {
            app.open_selected();
            false
        }
        KeyCode::Esc => {
            // Back from favorites to the filtered view
            if app.in_favorites_view() {
                app.select_category(app.category_index);
            }
            false
        }
        _ => false,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.exit_search();
            false
        }
        KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char(c) => {
            app.search_push(c);
            false
        }
        KeyCode::Backspace => {
            app.search_pop();
            false
        }
        _ => false,
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.cancel_add();
            false
        }
        KeyCode::Enter => {
            app.submit_form();
            false
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form_next_field();
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_prev_field();
            false
        }
        KeyCode::Char(c) => {
            app.form_push(c);
            false
        }
        KeyCode::Backspace => {
            app.form_pop();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FormField, Store};
    use newsstand_core::{Directory, FileSource, IconSettings, Language, MemoryStore, ViewMode};

    const CATALOG: &str = r#"[
        {"name":"Dainik Bhaskar","website":"https://www.bhaskar.com","type":"national"},
        {"name":"Amar Ujala","website":"https://www.amarujala.com","type":"national"},
        {"name":"Khel Samachar","website":"https://khel.example","type":"sports"}
    ]"#;

    fn app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hi.json");
        std::fs::write(&path, CATALOG).unwrap();
        let store: Store = Box::new(MemoryStore::new());
        let directory = Directory::open(
            &FileSource::new(&path),
            Language::Hindi,
            store,
            IconSettings::default(),
        );
        App::new(directory)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_category_tabs_then_search_without_match() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.directory.filter().category, "sports");
        assert_eq!(app.visible().len(), 1);

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "xyz");
        assert!(app.directory.is_empty_result());
        assert!(app.selected_entry().is_none());

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.visible().len(), 1);
    }

    #[test]
    fn test_category_tabs_wrap_around() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.directory.filter().category, "sports");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.directory.filter().category, "all");
    }

    #[test]
    fn test_favorite_and_favorites_view() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('f'));
        assert!(app.directory.is_favorite("Amar Ujala"));

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.directory.view(), ViewMode::Favorites);
        assert_eq!(app.visible().len(), 1);

        press(&mut app, KeyCode::Char('f'));
        assert!(app.visible().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.directory.view(), ViewMode::Filtered);
        assert_eq!(app.visible().len(), 3);
    }

    #[test]
    fn test_add_form_reports_errors_and_stays_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus, FormField::Website);
        type_str(&mut app, "bad url");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::AddForm);
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains(Language::Hindi.messages().name_required));
        assert!(status.text.contains(Language::Hindi.messages().invalid_url));
    }

    #[test]
    fn test_add_form_submits_entry() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Naya Savera");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "https://example.com/news");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.visible().len(), 4);
        let added = &app.visible()[3];
        assert_eq!(added.kind, "national");
        assert!(added.image.as_deref().unwrap().ends_with("example.com"));
        assert!(!app.status.clone().unwrap().is_error);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Quit);
    }

    #[test]
    fn test_enter_launches_opener_with_website() {
        let mut app = app();
        app.opener = "true".to_string();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let status = app.status.clone().unwrap();
        assert!(!status.is_error);
        assert!(status.text.contains("https://www.amarujala.com"));
    }

    #[test]
    fn test_enter_reports_opener_failure() {
        let mut app = app();
        app.opener = "/nonexistent/newsstand-opener".to_string();
        press(&mut app, KeyCode::Enter);

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("https://www.bhaskar.com"));
    }
}
