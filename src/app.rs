//! Application state and key handling, independent of the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::route::Route;
use crate::store::ProjectStore;
use crate::ui;
use crate::view::{DetailView, ListView, LIST_TITLE};

pub struct App<'a> {
    store: &'a ProjectStore,
    route: Route,
    list: ListView<'a>,
    title: String,
    detail_scroll: u16,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(store: &'a ProjectStore, route: Route) -> Self {
        let mut app = Self {
            store,
            route: Route::List,
            list: ListView::new(store),
            title: LIST_TITLE.to_string(),
            detail_scroll: 0,
            should_quit: false,
        };
        app.navigate(route);
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn list(&self) -> &ListView<'a> {
        &self.list
    }

    pub fn detail(&self) -> DetailView<'a> {
        DetailView::resolve(self.store, self.route.project_id())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switches views. Entering the list starts a fresh search; leaving a
    /// detail view restores the list title.
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.route, to = %route, "navigate");
        self.route = route;
        self.detail_scroll = 0;
        if self.route.is_list() {
            self.list = ListView::new(self.store);
            self.title = LIST_TITLE.to_string();
        } else {
            self.title = self.detail().title();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.route.is_list() {
            self.handle_list_key(key);
        } else {
            self.handle_detail_key(key.code);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let typed = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
        match key.code {
            KeyCode::Char(c) if typed => self.list.push_char(c),
            KeyCode::Backspace => self.list.pop_char(),
            KeyCode::Up => self.list.select_previous(),
            KeyCode::Down => self.list.select_next(),
            KeyCode::Enter => {
                if let Some(route) = self.list.open_selected() {
                    self.navigate(route);
                }
            }
            KeyCode::Esc => {
                if self.list.query().is_empty() {
                    self.should_quit = true;
                } else {
                    self.list.clear_query();
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.navigate(DetailView::back_route())
            }
            // "Back to Projects" is the only action on the not-found screen
            KeyCode::Enter if self.detail() == DetailView::NotFound => {
                self.navigate(DetailView::back_route())
            }
            KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1).min(self.max_detail_scroll())
            }
            _ => {}
        }
    }

    /// Last scroll offset that still leaves a task pane line on screen.
    fn max_detail_scroll(&self) -> u16 {
        let lines = match self.detail() {
            DetailView::Found { project, stats } => ui::task_pane_lines(project, stats).len(),
            DetailView::NotFound => 0,
        };
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NOT_FOUND_TITLE;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_filters_the_list() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        type_text(&mut app, "website");
        assert_eq!(app.list().query(), "website");
        assert_eq!(app.list().count(), 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.list().query(), "websit");
    }

    #[test]
    fn q_is_search_text_on_the_list() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.list().query(), "q");
    }

    #[test]
    fn enter_opens_selected_project() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        type_text(&mut app, "migration");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route(), &Route::project("4"));
        assert_eq!(app.title(), "Database Migration - Project Dashboard");
    }

    #[test]
    fn enter_with_no_results_stays_on_list() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        type_text(&mut app, "nonexistent project xyz");
        press(&mut app, KeyCode::Enter);
        assert!(app.route().is_list());
    }

    #[test]
    fn back_resets_title_and_search() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        type_text(&mut app, "api");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route(), &Route::project("3"));
        press(&mut app, KeyCode::Esc);
        assert!(app.route().is_list());
        assert_eq!(app.title(), LIST_TITLE);
        assert_eq!(app.list().query(), "");
    }

    #[test]
    fn esc_clears_query_before_quitting() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        type_text(&mut app, "web");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list().query(), "");
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn unknown_project_shows_not_found() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::parse("/project/does-not-exist"));
        assert_eq!(app.detail(), DetailView::NotFound);
        assert_eq!(app.title(), NOT_FOUND_TITLE);
        press(&mut app, KeyCode::Enter);
        assert!(app.route().is_list());
    }

    #[test]
    fn unknown_path_shows_not_found() {
        let store = ProjectStore::reference().unwrap();
        let app = App::new(&store, Route::parse("/nowhere"));
        assert_eq!(app.detail(), DetailView::NotFound);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::project("1"));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn detail_scroll_saturates() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::project("1"));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.detail_scroll(), 0);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll(), 2);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.detail_scroll(), 0);
    }

    #[test]
    fn detail_scroll_stops_at_last_task_line() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::project("1"));
        for _ in 0..100 {
            press(&mut app, KeyCode::Down);
        }
        // header, blank line, four lines per task
        assert_eq!(app.detail_scroll(), 2 + 4 * 4 - 1);
    }

    #[test]
    fn not_found_screen_does_not_scroll() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::project("missing"));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll(), 0);
    }

    #[test]
    fn modifier_chords_are_not_typed() {
        let store = ProjectStore::reference().unwrap();
        let mut app = App::new(&store, Route::List);
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.list().query(), "");
        app.handle_key(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT));
        assert_eq!(app.list().query(), "W");
        assert!(!app.should_quit());
    }
}
