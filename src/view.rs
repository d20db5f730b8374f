//! Derived state for the list and detail views.
//!
//! Both views borrow the store and recompute everything from their inputs on
//! each call, so what is drawn always reflects the latest query or route.

use crate::project::{Project, TaskStats};
use crate::route::Route;
use crate::store::ProjectStore;

pub const LIST_TITLE: &str = "Project Dashboard - Manage Your Projects";
pub const NOT_FOUND_TITLE: &str = "Project Not Found - Project Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
}

/// What to show when the filtered list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState<'q> {
    /// The store itself has no projects.
    NoProjects,
    NoMatches { query: &'q str },
}

impl EmptyState<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoProjects => "No projects yet",
            Self::NoMatches { .. } => "No projects found",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoProjects => {
                "Get started by creating your first project to begin managing your work.".to_string()
            }
            Self::NoMatches { query } => format!(
                "No projects match \"{query}\". Try a different search term or clear your search."
            ),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoProjects => None,
            Self::NoMatches { .. } => {
                Some("Try searching by project name, description, or team member")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListView<'a> {
    store: &'a ProjectStore,
    query: String,
    selected: usize,
}

impl<'a> ListView<'a> {
    pub fn new(store: &'a ProjectStore) -> Self {
        Self {
            store,
            query: String::new(),
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SearchState {
        if self.query.trim().is_empty() {
            SearchState::Idle
        } else {
            SearchState::Searching
        }
    }

    /// Replaces the whole query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clamp_selection();
    }

    pub fn push_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_char(&mut self) {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    pub fn projects(&self) -> Vec<&'a Project> {
        self.store.filter_projects(&self.query)
    }

    pub fn count(&self) -> usize {
        self.projects().len()
    }

    pub fn empty_state(&self) -> Option<EmptyState<'_>> {
        if self.count() > 0 {
            return None;
        }
        Some(match self.state() {
            SearchState::Idle => EmptyState::NoProjects,
            SearchState::Searching => EmptyState::NoMatches { query: &self.query },
        })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.count() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_project(&self) -> Option<&'a Project> {
        self.projects().get(self.selected).copied()
    }

    /// Route to the selected project, if any is visible.
    pub fn open_selected(&self) -> Option<Route> {
        self.selected_project().map(|p| Route::project(p.id.clone()))
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.count().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailView<'a> {
    Found { project: &'a Project, stats: TaskStats },
    NotFound,
}

impl<'a> DetailView<'a> {
    pub fn resolve(store: &'a ProjectStore, id: Option<&str>) -> Self {
        match id.and_then(|id| store.get_project_by_id(id)) {
            Some(project) => Self::Found {
                project,
                stats: project.task_stats(),
            },
            None => Self::NotFound,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Found { project, .. } => format!("{} - Project Dashboard", project.name),
            Self::NotFound => NOT_FOUND_TITLE.to_string(),
        }
    }

    /// The single action offered by the not-found state.
    pub fn back_route() -> Route {
        Route::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ProjectStore {
        ProjectStore::reference().unwrap()
    }

    #[test]
    fn starts_idle_with_everything() {
        let store = store();
        let view = ListView::new(&store);
        assert_eq!(view.state(), SearchState::Idle);
        assert_eq!(view.count(), 6);
        assert_eq!(view.empty_state(), None);
    }

    #[test]
    fn typing_switches_to_searching() {
        let store = store();
        let mut view = ListView::new(&store);
        for c in "website".chars() {
            view.push_char(c);
        }
        assert_eq!(view.state(), SearchState::Searching);
        assert_eq!(view.count(), 1);
        assert_eq!(view.projects()[0].name, "Website Redesign");

        view.clear_query();
        assert_eq!(view.state(), SearchState::Idle);
        assert_eq!(view.count(), 6);
    }

    #[test]
    fn whitespace_query_is_idle() {
        let store = store();
        let mut view = ListView::new(&store);
        view.set_query("   ");
        assert_eq!(view.state(), SearchState::Idle);
        assert_eq!(view.count(), 6);
    }

    #[test]
    fn count_tracks_filter_on_every_keystroke() {
        let store = store();
        let mut view = ListView::new(&store);
        for c in "mobile".chars() {
            view.push_char(c);
            assert_eq!(view.count(), store.filter_projects(view.query()).len());
        }
        while !view.query().is_empty() {
            view.pop_char();
            assert_eq!(view.count(), store.filter_projects(view.query()).len());
        }
    }

    #[test]
    fn no_match_message_quotes_query() {
        let store = store();
        let mut view = ListView::new(&store);
        view.set_query("nonexistent project xyz");
        let empty = view.empty_state().unwrap();
        assert_eq!(
            empty,
            EmptyState::NoMatches {
                query: "nonexistent project xyz"
            }
        );
        assert_eq!(empty.title(), "No projects found");
        assert!(empty.message().contains("nonexistent project xyz"));
        assert!(empty.hint().is_some());
    }

    #[test]
    fn empty_store_shows_no_projects_yet() {
        let store = ProjectStore::new(Vec::new()).unwrap();
        let view = ListView::new(&store);
        let empty = view.empty_state().unwrap();
        assert_eq!(empty, EmptyState::NoProjects);
        assert_eq!(empty.title(), "No projects yet");
        assert_eq!(empty.hint(), None);
        assert_eq!(view.open_selected(), None);
    }

    #[test]
    fn selection_is_clamped_to_results() {
        let store = store();
        let mut view = ListView::new(&store);
        for _ in 0..10 {
            view.select_next();
        }
        assert_eq!(view.selected(), 5);
        view.set_query("api");
        assert_eq!(view.selected(), view.count() - 1);
        view.select_previous();
        view.select_previous();
        view.select_previous();
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn open_selected_routes_to_project() {
        let store = store();
        let mut view = ListView::new(&store);
        view.select_next();
        assert_eq!(view.open_selected(), Some(Route::project("2")));
        view.set_query("security");
        assert_eq!(view.open_selected(), Some(Route::project("5")));
    }

    #[test]
    fn detail_resolves_known_project() {
        let store = store();
        match DetailView::resolve(&store, Some("1")) {
            DetailView::Found { project, stats } => {
                assert_eq!(project.name, "Website Redesign");
                assert_eq!(stats.total, 4);
                assert_eq!(stats.completed, 1);
                assert_eq!(stats.in_progress, 1);
                assert_eq!(stats.todo, 1);
            }
            DetailView::NotFound => panic!("project 1 should resolve"),
        }
    }

    #[test]
    fn detail_not_found_for_missing_or_absent_id() {
        let store = store();
        assert_eq!(DetailView::resolve(&store, Some("does-not-exist")), DetailView::NotFound);
        assert_eq!(DetailView::resolve(&store, None), DetailView::NotFound);
        assert_eq!(DetailView::NotFound.title(), NOT_FOUND_TITLE);
        assert_eq!(DetailView::back_route(), Route::List);
    }

    #[test]
    fn detail_title_names_project() {
        let store = store();
        let view = DetailView::resolve(&store, Some("3"));
        assert_eq!(view.title(), "API Integration - Project Dashboard");
    }
}
