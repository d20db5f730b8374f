//! Navigation paths between the list and detail views.

use std::fmt;

const PROJECT_PREFIX: &str = "/project/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`
    #[default]
    List,
    /// `/project/{id}`
    Project(String),
    /// Any other path.
    NotFound(String),
}

impl Route {
    pub fn project(id: impl Into<String>) -> Self {
        Self::Project(id.into())
    }

    pub fn parse(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            return Self::List;
        }
        match path.strip_prefix(PROJECT_PREFIX) {
            Some(id) if !id.contains('/') => Self::Project(id.to_string()),
            _ => Self::NotFound(path.to_string()),
        }
    }

    /// The `projectId` parameter, absent for non-detail routes and for `/project/`.
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Project(id) if !id.is_empty() => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("/"),
            Self::Project(id) => write!(f, "{PROJECT_PREFIX}{id}"),
            Self::NotFound(path) => f.write_str(path),
        }
    }
}
