use crate::error::{DashboardError, Result};
use crate::project::Project;
use std::{collections::HashSet, fs, path::Path};
use tracing::debug;

const REFERENCE_DATA: &str = include_str!("../data/projects.json");
const MAX_PROGRESS: u8 = 100;

/// Read-only collection of projects, fixed for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(DashboardError::DuplicateProjectId(project.id.clone()));
            }
            if project.progress > MAX_PROGRESS {
                return Err(DashboardError::InvalidProgress {
                    id: project.id.clone(),
                    progress: project.progress,
                });
            }
        }
        Ok(Self { projects })
    }

    /// The built-in sample dataset.
    pub fn reference() -> Result<Self> {
        Self::from_json_str(REFERENCE_DATA)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let projects: Vec<Project> = serde_json::from_str(data)?;
        Self::new(projects)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| DashboardError::ReadDataset {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects whose name, description or a team member contains `query`,
    /// ignoring case. A blank query returns everything. Authored order is kept.
    pub fn filter_projects(&self, query: &str) -> Vec<&Project> {
        if query.trim().is_empty() {
            return self.projects.iter().collect();
        }

        let needle = query.to_lowercase();
        let hits: Vec<&Project> = self.projects.iter().filter(|p| p.matches(&needle)).collect();
        debug!(query, hits = hits.len(), "filtered projects");
        hits
    }

    pub fn task_count(&self) -> usize {
        self.projects.iter().map(|p| p.tasks.len()).sum()
    }
}
