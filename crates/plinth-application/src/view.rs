//! Per-view presentation state.
//!
//! Filter and layout selections only affect what this view renders; they
//! are never persisted and never synchronized across views.

use plinth_core::command::{Domain, ViewMode};
use plinth_core::content::{DocumentType, ProjectType};

/// Non-persisted state of one mounted view.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// The active page.
    pub domain: Domain,
    /// `None` renders every document.
    pub document_filter: Option<DocumentType>,
    pub document_view: ViewMode,
    /// `None` renders every project.
    pub project_filter: Option<ProjectType>,
    pub project_view: ViewMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            domain: Domain::Home,
            document_filter: None,
            document_view: ViewMode::Blocks,
            project_filter: None,
            project_view: ViewMode::Blocks,
        }
    }
}
