pub mod gemini;

use std::sync::Arc;

use crate::domain::models::BackendArc;

/// The assistant collaborator used by the running app. Tests substitute their
/// own [`crate::domain::models::Backend`] implementations instead.
pub fn default_backend() -> BackendArc {
    return Arc::new(gemini::Gemini::default());
}
