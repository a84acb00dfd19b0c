use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::ats::ResumeScorer;
use crate::config::Config;
use crate::editor::session::EditorSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single editor session. Mutations are serialized by the lock.
    pub session: Arc<Mutex<EditorSession>>,
    /// Pluggable resume scorer. Default: RuleBasedScorer.
    pub scorer: Arc<dyn ResumeScorer>,
}

impl AppState {
    pub fn new(config: Config, session: EditorSession, scorer: Arc<dyn ResumeScorer>) -> Self {
        Self {
            config,
            session: Arc::new(Mutex::new(session)),
            scorer,
        }
    }
}
