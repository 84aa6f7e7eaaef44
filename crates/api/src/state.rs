use std::sync::Arc;

use prepcoach_config::Settings;
use prepcoach_evaluation::EvaluationPipeline;
use prepcoach_services::dao::{EvaluationDao, SessionDao, TurnDao};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionDao>,
    pub turns: Arc<TurnDao>,
    pub evaluations: Arc<EvaluationDao>,
    pub pipeline: Arc<EvaluationPipeline>,
    pub settings: Arc<Settings>,
}
