pub mod config;
pub mod evaluator;
pub mod features;
pub mod gate;
pub mod language;
pub mod messages;
pub mod orchestrator;
pub mod prompt;
pub mod rubric;
pub mod scorer;
pub mod text;
pub mod validate;

pub use config::EvaluationConfig;
pub use evaluator::RubricEvaluator;
pub use features::ExtractedFeatures;
pub use gate::{GateFailure, GateResult, GateStats};
pub use language::{LanguageProfile, LanguageRegistry};
pub use orchestrator::{
    EvaluationError, EvaluationOutcome, EvaluationPipeline, EvaluationStore, SessionContext,
    StoreError, TranscriptStore,
};
pub use rubric::{CatalogError, CompetencyRubric, RubricCatalog, RubricLevel};
pub use scorer::{ScoringBackend, ScoringError, ScoringRequest};
