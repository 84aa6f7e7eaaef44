pub mod evaluation;
pub mod session;
pub mod turn;

pub use evaluation::{CompetencyEvaluation, EvaluationRecord, EvaluationResult};
pub use session::{CandidateProfile, InterviewSession, InterviewType, Seniority, SessionStatus};
pub use turn::{SpeakerRole, TranscriptTurn};
