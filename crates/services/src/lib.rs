pub mod dao;
pub mod stores;

pub use dao::{BaseDao, DaoError, DaoResult, EvaluationDao, SessionDao, TurnDao};
pub use stores::{MongoEvaluationStore, MongoTranscriptStore};
