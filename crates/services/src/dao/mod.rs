pub mod base;
pub mod evaluation;
pub mod session;
pub mod turn;

pub use base::{BaseDao, DaoError, DaoResult};
pub use evaluation::EvaluationDao;
pub use session::SessionDao;
pub use turn::TurnDao;
