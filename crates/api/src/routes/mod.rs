pub mod evaluation;
pub mod session;
