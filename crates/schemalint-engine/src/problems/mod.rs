//! Built-in problems

mod bad_charset;
mod bad_engine;
mod no_pk;

pub use bad_charset::BadCharSetProblem;
pub use bad_engine::BadEngineProblem;
pub use no_pk::NoPrimaryKeyProblem;
