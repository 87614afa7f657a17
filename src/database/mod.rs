pub mod manager;
pub mod models;
pub mod statement;

pub use manager::{Database, DatabaseError};
pub use statement::{Param, RunMeta, RunResult, Statement};
