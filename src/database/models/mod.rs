pub mod category;
pub mod project;

pub use category::{Category, CategoryBody};
pub use project::{Flag, Project, ProjectBody};
