//! Content module - collects posts and projects from markdown directories

mod error;
mod frontmatter;
pub mod loader;
pub mod order;
mod post;
mod project;

pub use error::CollectError;
pub use frontmatter::{stringify, FrontMatter, FrontMatterError, Metadata};
pub use order::PostOrder;
pub use post::{DateKey, PostRecord};
pub use project::Project;
