pub mod error;
pub mod memory;
pub mod pg;
pub mod post_repo;

pub use error::{RepoError, RepoResult};
pub use memory::MemoryPostStore;
pub use pg::PgPostStore;
pub use post_repo::{Author, AuthorProfile, Category, PostDocument, PostRow, PostStore};
