pub mod error;
pub mod memory;
pub mod store;
pub mod user_repo;

pub use memory::MemoryUserStore;
pub use store::UserStore;
pub use user_repo::PgUserStore;
