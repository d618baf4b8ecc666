//! Repository adapters bridging core stores to the auth layer.

mod user_repo;

pub use user_repo::StoreUserRepo;
