//! PostgreSQL repository implementations.

pub mod pg_post_repository;

pub use pg_post_repository::PgPostRepository;
