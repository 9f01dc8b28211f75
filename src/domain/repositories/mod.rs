//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete repositories
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod post_repository;

pub use post_repository::PostRepository;

#[cfg(test)]
pub use post_repository::MockPostRepository;
