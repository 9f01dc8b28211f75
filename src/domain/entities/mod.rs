//! Core business entities.

pub mod post;

pub use post::{NewPost, Post, PostFilter, PostPatch, PostStatsSnapshot, PublishedPage, SortOrder};
