//! Utility functions shared across layers.
//!
//! - [`slug`] - Short link slug generation and composition
//! - [`db_error`] - Unique violation classification for the `urls` table

pub mod db_error;
pub mod slug;
