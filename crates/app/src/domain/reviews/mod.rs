//! Reviews
//!
//! Ratings live in a separate document store; rooms link to documents through
//! `room_reviews`. Only the minimum-rating lookup used by room search is exposed here.

pub mod records;
mod store;

pub use store::*;
