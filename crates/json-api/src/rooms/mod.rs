//! Rooms

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;
