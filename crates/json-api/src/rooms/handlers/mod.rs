//! Room Handlers

pub(crate) mod available;
pub(crate) mod filter;
pub(crate) mod get;
pub(crate) mod status;
