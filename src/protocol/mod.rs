//! TeleSign wire types.

pub mod models;
pub mod request;
