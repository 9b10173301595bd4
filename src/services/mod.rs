//! TeleSign endpoint wrappers built on [`crate::client::http::TelesignClient`].

pub mod phoneid;
pub mod verify;
