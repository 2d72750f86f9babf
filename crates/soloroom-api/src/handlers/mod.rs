//! Request handlers, organized by surface.

pub mod admin;
pub mod health;
pub mod room;
