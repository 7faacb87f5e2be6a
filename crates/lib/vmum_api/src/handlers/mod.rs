//! Request handlers.

pub mod app_page;
pub mod chat;
pub mod health;
pub mod index;
