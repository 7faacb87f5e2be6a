//! Supporting services used by handlers and middleware.

pub mod origins;
