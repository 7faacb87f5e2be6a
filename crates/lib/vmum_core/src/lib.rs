//! # vmum_core
//!
//! Core chat relay logic for Virtual Mum.

pub mod chat;
pub mod completion;
pub mod prompt;
pub mod relay;
