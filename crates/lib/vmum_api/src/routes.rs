//! Route paths.

pub const GET_INDEX: &str = "/";
pub const GET_APP: &str = "/app";
pub const GET_HEALTH: &str = "/health";
pub const POST_CHAT: &str = "/chat";
