pub mod chat;
pub mod diagnose;
pub mod professionals;
