//! Pure domain types shared across the pilah workspace.

pub mod category;
pub mod status;
pub mod user;
