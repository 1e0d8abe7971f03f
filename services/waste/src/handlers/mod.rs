pub mod admin;
pub mod classify;
pub mod files;
pub mod status;
pub mod submission;
pub mod upload;
pub mod user;
