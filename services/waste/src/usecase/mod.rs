pub mod classify;
pub mod register;
pub mod report;
pub mod status;
pub mod submission;
pub mod upload;
