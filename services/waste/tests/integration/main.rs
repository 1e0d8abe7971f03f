mod helpers;

mod classify_test;
mod status_test;
mod submission_test;
mod upload_test;
