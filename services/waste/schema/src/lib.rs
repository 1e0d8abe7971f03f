//! sea-orm entities for the waste service tables.

pub mod classifications;
pub mod submission_images;
pub mod submissions;
pub mod users;
