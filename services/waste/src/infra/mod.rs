pub mod classifier;
pub mod db;
pub mod dispatch;
pub mod storage;
