pub mod error;
pub mod generation;
pub mod search;
pub mod storage;
pub mod utils;
