pub mod backup;
pub mod image;
pub mod log;
pub mod persistence;
pub mod store;
