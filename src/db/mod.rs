pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod slot;
