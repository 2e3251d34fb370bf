pub mod config;
pub mod park;
pub mod recommend;
pub mod session;
pub mod stats;
pub mod task;
