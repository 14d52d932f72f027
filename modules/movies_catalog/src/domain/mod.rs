pub mod ports;
pub mod repo;
