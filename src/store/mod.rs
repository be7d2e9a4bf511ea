pub mod http;
pub mod repo;
pub mod worker;
