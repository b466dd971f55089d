// Library for tests to access modules

pub mod config;
pub mod cpu_history;
pub mod models;
pub mod parsers;
pub mod remote;
pub mod routes;
pub mod sampler;
pub mod worker;
