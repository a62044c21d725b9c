pub mod job;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod service;
