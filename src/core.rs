pub mod domain;
pub mod lending;
pub mod repository;
