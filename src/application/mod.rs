pub mod cleanup;
pub mod events;
pub mod file_service;
pub mod ports;
pub mod repository;
