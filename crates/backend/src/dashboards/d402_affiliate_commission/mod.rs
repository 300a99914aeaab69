pub mod engine;
pub mod service;
pub mod upload_store;
