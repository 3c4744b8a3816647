pub mod app;
pub mod config;
pub mod model;
pub mod repository;
pub mod service;
pub mod util;
