pub mod aggregator;
pub mod save_service;
