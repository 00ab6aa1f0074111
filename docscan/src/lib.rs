pub mod api;
pub mod config;
pub mod error;
pub mod mrz;
pub mod ocr;
pub mod services;
