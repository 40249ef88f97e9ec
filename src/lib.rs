pub mod config;
pub mod db;
pub mod errors;
pub mod label;
pub mod movie;
pub mod normalization;
pub mod person;
pub mod registry;
pub mod store;
pub mod test_data;
pub mod validation;
