pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod shutdown;
pub mod startup;
pub mod store;
pub mod view;
