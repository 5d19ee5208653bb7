// src/lib.rs

//! Forum client library.

pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;
pub mod views;
