//! Workout challenge backend: accounts, biometrics and generated multi-week
//! workout plans served over HTTP.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;
