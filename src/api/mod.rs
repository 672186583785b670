//! # API Module
//!
//! HTTP delivery layer: route definitions and their controllers.

pub mod controllers;
pub mod routes;
