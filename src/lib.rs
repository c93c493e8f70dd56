// src/lib.rs

//! Saver: client for a Luogu article and paste archive backend.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
