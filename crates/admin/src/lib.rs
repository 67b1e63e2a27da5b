//! Checkout quantity admin library.
//!
//! This crate provides the admin panel as a library, allowing it to be
//! tested and reused.
//!
//! # Security
//!
//! The admin panel writes site-wide settings that the storefront reads on
//! every checkout render. Every write goes through [`routes::options`], which
//! checks the admin's capability and the session form token first.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod options;
pub mod routes;
pub mod services;
pub mod state;
