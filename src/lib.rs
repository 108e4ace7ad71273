//! Core library exports for the portfolio site.
//!
//! The `data` feature exposes the domain, persistence, grouping and
//! navigation layers. The `server` feature adds the forms, services and
//! Actix-web routes used by the web application.

pub mod db;
pub mod domain;
pub mod dto;
pub mod grouping;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod schema;
pub mod storage;

#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
