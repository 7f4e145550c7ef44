//! Pixdrop API
//!
//! HTTP surface of the upload service: `POST /media/upload`, `GET /healthz` and
//! `GET /robots.txt`. The library half exists so integration tests and the client
//! crate can build the same router the binary serves.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
