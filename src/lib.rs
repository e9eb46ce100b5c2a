//! Tabular Server Library
//!
//! This crate exposes the router, extraction engine, and collaborators for
//! integration testing. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `engine`: table detection and formatting over PDF page text
//! - `ocr`: OCR preprocessing via an external command-line tool
//! - `routes`: HTTP endpoints
//! - `staging`: request-scoped staging of uploads on disk

pub mod config;
pub mod engine;
pub mod error;
pub mod ocr;
pub mod routes;
pub mod staging;
pub mod state;
