//! Shared library module for the Tesserae command-line shell.
#![allow(missing_docs, clippy::missing_errors_doc)]

pub mod bot;
mod error;
pub mod render;
pub mod store;

pub use self::error::AppError;
