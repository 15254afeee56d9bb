//! An async client for the Apache Livy sessions REST API
//!
//! This library wraps the session endpoints of a Livy server behind a
//! small typed surface: list sessions, create a session, delete a
//! session, plus a low-level request primitive for everything else.
//!
//! # Features
//! - HTTP/1.1 with keep-alive connection pooling
//! - HTTPS with optional mutual TLS (PEM material passed as strings)
//! - Async/await API using tokio
//! - Raw response bodies preserved on both success and failure
//! - Request and response logging via `tracing`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use livy_client::{Client, SessionOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), livy_client::Error> {
//!     let client = Client::new("localhost")?;
//!
//!     // Create a Scala Spark session (the default kind)
//!     let created = client.create_session(&SessionOptions::default()).await?;
//!     println!("Created: {}", created);
//!
//!     // List what's running
//!     let sessions = client.list_sessions(None, None).await?;
//!     println!("Sessions: {}", sessions);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{Client, ClientConfig};
pub use error::{Error, Result};
pub use types::*;

/// HTTP method type accepted by [`Client::request`], re-exported from `hyper`
pub use hyper::Method;
