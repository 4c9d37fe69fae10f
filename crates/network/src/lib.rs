// FILE: crates/network/src/lib.rs

//! HTTP access to remote catalog pages and cover images

mod client;
mod error;

pub use client::{Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};
