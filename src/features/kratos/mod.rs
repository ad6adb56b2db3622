//! Browser client for the provider's self-service flow endpoints.

mod client;

pub use client::KratosClient;
