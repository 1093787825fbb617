//! Schema retrieval from IPFS gateways.
//!
//! Subgraph deployments pin their `schema.graphql` on IPFS. This crate
//! downloads it by CID through an HTTP gateway.
//!
//! ```no_run
//! use subgraph_ipfs::IpfsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdl = IpfsClient::new().with_retries(2).fetch("QmSchemaCid").await?;
//!     println!("{sdl}");
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{IpfsClient, DEFAULT_GATEWAY};
pub use error::{FetchError, Result};
