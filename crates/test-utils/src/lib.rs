//! Shared fixtures, Markdown assertions and a canned gateway for
//! subgraph-docs tests.

pub mod assertions;
pub mod fixtures;
pub mod gateway;
