//! MCP server exposing IndexNow URL submission as a single tool.
//!
//! The crate is split along the seams of the submission flow:
//! [`client`] issues the single outbound HTTP request, [`service`] validates
//! and derives parameters and interprets the response, and [`server`] wires
//! the service into an MCP stdio server.

pub mod cli;
pub mod client;
pub mod config;
pub mod server;
pub mod service;
