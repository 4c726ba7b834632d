//! Harbor - minimal HTTP/1.1 server
//!
//! Hand-rolled request parsing, a fixed route table, gzip for echoed text
//! and a sandboxed directory for file download and upload.

pub mod config;
pub mod fs;
pub mod http;
pub mod router;
pub mod server;
