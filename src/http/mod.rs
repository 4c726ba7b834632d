//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 server: one request per connection, no
//! chunked bodies, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine
//! - **`parser`**: request line and header parsing
//! - **`headers`**: case-insensitive header map with duplicate folding
//! - **`request`**: the parsed request head
//! - **`response`**: response representation with builder pattern
//! - **`writer`**: serializes and writes responses to the client
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Request line and headers
//!        └──────┬──────┘
//!               │ head parsed         (framing error → Closed, nothing written)
//!               ▼
//!        ┌──────────────────┐
//!        │    Routing       │ ← Handler runs, may read the body
//!        └──────┬───────────┘
//!               │ response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use harbor::config::Config;
//! use harbor::http::connection::Connection;
//! use harbor::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Arc::new(Router::new(Arc::new(Config::default())));
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

pub const HTTP_VERSION: &str = "HTTP/1.1";
