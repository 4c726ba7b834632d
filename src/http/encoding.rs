//! Response compression.
//!
//! Only gzip is offered. The decision is taken from the request's
//! `Accept-Encoding` header; quality values are not interpreted, so a
//! `gzip;q=0` entry still counts as accepting gzip.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

pub const GZIP: &str = "gzip";

/// Returns whether an `Accept-Encoding` value lists gzip.
pub fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    let Some(value) = accept_encoding else {
        return false;
    };

    value
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.split_once(';') {
                Some((coding, _params)) => coding,
                None => token,
            }
        })
        .any(|coding| coding.eq_ignore_ascii_case(GZIP))
}

/// Compresses `data` into a complete gzip stream.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
