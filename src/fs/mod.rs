//! Filesystem side of the `/files/` routes.

pub mod path;

pub use path::{PathError, name_to_path, normalize, percent_decode, safe_join};
