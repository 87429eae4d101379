//! Upload filename sanitization and object key construction.

mod filename;
mod object_key;

pub use filename::secure_filename;
pub use object_key::{DEFAULT_KEY_PREFIX, ObjectKey};
