//! Flat-file persistence split across logical submodules.

mod error;
mod file;
mod line;

pub use error::{StoreError, StoreResult};
pub use file::{load, load_existing, save};
pub use line::{decode_line, encode_line, DecodedLine, DELIMITER};
