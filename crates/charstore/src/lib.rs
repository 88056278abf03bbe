//! `charstore` - CRUD over a flat CSV file of character records
//!
//! The [`codec`] turns the file's lines into [`Character`] records and back;
//! the [`Store`] runs each operation as a full load-modify-save cycle over the
//! file.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod report;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Character, CharacterChanges, Gender, NewCharacter};
pub use report::GenderCounts;
pub use storage::Store;
