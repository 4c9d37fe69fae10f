// FILE: crates/core/src/lib.rs

//! Core domain model for dlshelf
//!
//! Holds the types every other crate shares (work identifiers, folder records,
//! catalog attributes, raw and normalized work records) together with the two
//! pure transformations of the pipeline:
//! - [`IdentifierExtractor`]: recognizes a work identifier inside a folder name
//! - [`normalize`]: turns one fetched record into per-attribute catalog values

pub mod error;
pub mod identifier;
pub mod normalize;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use identifier::{IdentifierExtractor, DEFAULT_PREFIXES};
pub use normalize::{normalize, NONE_SENTINEL};
pub use types::{
    Attribute, AttributeValue, FolderRecord, NormalizedWork, RawWorkRecord, WorkId,
    CREATION_DATE_FORMAT,
};
