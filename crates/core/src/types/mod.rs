// FILE: crates/core/src/types/mod.rs

//! Domain types for dlshelf
//!
//! - `work`: work identifiers and on-disk folder records
//! - `attribute`: the fixed set of catalog attributes and their values
//! - `record`: raw fetched records and their normalized form

mod attribute;
mod record;
mod work;

pub use attribute::{Attribute, AttributeValue};
pub use record::{NormalizedWork, RawWorkRecord};
pub use work::{FolderRecord, WorkId, CREATION_DATE_FORMAT};
