//! Record types for near-Earth objects and their close approaches
//!
//! Both record types are built from loader inputs, linked once by
//! [`crate::link`], and treated as immutable afterwards.

pub mod approach;
pub mod field;
pub mod neo;

pub use approach::{ApproachInfo, ApproachRecord, CloseApproach};
pub use field::FieldValue;
pub use neo::{NearEarthObject, NeoInfo, NeoRecord};
