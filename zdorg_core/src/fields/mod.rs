//! Updatable organization fields
//!
//! This module provides:
//! - `catalog`: the closed list of fields offered to the operator
//! - `coercion`: conversion of raw text into the typed value each field expects

pub mod catalog;
pub mod coercion;

pub use catalog::{CUSTOM_FIELD_PREFIX, FIELD_OPTIONS, FieldOption, custom_key, is_custom};
pub use coercion::{CoercedValue, CoercionStrategy, coerce};
