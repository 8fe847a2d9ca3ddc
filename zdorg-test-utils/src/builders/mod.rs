//! Builders for test fixtures

mod test_data;

pub use test_data::{TestCsvBuilder, TestDataBuilder};
