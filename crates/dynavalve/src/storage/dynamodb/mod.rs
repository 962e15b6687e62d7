//! AWS DynamoDB backend.
//!
//! Issues scans with the legacy `AttributesToGet` and `ScanFilter`
//! parameters and always asks for total consumed capacity.

mod client;
mod conversions;
mod error;

pub use client::{DynamoDbClient, DynamoDbCredentials};
pub use conversions::{
    from_sdk_item, from_sdk_value, to_continuation_key, to_sdk_condition, to_sdk_item,
    to_sdk_operator, to_sdk_value,
};
pub use error::map_scan_error;
