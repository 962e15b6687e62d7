mod condition;
mod dosage;
mod error;
mod lease;
mod stream;
mod traits;
mod types;
mod valve;

pub use condition::{summarize, ComparisonOperator, Condition, Conditions};
pub use dosage::{EmptyDosage, ScanDosage};
pub use error::{Result, ScanError};
pub use lease::ClientLease;
pub use stream::{collect_items, into_item_stream};
pub use traits::{Credentials, Dosage, RemoteClient, Valve};
pub use types::{AttributeValue, ContinuationKey, Item, Page, ScanSpec};
pub use valve::{ScanValve, DEFAULT_LIMIT};
