//! Table addressing through stackable region decorators.
//!
//! ```text
//! RetryingRegion
//!   └── PrefixedRegion ("prod-")
//!         └── SimpleRegion (credentials)
//! ```

mod prefixed;
mod retrying;
mod simple;
mod table;
mod traits;

pub use prefixed::PrefixedRegion;
pub use retrying::RetryingRegion;
pub use simple::SimpleRegion;
pub use table::Table;
pub use traits::Region;
