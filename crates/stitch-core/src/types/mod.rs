//! Addressing types for the hosted table service.
//!
//! These types check their invariants at construction time, so a
//! [`TableRef`] always names a service, a base and a table.

mod service_url;
mod table;

pub use service_url::{DEFAULT_SERVICE, ServiceUrl};
pub use table::{BaseId, TableName, TableRef};
