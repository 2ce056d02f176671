pub mod get;
pub mod list;

pub use get::{GetTrailError, GetTrailQuery};
pub use list::{ListTrailsError, ListTrailsQuery};
