pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateTrailCommand, CreateTrailError, CreateTrailResponse};
pub use delete::{DeleteTrailCommand, DeleteTrailError, DeleteTrailResponse};
pub use update::{UpdateTrailCommand, UpdateTrailError, UpdateTrailResponse};
