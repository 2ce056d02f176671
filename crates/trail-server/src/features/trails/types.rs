//! Request payloads shared by the create and update commands

use serde::Deserialize;

use crate::auth::Credential;
use crate::models::TrailFields;

/// Client-facing message bodies
pub const TRAIL_CREATED: &str = "Trail created successfully";
pub const TRAIL_UPDATED: &str = "Trail updated successfully";
pub const TRAIL_DELETED: &str = "Trail deleted";
pub const TRAIL_NOT_FOUND: &str = "Trail not found";
pub const AUTHENTICATION_REQUIRED: &str =
    "Authentication required. Please provide Email and Password.";

/// JSON body of `POST /trails` and `PUT /trails/{id}`
///
/// Credentials and trail fields arrive side by side in one flat object.
/// A client-supplied `Trail_ID` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrailBody {
    #[serde(flatten)]
    pub credential: Credential,

    #[serde(flatten)]
    pub trail: TrailInput,
}

/// Trail fields as received, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrailInput {
    #[serde(rename = "Trail_Name", default)]
    pub trail_name: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    #[serde(rename = "Length_km", default)]
    pub length_km: Option<f64>,

    #[serde(rename = "Start_Location", default)]
    pub start_location: Option<String>,

    #[serde(rename = "End_Location", default)]
    pub end_location: Option<String>,

    #[serde(rename = "Difficulty_ID", default)]
    pub difficulty_id: Option<i32>,

    #[serde(rename = "RouteType_ID", default)]
    pub route_type_id: Option<i32>,

    #[serde(rename = "User_ID", default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrailValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Trail_Name cannot be empty")]
    EmptyName,

    #[error("Length_km must be a non-negative number")]
    InvalidLength,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, TrailValidationError> {
    value.ok_or(TrailValidationError::Missing(field))
}

impl TrailInput {
    /// Check required fields and simple ranges
    ///
    /// Difficulty, route type, and user ids are not range-checked; storage
    /// enforces those references.
    pub fn validate(self) -> Result<TrailFields, TrailValidationError> {
        let trail_name = required(self.trail_name, "Trail_Name")?;
        if trail_name.trim().is_empty() {
            return Err(TrailValidationError::EmptyName);
        }

        let length_km = required(self.length_km, "Length_km")?;
        if !length_km.is_finite() || length_km < 0.0 {
            return Err(TrailValidationError::InvalidLength);
        }

        Ok(TrailFields {
            trail_name,
            description: self.description,
            length_km,
            start_location: required(self.start_location, "Start_Location")?,
            end_location: required(self.end_location, "End_Location")?,
            difficulty_id: required(self.difficulty_id, "Difficulty_ID")?,
            route_type_id: required(self.route_type_id, "RouteType_ID")?,
            user_id: required(self.user_id, "User_ID")?,
        })
    }
}
