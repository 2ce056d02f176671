//! Trail domain models
//!
//! Wire field names follow the storage column names (`Trail_ID`,
//! `Length_km`, ...) so existing clients keep working.

use serde::{Deserialize, Serialize};

/// Storage-assigned trail identifier
pub type TrailId = i32;

/// A trail as returned by the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    #[serde(rename = "Trail_ID")]
    pub trail_id: TrailId,

    #[serde(rename = "Trail_Name")]
    pub trail_name: String,

    #[serde(rename = "Description")]
    pub description: Option<String>,

    #[serde(rename = "Length_km")]
    pub length_km: f64,

    #[serde(rename = "Start_Location")]
    pub start_location: String,

    #[serde(rename = "End_Location")]
    pub end_location: String,

    #[serde(rename = "Difficulty_ID")]
    pub difficulty_id: i32,

    #[serde(rename = "RouteType_ID")]
    pub route_type_id: i32,

    #[serde(rename = "User_ID")]
    pub user_id: i32,

    /// Display label joined in by the detail view
    #[serde(rename = "Difficulty", skip_serializing_if = "Option::is_none", default)]
    pub difficulty: Option<String>,

    /// Display label joined in by the detail view
    #[serde(rename = "Route_Type", skip_serializing_if = "Option::is_none", default)]
    pub route_type: Option<String>,
}

/// Validated write payload for create and update
///
/// Everything except the identifier, which storage owns.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailFields {
    pub trail_name: String,
    pub description: Option<String>,
    pub length_km: f64,
    pub start_location: String,
    pub end_location: String,
    pub difficulty_id: i32,
    pub route_type_id: i32,
    pub user_id: i32,
}
