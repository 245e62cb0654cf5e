use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Party;

/// Invoice for hourly work, with the weekly timesheets that back it.
///
/// Numeric and date fields have no sensible empty value, so leaving them out is a
/// JSON error (still a 400) rather than a validation violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    #[schema(example = "2024-07-01T00:00:00Z")]
    pub date: DateTime<Utc>,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "INV-2024-007")]
    pub invoice_number: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "WO-118")]
    pub work_order_number: String,

    #[schema(example = 85.0)]
    pub rate_per_hour: f64,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "USD")]
    pub currency: String,

    #[schema(example = 40.0)]
    pub total_hours: f64,

    #[schema(example = 3400.0)]
    pub total_amount: f64,

    #[serde(default)]
    #[validate(nested)]
    pub sub_contractor: Party,

    #[serde(default)]
    #[validate(nested)]
    pub bill_to: Party,

    #[serde(default)]
    #[validate(nested)]
    pub timesheets: Vec<Timesheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "27")]
    pub week_number: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "2024-07-01 - 2024-07-05")]
    pub week_duration: String,

    #[serde(default)]
    pub work_hours: Vec<WorkHourEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkHourEntry {
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    #[schema(example = "2024-07-01")]
    pub date: DateTime<Utc>,

    #[schema(example = 8.0)]
    pub hours: f64,

    #[schema(example = 680.0)]
    pub total_amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
