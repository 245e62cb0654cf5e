use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Postal address embedded in contacts and invoice parties.
///
/// Missing string fields deserialize as empty and are reported by validation,
/// so a request that omits `city` gets a field-level violation instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "221B Baker Street")]
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "London")]
    pub city: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Greater London")]
    pub state: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "UK")]
    pub country: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "NW1 6XE")]
    pub pincode: String,
}

/// A named party on an invoice (subcontractor or bill-to).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Acme Consulting Ltd")]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub address: Address,
}
