use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Address;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Acme")]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "vendor")]
    pub contact_type: String,

    #[serde(default)]
    #[validate(nested)]
    pub address: Address,
}
