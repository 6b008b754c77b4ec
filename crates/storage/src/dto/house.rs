use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::House;

/// Request payload for creating a house
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateHouseRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(custom(function = "validate_color"))]
    pub color: String,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request payload for updating a house. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHouseRequest {
    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,

    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HouseListQuery {
    /// Include houses that are no longer active
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseResponse {
    pub house_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<House> for HouseResponse {
    fn from(house: House) -> Self {
        Self {
            house_id: house.house_id,
            name: house.name,
            slug: house.slug,
            color: house.color,
            display_order: house.display_order,
            is_active: house.is_active,
            created_by: house.created_by,
            created_at: house.created_at,
            updated_at: house.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Accepts `#RRGGBB` hex colors.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let is_valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if is_valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_color");
        error.message = Some("Color must be a hex value like #1E90FF".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, color: &str) -> CreateHouseRequest {
        CreateHouseRequest {
            name: name.to_string(),
            color: color.to_string(),
            display_order: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_house_request() {
        assert!(request("Tagore", "#FFAA00").validate().is_ok());
        assert!(request("Raman", "#1e90ff").validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_color() {
        for color in ["FFAA00", "#FFAA0", "#GGGGGG", "#FFAA001", ""] {
            let errors = request("Tagore", color).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("color"), "{color}");
        }
    }

    #[test]
    fn test_rejects_blank_name() {
        let errors = request("   ", "#FFAA00").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let errors = request("", "#FFAA00").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_defaults_when_deserialized() {
        let req: CreateHouseRequest =
            serde_json::from_str(r##"{"name":"Bose","color":"#00FF00"}"##).unwrap();
        assert_eq!(req.display_order, 0);
        assert!(req.is_active);
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        assert!(UpdateHouseRequest::default().validate().is_ok());

        let update = UpdateHouseRequest {
            color: Some("red".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
