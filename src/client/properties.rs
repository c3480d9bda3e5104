//! Property listings.

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{Access, ApiClient};
use crate::errors::ApiError;

/// A listing as the backend returns it. Only the fields the console relies
/// on are typed; the rest is kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The add/edit property form.
///
/// `features` and `videos` accept either a list or a single comma-separated
/// string, the way the form collects them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDraft {
    pub name: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    pub description: String,
    pub meta_description: String,
    #[serde(deserialize_with = "comma_list")]
    pub features: Vec<String>,
    pub images: Vec<String>,
    #[serde(deserialize_with = "comma_list")]
    pub videos: Vec<String>,
    pub featured: bool,
    pub available: bool,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        PropertyDraft {
            name: String::new(),
            price: 0.0,
            location: String::new(),
            kind: "apartment".to_string(),
            status: "available".to_string(),
            bedrooms: 0,
            bathrooms: 0,
            area: 0.0,
            description: String::new(),
            meta_description: String::new(),
            features: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            featured: false,
            available: true,
        }
    }
}

impl PropertyDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Property name is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(ApiError::Validation("Location is required".to_string()));
        }
        if self.price < 0.0 || self.area < 0.0 {
            return Err(ApiError::Validation(
                "Price and area cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match ListOrString::deserialize(deserializer)? {
        ListOrString::List(items) => items,
        ListOrString::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

impl ApiClient {
    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let request = self.request(Method::GET, "/api/properties", Access::Public);
        self.send_json(request).await
    }

    pub async fn get_property(&self, id: &str) -> Result<Property, ApiError> {
        let request = self.request(Method::GET, &property_path(id)?, Access::Public);
        self.send_json(request).await
    }

    pub async fn create_property(&self, draft: &PropertyDraft) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = self
            .request(Method::POST, "/api/properties", Access::Protected)
            .json(draft);
        self.send_json(request).await
    }

    pub async fn update_property(
        &self,
        id: &str,
        draft: &PropertyDraft,
    ) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = self
            .request(Method::PUT, &property_path(id)?, Access::Protected)
            .json(draft);
        self.send_json(request).await
    }

    pub async fn delete_property(&self, id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &property_path(id)?, Access::Protected);
        self.send(request).await?;
        Ok(())
    }
}

pub(crate) fn property_path(id: &str) -> Result<String, ApiError> {
    resource_path("/api/properties", id)
}

/// `base/id`, refusing ids that would address some other resource.
pub(crate) fn resource_path(base: &str, id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(ApiError::Validation(format!("invalid id '{}'", id)));
    }
    Ok(format!("{}/{}", base, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_from_form_style_json() {
        let draft: PropertyDraft = serde_json::from_value(json!({
            "name": "Lakeview 2BHK",
            "price": 5500000,
            "location": "Pune",
            "bedrooms": 2,
            "bathrooms": 2,
            "area": 1100,
            "features": "Parking, Gym , ,Pool",
            "videos": ["https://example.com/v.mp4"]
        }))
        .expect("draft should parse");

        assert_eq!(draft.features, vec!["Parking", "Gym", "Pool"]);
        assert_eq!(draft.videos.len(), 1);
        assert_eq!(draft.kind, "apartment");
        assert!(draft.available);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let draft = PropertyDraft {
            name: "Plot 7".to_string(),
            location: "Nashik".to_string(),
            kind: "plot".to_string(),
            meta_description: "Corner plot".to_string(),
            ..PropertyDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "plot");
        assert_eq!(value["metaDescription"], "Corner plot");
    }

    #[test]
    fn test_draft_requires_name_and_location() {
        assert!(PropertyDraft::default().validate().is_err());
        let draft = PropertyDraft {
            name: "Villa".to_string(),
            ..PropertyDraft::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_property_keeps_unknown_fields() {
        let property: Property = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Villa",
            "slug": "villa",
            "price": 100
        }))
        .unwrap();
        assert_eq!(property.id, "p1");
        assert_eq!(property.fields.get("slug"), Some(&json!("villa")));
    }

    #[test]
    fn test_resource_path_rejects_traversal() {
        assert_eq!(property_path("abc").unwrap(), "/api/properties/abc");
        assert!(property_path("../users").is_err());
        assert!(property_path("").is_err());
    }
}
