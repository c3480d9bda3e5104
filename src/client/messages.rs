//! Contact-form messages left by site visitors.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::properties::resource_path;
use super::{Access, ApiClient};
use crate::errors::ApiError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiClient {
    pub async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        let request = self.request(Method::GET, "/api/messages", Access::Protected);
        self.send_json(request).await
    }

    pub async fn delete_message(&self, id: &str) -> Result<(), ApiError> {
        let path = resource_path("/api/messages", id)?;
        let request = self.request(Method::DELETE, &path, Access::Protected);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_from_backend() {
        let message: Message = serde_json::from_value(json!({
            "_id": "m1",
            "name": "Ravi",
            "email": "ravi@example.com",
            "message": "Is the flat still available?",
            "createdAt": "2024-02-01T10:00:00Z",
            "read": false
        }))
        .unwrap();

        assert_eq!(message.id, "m1");
        assert_eq!(message.created_at.as_deref(), Some("2024-02-01T10:00:00Z"));
        assert_eq!(message.subject, None);
        assert_eq!(message.extra.get("read"), Some(&json!(false)));
    }
}
