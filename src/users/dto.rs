use serde::{Deserialize, Serialize};

/// Public projection of a user record returned by registration and
/// profile lookup. The password hash never appears here in any form.
/// `name`/`email` are optional because registration echoes back whatever
/// the caller supplied; absent fields are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned on successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_carries_a_password_key() {
        let user = PublicUser {
            id: 7,
            name: Some("A".into()),
            email: Some("a@x.com".into()),
            profile_picture: None,
        };
        let v: serde_json::Value = serde_json::to_value(&user).unwrap();
        assert!(v.get("password").is_none());
        assert_eq!(v["id"], 7);
        assert_eq!(v["name"], "A");
        assert_eq!(v["email"], "a@x.com");
    }

    #[test]
    fn missing_picture_serializes_as_null() {
        let user = PublicUser {
            id: 1,
            name: Some("A".into()),
            email: Some("a@x.com".into()),
            profile_picture: None,
        };
        let v: serde_json::Value = serde_json::to_value(&user).unwrap();
        assert!(v["profilePicture"].is_null());
    }

    #[test]
    fn login_response_uses_camel_case_user_id() {
        let resp = LoginResponse {
            user_id: 42,
            status: "true",
        };
        let v: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["userId"], 42);
        assert_eq!(v["status"], "true");
    }
}
