use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the account that owns the session (`user_config` on the wire).
///
/// Only the fields the client reads are typed; everything else the server
/// sends is kept in `extra` so it survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub userid: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    /// Linked partner account, absent when unpaired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_user_config: Option<PairedUserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref())
    }
}

/// Profile of the partner account nested inside [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedUserProfile {
    pub userid: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PairedUserProfile {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref())
    }
}

fn display_name(name: Option<&str>) -> &str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => "(unnamed)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_with_partner() {
        let profile: UserProfile = serde_json::from_value(json!({
            "userid": 42,
            "name": "alice",
            "theme": "dark",
            "paired_user_config": { "userid": 43, "name": "bob", "avatar": "x.png" }
        }))
        .unwrap();

        assert_eq!(profile.userid, Some(42));
        assert_eq!(profile.display_name(), "alice");
        assert_eq!(profile.extra.get("theme"), Some(&json!("dark")));

        let paired = profile.paired_user_config.unwrap();
        assert_eq!(paired.userid, Some(43));
        assert_eq!(paired.extra.get("avatar"), Some(&json!("x.png")));
    }

    #[test]
    fn test_profile_without_partner() {
        let profile: UserProfile = serde_json::from_value(json!({ "userid": 1 })).unwrap();
        assert!(profile.paired_user_config.is_none());
        assert_eq!(profile.display_name(), "(unnamed)");
    }

    #[test]
    fn test_null_partner_is_unpaired() {
        let profile: UserProfile =
            serde_json::from_value(json!({ "userid": 1, "paired_user_config": null })).unwrap();
        assert!(profile.paired_user_config.is_none());
    }
}
