use serde::{Deserialize, Serialize};

/// Email/password pair collected by the sign-in form.
///
/// Transient: built in the submit handler once validation passes and
/// dropped after the session call returns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload for account creation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Backend account object.
///
/// The backend returns this under the `user` field. We keep it flexible
/// to avoid breaking when backend fields evolve.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AccountInfo {
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl AccountInfo {
    /// Best-effort label for the signed-in account: name, then email.
    pub fn display_name(&self) -> String {
        for key in ["name", "email"] {
            if let Some(s) = self.extra.get(key).and_then(|v| v.as_str()) {
                if !s.trim().is_empty() {
                    return s.to_string();
                }
            }
        }
        "account".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_name_over_email() {
        let account = AccountInfo {
            extra: serde_json::json!({"id": 1, "name": "Ada", "email": "ada@example.com"}),
        };
        assert_eq!(account.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let account = AccountInfo {
            extra: serde_json::json!({"id": 1, "name": "", "email": "ada@example.com"}),
        };
        assert_eq!(account.display_name(), "ada@example.com");
    }

    #[test]
    fn test_display_name_fallback_when_fields_missing() {
        let account = AccountInfo {
            extra: serde_json::json!({"id": 1}),
        };
        assert_eq!(account.display_name(), "account");
    }

    #[test]
    fn test_credentials_serialize_exact_keys() {
        let credentials = Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let v = serde_json::to_value(credentials).expect("should serialize");
        assert_eq!(v["email"], "ada@example.com");
        assert_eq!(v["password"], "hunter2");
    }
}
