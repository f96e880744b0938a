//! Users

use serde::{Deserialize, Serialize};

/// Profile of the currently authenticated customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account id.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Account email.
    #[serde(default)]
    pub email: Option<String>,

    /// Primary phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// WhatsApp number, used when no primary phone is recorded.
    #[serde(default, alias = "nomor_whatsapp")]
    pub whatsapp_number: Option<String>,
}

impl UserProfile {
    /// Best contact number on file.
    pub fn contact_number(&self) -> Option<&str> {
        non_empty(self.phone.as_deref()).or_else(|| non_empty(self.whatsapp_number.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn contact_number_prefers_phone() {
        let user = UserProfile {
            phone: Some("0811".to_string()),
            whatsapp_number: Some("0822".to_string()),
            ..UserProfile::default()
        };

        assert_eq!(user.contact_number(), Some("0811"));
    }

    #[test]
    fn contact_number_falls_back_to_whatsapp() -> TestResult {
        let user: UserProfile =
            serde_json::from_str(r#"{"id": 3, "phone": "", "nomor_whatsapp": "0822"}"#)?;

        assert_eq!(user.contact_number(), Some("0822"));

        Ok(())
    }
}
