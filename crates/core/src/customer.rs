//! Checkout customer information.

use serde::{Deserialize, Serialize};

/// Customer details collected by the checkout form.
///
/// Created empty, optionally pre-filled from the authenticated user's
/// profile, and consumed once at order submission. Every field is required
/// at submission time; see [`CustomerInfo::missing_fields`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub phone: String,
}

/// Validation failure listing every empty required field by name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct MissingFieldsError {
    /// Names of the empty fields, in declaration order.
    pub missing: Vec<&'static str>,
}

impl CustomerInfo {
    /// Names of all required fields that are empty or whitespace-only.
    ///
    /// Field names use the wire spelling (camelCase) so the caller can
    /// echo them straight back to the client.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &str); 8] = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("postalCode", &self.postal_code),
            ("city", &self.city),
            ("country", &self.country),
            ("phone", &self.phone),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Validate that every required field is populated.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFieldsError`] listing every empty field. Callers
    /// must not issue any network or database call when this fails.
    pub fn validate(&self) -> Result<(), MissingFieldsError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFieldsError { missing })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> CustomerInfo {
        CustomerInfo {
            first_name: "Astrid".to_string(),
            last_name: "Lindgren".to_string(),
            email: "astrid@example.com".to_string(),
            address: "Dalagatan 46".to_string(),
            postal_code: "113 24".to_string(),
            city: "Stockholm".to_string(),
            country: "Sweden".to_string(),
            phone: "+46701234567".to_string(),
        }
    }

    #[test]
    fn test_complete_info_validates() {
        assert!(complete().validate().is_ok());
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn test_empty_info_lists_all_fields() {
        let missing = CustomerInfo::default().missing_fields();
        assert_eq!(
            missing,
            vec![
                "firstName",
                "lastName",
                "email",
                "address",
                "postalCode",
                "city",
                "country",
                "phone"
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut info = complete();
        info.postal_code = "   ".to_string();
        info.phone = String::new();

        let err = info.validate().unwrap_err();
        assert_eq!(err.missing, vec!["postalCode", "phone"]);
    }

    #[test]
    fn test_error_message_names_fields() {
        let mut info = complete();
        info.city = String::new();

        let err = info.validate().unwrap_err();
        assert_eq!(err.to_string(), "missing required fields: city");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(complete()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("postalCode").is_some());
        assert!(json.get("first_name").is_none());
    }
}
