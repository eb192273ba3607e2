//! Typed metadata for the generated specification document.
//!
//! Only the stable, top-level objects are typed — [`Info`], [`Contact`],
//! [`License`]. Paths and components stay as fragments until rendering, so
//! the merge semantics never have to round-trip through fixed structs.

use serde::{Deserialize, Serialize};

/// API metadata for the document's `info` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Info {
    /// Metadata with just a title and version.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds contact information.
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Adds license information.
    #[must_use]
    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new("Example API", "0.0.0")
    }
}

/// Contact information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// License URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// SPDX identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_serialization_skips_absent_fields() {
        let info = Info::new("Test API", "1.0.0");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Test API", "version": "1.0.0"}));
    }

    #[test]
    fn test_info_builder() {
        let info = Info::new("Test API", "1.0.0")
            .with_description("demo")
            .with_license(License {
                name: "MIT".to_owned(),
                url: None,
                identifier: Some("MIT".to_owned()),
            });
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["description"], "demo");
        assert_eq!(json["license"]["identifier"], "MIT");
    }
}
