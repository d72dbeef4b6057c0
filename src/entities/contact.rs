//! Contact inquiries submitted through the public site, plus the school's
//! own contact details shown on the contact page.

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::forms::{FieldKind, FieldSpec, Schema};

pub const CONTACTS_KEY: &str = "contacts";
pub const CONTACT_INFO_KEY: &str = "contactInfo";

pub const PRIORITIES: [&str; 3] = ["Low", "Medium", "High"];
pub const STATUSES: [&str; 3] = ["New", "In Progress", "Resolved"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub department: String,
    pub priority: String,
    pub status: String,
}

impl Entity for Contact {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: 1,
            name: "John Doe".into(),
            email: "john@example.com".into(),
            phone: "+1 (555) 123-4567".into(),
            subject: "Inquiry about admission".into(),
            message: "I would like to know more about the admission process.".into(),
            department: "Administration".into(),
            priority: "High".into(),
            status: "New".into(),
        },
        Contact {
            id: 2,
            name: "Jane Smith".into(),
            email: "jane@example.com".into(),
            phone: "+1 (555) 987-6543".into(),
            subject: "Scholarship details".into(),
            message: "Could you provide information on available scholarships?".into(),
            department: "Admissions".into(),
            priority: "Medium".into(),
            status: "In Progress".into(),
        },
        Contact {
            id: 3,
            name: "Robert Johnson".into(),
            email: "robert@example.com".into(),
            phone: "+1 (555) 456-7890".into(),
            subject: "Course schedule".into(),
            message: "I want to know the upcoming semester schedule.".into(),
            department: "Student Services".into(),
            priority: "Low".into(),
            status: "Resolved".into(),
        },
    ]
}

/// The school's published contact details, one flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub google_map_url: String,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            description: "Reach out to us with any questions about admissions, courses, or school life.".into(),
            phone: "+1 (123) 456-7890".into(),
            email: "info@aayamglobal.com".into(),
            address: "123 School Street, City, State, ZIP".into(),
            google_map_url: "https://www.google.com/maps/embed?pb=...".into(),
            facebook: "https://facebook.com/aayamglobal".into(),
            instagram: "https://instagram.com/aayamglobal".into(),
            twitter: "https://twitter.com/aayamglobal".into(),
        }
    }
}

pub fn contact_schema() -> Schema {
    let options = |opts: &[&str]| opts.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Schema::new(vec![
        FieldSpec::text("name", "Name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::text("phone", "Phone").required(),
        FieldSpec::text("subject", "Subject").required(),
        FieldSpec::long_text("message", "Message").required(),
        FieldSpec::text("department", "Department").required(),
        FieldSpec::new("priority", "Priority", FieldKind::Select(options(&PRIORITIES))).required(),
        FieldSpec::new("status", "Status", FieldKind::Select(options(&STATUSES))).required(),
    ])
}

/// Every field is optional, matching the original edit dialog; URL and
/// email fields are still format-checked when filled in.
pub fn contact_info_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::long_text("description", "Description"),
        FieldSpec::text("phone", "Phone"),
        FieldSpec::new("email", "Email", FieldKind::Email),
        FieldSpec::text("address", "Address"),
        FieldSpec::new("googleMapUrl", "Google Map URL", FieldKind::Url),
        FieldSpec::new("facebook", "Facebook", FieldKind::Url),
        FieldSpec::new("instagram", "Instagram", FieldKind::Url),
        FieldSpec::new("twitter", "Twitter", FieldKind::Url),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_schema_rejects_bad_email() {
        let mut values = serde_json::to_value(&seed_contacts()[0])
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        values.insert("email".into(), json!("not-an-email"));
        let errors = contact_schema().validate_all(&values);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("email"));
    }

    #[test]
    fn test_seed_contact_passes_validation() {
        let values = serde_json::to_value(&seed_contacts()[1])
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        assert!(contact_schema().validate_all(&values).is_empty());
    }

    #[test]
    fn test_contact_info_json_shape_is_flat_camel_case() {
        let json = serde_json::to_value(ContactInfo::default()).unwrap();
        assert_eq!(json["googleMapUrl"], "https://www.google.com/maps/embed?pb=...");
        assert_eq!(json["email"], "info@aayamglobal.com");
        assert!(json.get("socialMedia").is_none());
    }

    #[test]
    fn test_contact_info_default_passes_validation() {
        let values = serde_json::to_value(ContactInfo::default())
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        assert!(contact_info_schema().validate_all(&values).is_empty());
    }

    #[test]
    fn test_contact_info_blank_fields_are_allowed() {
        // Nothing is required; a cleared record still saves.
        let values = serde_json::to_value(ContactInfo {
            description: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            google_map_url: String::new(),
            facebook: String::new(),
            instagram: String::new(),
            twitter: String::new(),
        })
        .unwrap()
        .as_object()
        .cloned()
        .unwrap();
        assert!(contact_info_schema().validate_all(&values).is_empty());
    }

    #[test]
    fn test_contact_info_filled_links_are_format_checked() {
        let mut values = serde_json::to_value(ContactInfo::default())
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        values.insert("facebook".into(), json!("not a url"));
        assert!(contact_info_schema().validate_all(&values).contains_key("facebook"));
    }
}
