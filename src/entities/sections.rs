//! Single-record page sections: home banner, admission, eligibility, events,
//! gallery, how-to-apply, notices, scholarships, and contact information.
//!
//! Each section is one JSON record under its own storage key, edited by one
//! schema-driven form. Defaults reproduce the published page content so a
//! fresh data directory renders a complete site.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::forms::{FieldKind, FieldSpec, RowField, Schema};

pub const HOME_KEY: &str = "homeData";
pub const ADMISSION_KEY: &str = "admissionData";
pub const ELIGIBILITY_KEY: &str = "eligiabilityData";
pub const EVENTS_KEY: &str = "eventData";
pub const GALLERY_KEY: &str = "galleryData";
pub const HOW_TO_APPLY_KEY: &str = "howToApplyData";
pub const NOTICES_KEY: &str = "noticeData";
pub const SCHOLARSHIPS_KEY: &str = "scholarshipData";
pub const CONTACT_SECTION_KEY: &str = "contactData";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeData {
    pub title: String,
    pub subtitle: String,
    pub content: String,
}

impl Default for HomeData {
    fn default() -> Self {
        Self {
            title: "Welcome to Aayam Global School".into(),
            subtitle: "Empowering students for a better future".into(),
            content: "Aayam Global School is committed to providing quality education...".into(),
        }
    }
}

pub fn home_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::text("subtitle", "Subtitle").min_len(2).max_len(100),
        FieldSpec::long_text("content", "Content").required().min_len(10),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionData {
    pub title: String,
    pub description: String,
    pub admission_process: Vec<AdmissionStep>,
    pub scholarship_title: String,
    pub scholarship_description: String,
    pub scholarship_types: Vec<ScholarshipType>,
    pub scholarship_note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionStep {
    pub step: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipType {
    pub name: String,
    pub description: String,
}

impl Default for AdmissionData {
    fn default() -> Self {
        Self {
            title: "Admission Process".into(),
            description: "Join Aayam Global School and embark on a journey of academic excellence and personal growth.".into(),
            admission_process: vec![
                AdmissionStep {
                    step: "Application Submission".into(),
                    description: "Complete the online application form with accurate information and required documents.".into(),
                },
                AdmissionStep {
                    step: "Document Verification".into(),
                    description: "Our admissions team will review your application and verify all submitted documents.".into(),
                },
            ],
            scholarship_title: "Scholarships & Financial Aid".into(),
            scholarship_description: "At Aayam Global School, we offer scholarships to support talented and deserving students.".into(),
            scholarship_types: vec![
                ScholarshipType {
                    name: "Merit-Based Scholarship".into(),
                    description: "Awarded to students with exceptional academic records and achievements.".into(),
                },
                ScholarshipType {
                    name: "Need-Based Scholarship".into(),
                    description: "Designed for students who demonstrate financial need and academic potential.".into(),
                },
            ],
            scholarship_note: "We believe every student deserves a chance to succeed.".into(),
        }
    }
}

pub fn admission_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "admissionProcess",
            "Admission steps",
            FieldKind::Rows(vec![
                RowField::new("step", "Step"),
                RowField::new("description", "Description").long(),
            ]),
        ),
        FieldSpec::text("scholarshipTitle", "Scholarship title").required().min_len(2).max_len(50),
        FieldSpec::long_text("scholarshipDescription", "Scholarship description")
            .required()
            .min_len(10),
        FieldSpec::new(
            "scholarshipTypes",
            "Scholarship types",
            FieldKind::Rows(vec![
                RowField::new("name", "Name"),
                RowField::new("description", "Description").long(),
            ]),
        ),
        FieldSpec::long_text("scholarshipNote", "Scholarship note").required().min_len(10),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityData {
    pub title: String,
    pub description: String,
    pub eligibility_criteria: Vec<EligibilityCriterion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityCriterion {
    pub criteria: String,
    pub description: String,
}

impl Default for EligibilityData {
    fn default() -> Self {
        Self {
            title: "Eligibility Criteria".into(),
            description: "Check the eligibility requirements for admission to Aayam Global School.".into(),
            eligibility_criteria: vec![
                EligibilityCriterion {
                    criteria: "Age Requirement".into(),
                    description: "Student must be at least 5 years old for Grade 1 admission.".into(),
                },
                EligibilityCriterion {
                    criteria: "Academic Records".into(),
                    description: "Previous year report card must be submitted for evaluation.".into(),
                },
            ],
        }
    }
}

pub fn eligibility_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "eligibilityCriteria",
            "Criteria",
            FieldKind::Rows(vec![
                RowField::new("criteria", "Criteria"),
                RowField::new("description", "Description").long(),
            ]),
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    pub title: String,
    pub description: String,
    pub events: Vec<SchoolEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolEvent {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub read_more_link: String,
}

impl Default for EventData {
    fn default() -> Self {
        Self {
            title: "MELT EVENTS AND UPDATES".into(),
            description: "Stay updated with our upcoming events and activities.".into(),
            events: vec![
                SchoolEvent {
                    name: "Hotel Visit For DBM".into(),
                    date: "2025-04-15".into(),
                    time: "9".into(),
                    location: "Shirtshoven".into(),
                    description: "Students will gain valuable insights into hospitality management during a guided hotel visit.".into(),
                    read_more_link: "#".into(),
                },
                SchoolEvent {
                    name: "Hotel Visit For Hotel Management".into(),
                    date: "2025-06-05".into(),
                    time: "10".into(),
                    location: "Pulcher".into(),
                    description: "As part of their practical training, Hotel Management students will tour front office, guest services, and food and beverage operations.".into(),
                    read_more_link: "#".into(),
                },
            ],
        }
    }
}

pub fn events_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "events",
            "Events",
            FieldKind::Rows(vec![
                RowField::new("name", "Name"),
                RowField::new("date", "Date"),
                RowField::new("time", "Time"),
                RowField::new("location", "Location"),
                RowField::new("description", "Description").long(),
                RowField::new("readMoreLink", "Read more link").optional(),
            ]),
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryData {
    pub title: String,
    pub description: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
}

impl Default for GalleryData {
    fn default() -> Self {
        Self {
            title: "School Gallery".into(),
            description: "Explore moments from our school life through our photo gallery.".into(),
            images: vec![GalleryImage { url: String::new(), caption: "School Event".into() }],
        }
    }
}

pub fn gallery_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "images",
            "Images",
            FieldKind::Rows(vec![
                RowField::new("url", "URL"),
                RowField::new("caption", "Caption").optional(),
            ]),
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HowToApplyData {
    pub title: String,
    pub description: String,
    pub steps: Vec<AdmissionStep>,
    pub contact_info: String,
}

impl Default for HowToApplyData {
    fn default() -> Self {
        Self {
            title: "How to Apply".into(),
            description: "Follow these simple steps to apply for admission to our school.".into(),
            steps: vec![
                AdmissionStep {
                    step: "Download the application form".into(),
                    description: "Download the application form from our website".into(),
                },
                AdmissionStep {
                    step: "Fill out the form".into(),
                    description: "Fill out the form completely with accurate information".into(),
                },
            ],
            contact_info: "For any queries related to admissions, contact us at admissions@aayamglobal.com or call +1234567890".into(),
        }
    }
}

pub fn how_to_apply_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "steps",
            "Steps",
            FieldKind::Rows(vec![
                RowField::new("step", "Step"),
                RowField::new("description", "Description").long(),
            ]),
        ),
        FieldSpec::long_text("contactInfo", "Contact info").required().min_len(10),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeData {
    pub title: String,
    pub description: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notice {
    pub title: String,
    pub date: String,
    pub content: String,
}

impl Default for NoticeData {
    fn default() -> Self {
        Self {
            title: "Notices & Announcements".into(),
            description: "Important notices and announcements for students and parents.".into(),
            notices: vec![Notice {
                title: "Holiday Notice".into(),
                date: "2023-10-02".into(),
                content: "School will remain closed on October 5th for Gandhi Jayanti.".into(),
            }],
        }
    }
}

pub fn notices_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "notices",
            "Notices",
            FieldKind::Rows(vec![
                RowField::new("title", "Title"),
                RowField::new("date", "Date"),
                RowField::new("content", "Content").long(),
            ]),
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipData {
    pub title: String,
    pub description: String,
    pub scholarships: Vec<Scholarship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scholarship {
    pub name: String,
    pub eligibility: String,
    pub benefits: String,
}

impl Default for ScholarshipData {
    fn default() -> Self {
        Self {
            title: "Scholarships".into(),
            description: "Information about scholarships available for students.".into(),
            scholarships: vec![
                Scholarship {
                    name: "Merit Scholarship".into(),
                    eligibility: "Students with 95% or above in previous year".into(),
                    benefits: "50% tuition fee waiver".into(),
                },
                Scholarship {
                    name: "Need-Based Scholarship".into(),
                    eligibility: "Students from economically disadvantaged backgrounds".into(),
                    benefits: "Up to 100% tuition fee waiver based on need".into(),
                },
            ],
        }
    }
}

pub fn scholarships_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required().min_len(2).max_len(50),
        FieldSpec::long_text("description", "Description").required().min_len(10),
        FieldSpec::new(
            "scholarships",
            "Scholarships",
            FieldKind::Rows(vec![
                RowField::new("name", "Name"),
                RowField::new("eligibility", "Eligibility"),
                RowField::new("benefits", "Benefits"),
            ]),
        ),
    ])
}

/// Contact page section; social links nest under `socialMedia` on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSectionData {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub map_embed: String,
    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub youtube: String,
}

impl Default for ContactSectionData {
    fn default() -> Self {
        Self {
            address: "123 School Street, City, State, ZIP".into(),
            phone: "+1 (123) 456-7890".into(),
            email: "info@aayamglobal.com".into(),
            map_embed: "https://www.google.com/maps/embed?pb=...".into(),
            social_media: SocialMedia {
                facebook: "https://facebook.com/aayamglobal".into(),
                twitter: "https://twitter.com/aayamglobal".into(),
                instagram: "https://instagram.com/aayamglobal".into(),
                youtube: "https://youtube.com/aayamglobal".into(),
            },
        }
    }
}

impl ContactSectionData {
    /// Flatten for the form; the schema addresses social links directly.
    pub fn to_form_values(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("address".into(), Value::String(self.address.clone()));
        map.insert("phone".into(), Value::String(self.phone.clone()));
        map.insert("email".into(), Value::String(self.email.clone()));
        map.insert("mapEmbed".into(), Value::String(self.map_embed.clone()));
        map.insert("facebook".into(), Value::String(self.social_media.facebook.clone()));
        map.insert("twitter".into(), Value::String(self.social_media.twitter.clone()));
        map.insert("instagram".into(), Value::String(self.social_media.instagram.clone()));
        map.insert("youtube".into(), Value::String(self.social_media.youtube.clone()));
        map
    }

    /// Rebuild the nested record from submitted form values.
    pub fn from_form_values(values: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            values.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
        };
        Self {
            address: text("address"),
            phone: text("phone"),
            email: text("email"),
            map_embed: text("mapEmbed"),
            social_media: SocialMedia {
                facebook: text("facebook"),
                twitter: text("twitter"),
                instagram: text("instagram"),
                youtube: text("youtube"),
            },
        }
    }
}

pub fn contact_section_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::long_text("address", "Address").required(),
        FieldSpec::text("phone", "Phone").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("mapEmbed", "Map embed URL", FieldKind::Url),
        FieldSpec::new("facebook", "Facebook", FieldKind::Url),
        FieldSpec::new("twitter", "Twitter", FieldKind::Url),
        FieldSpec::new("instagram", "Instagram", FieldKind::Url),
        FieldSpec::new("youtube", "YouTube", FieldKind::Url),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_default_passes_its_own_schema() {
        let values = serde_json::to_value(AdmissionData::default())
            .unwrap()
            .as_object()
            .cloned()
            .unwrap();
        assert!(admission_schema().validate_all(&values).is_empty());
    }

    #[test]
    fn test_eligibility_key_spelling_is_preserved() {
        // The published site stores this section under a misspelled key.
        assert_eq!(ELIGIBILITY_KEY, "eligiabilityData");
    }

    #[test]
    fn test_event_rows_require_core_fields() {
        let mut data = EventData::default();
        data.events[0].location = String::new();
        let values = serde_json::to_value(&data).unwrap().as_object().cloned().unwrap();
        assert!(events_schema().validate_all(&values).contains_key("events"));
    }

    #[test]
    fn test_contact_section_form_round_trip() {
        let info = ContactSectionData::default();
        let back = ContactSectionData::from_form_values(&info.to_form_values());
        assert_eq!(back, info);
    }

    #[test]
    fn test_contact_section_json_nests_social_media() {
        let json = serde_json::to_value(ContactSectionData::default()).unwrap();
        assert_eq!(json["socialMedia"]["facebook"], "https://facebook.com/aayamglobal");
        assert!(json.get("facebook").is_none());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let data: GalleryData = serde_json::from_str(r#"{"title":"Moments"}"#).unwrap();
        assert_eq!(data.title, "Moments");
        assert_eq!(data.images.len(), 1);
    }
}
