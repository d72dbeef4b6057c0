//! Team members shown on the public site.

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::forms::{FieldKind, FieldSpec, Schema};

pub const TEAM_KEY: &str = "teamMembers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub designation: String,
    /// Embedded data-URL; required, every member card shows a photo.
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub bio: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

impl Entity for TeamMember {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// The team list starts empty; there is no seed roster.
pub fn seed_team() -> Vec<TeamMember> {
    Vec::new()
}

pub fn team_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("designation", "Designation").required(),
        FieldSpec::new("profilePicture", "Profile picture", FieldKind::Image).required(),
        FieldSpec::long_text("bio", "Bio").required().max_len(200),
        FieldSpec::new("linkedin", "LinkedIn", FieldKind::Url),
        FieldSpec::new("twitter", "Twitter", FieldKind::Url),
        FieldSpec::new("facebook", "Facebook", FieldKind::Url),
    ])
}
