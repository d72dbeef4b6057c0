//! The About page: one nested record covering banner, vision, principal's
//! message, milestones, programs, and the page-local team list.

use serde::{Deserialize, Serialize};

use crate::forms::{FieldKind, FieldSpec, RowField, Schema};

pub const ABOUT_KEY: &str = "school-cms-about-data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutData {
    pub banner: BannerSection,
    pub vision: BannerSection,
    pub get_to_know_us: GetToKnowUs,
    pub principle_message: PrincipleMessage,
    pub milestone: MilestoneSection,
    pub programs: ProgramsSection,
    pub team: Vec<AboutTeamMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerSection {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetToKnowUs {
    pub subtitle: String,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrincipleMessage {
    pub subtitle: String,
    pub title: String,
    pub intro_text: String,
    pub principal_image_url: String,
    pub message: String,
    pub principal_name: String,
    pub principal_designation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MilestoneSection {
    pub section_title: String,
    pub heading: String,
    pub description: String,
    pub milestones: Vec<Milestone>,
}

impl Default for MilestoneSection {
    fn default() -> Self {
        Self {
            section_title: String::new(),
            heading: String::new(),
            description: String::new(),
            // The page layout shows four counters.
            milestones: vec![Milestone::default(); 4],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    pub title: String,
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramsSection {
    pub program_title: String,
    pub program_subtitle: String,
    pub description: String,
    pub program_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutTeamMember {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image_url: String,
}

impl AboutData {
    /// Add a member to the page-local team, assigning the next free id.
    pub fn add_team_member(&mut self, mut member: AboutTeamMember) -> u32 {
        let id = self.team.iter().map(|m| m.id).max().map_or(1, |max| max + 1);
        member.id = id;
        self.team.push(member);
        id
    }

    /// Replace the member with the same id; false when no such member exists.
    pub fn update_team_member(&mut self, member: AboutTeamMember) -> bool {
        match self.team.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => false,
        }
    }

    pub fn remove_team_member(&mut self, id: u32) -> bool {
        let before = self.team.len();
        self.team.retain(|m| m.id != id);
        self.team.len() != before
    }
}

pub fn banner_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required(),
        FieldSpec::long_text("description", "Description").required(),
        FieldSpec::new("imageUrl", "Image", FieldKind::Image),
    ])
}

pub fn get_to_know_us_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("subtitle", "Subtitle"),
        FieldSpec::text("title", "Title").required(),
        FieldSpec::long_text("description", "Description").required(),
    ])
}

pub fn principle_message_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("subtitle", "Subtitle"),
        FieldSpec::text("title", "Title").required(),
        FieldSpec::long_text("introText", "Intro text"),
        FieldSpec::new("principalImageUrl", "Principal photo", FieldKind::Image),
        FieldSpec::long_text("message", "Message").required(),
        FieldSpec::text("principalName", "Principal name").required(),
        FieldSpec::text("principalDesignation", "Principal designation"),
    ])
}

pub fn milestone_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("sectionTitle", "Section title"),
        FieldSpec::text("heading", "Heading").required(),
        FieldSpec::long_text("description", "Description"),
        FieldSpec::new(
            "milestones",
            "Milestones",
            FieldKind::Rows(vec![
                RowField::new("title", "Title"),
                RowField::new("number", "Number"),
            ]),
        ),
    ])
}

pub fn programs_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("programTitle", "Title").required(),
        FieldSpec::text("programSubtitle", "Subtitle"),
        FieldSpec::long_text("description", "Description").required(),
        FieldSpec::new("programImageUrl", "Image", FieldKind::Image),
    ])
}

pub fn about_team_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("role", "Role").required(),
        FieldSpec::long_text("description", "Description"),
        FieldSpec::new("imageUrl", "Image", FieldKind::Image),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_four_empty_milestones() {
        let data = AboutData::default();
        assert_eq!(data.milestone.milestones.len(), 4);
        assert!(data.team.is_empty());
    }

    #[test]
    fn test_team_member_ids_are_max_plus_one() {
        let mut data = AboutData::default();
        let first = data.add_team_member(AboutTeamMember {
            name: "A".into(),
            ..Default::default()
        });
        let second = data.add_team_member(AboutTeamMember {
            name: "B".into(),
            ..Default::default()
        });
        assert_eq!((first, second), (1, 2));

        data.remove_team_member(1);
        // Max + 1, not len + 1: the freed id is not reused while 2 exists.
        let third = data.add_team_member(AboutTeamMember::default());
        assert_eq!(third, 3);
    }

    #[test]
    fn test_update_unknown_team_member_is_noop() {
        let mut data = AboutData::default();
        assert!(!data.update_team_member(AboutTeamMember { id: 9, ..Default::default() }));
    }

    #[test]
    fn test_json_shape_matches_page_keys() {
        let json = serde_json::to_value(AboutData::default()).unwrap();
        assert!(json.get("getToKnowUs").is_some());
        assert!(json.get("principleMessage").is_some());
        assert!(json["milestone"].get("sectionTitle").is_some());
    }

    #[test]
    fn test_partial_record_fills_in_defaults() {
        let data: AboutData =
            serde_json::from_str(r#"{"banner":{"title":"Welcome"}}"#).unwrap();
        assert_eq!(data.banner.title, "Welcome");
        assert_eq!(data.milestone.milestones.len(), 4);
    }
}
