//! Courses offered by the school.

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::forms::{FieldSpec, Schema};

pub const COURSES_KEY: &str = "school-cms-courses";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub level: String,
    pub duration: String,
}

impl Entity for Course {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

pub fn seed_courses() -> Vec<Course> {
    vec![
        Course { id: 1, name: "Hotel Management".into(), level: "+2".into(), duration: "2 years".into() },
        Course { id: 2, name: "General Management".into(), level: "+2".into(), duration: "2 years".into() },
        Course {
            id: 3,
            name: "Diploma in Hotel Management (DHM)".into(),
            level: "Diploma".into(),
            duration: "3 years".into(),
        },
    ]
}

pub fn course_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("level", "Level").required(),
        FieldSpec::text("duration", "Duration").required(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_round_trip() {
        let course = seed_courses().remove(2);
        let json = serde_json::to_string(&course).unwrap();
        let back: Course = serde_json::from_str(&json).unwrap();
        assert_eq!(back, course);
        assert_eq!(back.name, "Diploma in Hotel Management (DHM)");
    }

    #[test]
    fn test_course_schema_requires_all_fields() {
        let errors = course_schema().validate_all(&serde_json::Map::new());
        assert_eq!(errors.len(), 3);
    }
}
