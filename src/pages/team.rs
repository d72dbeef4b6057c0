//! Team members page.

use egui::{RichText, Ui};

use crate::core::{EntityStore, EventBus};
use crate::entities::team::{self, TeamMember};
use crate::forms::render::data_url_preview;

use super::crud::{CrudConfig, CrudPage};

#[derive(Default)]
pub struct TeamPage {
    crud: CrudPage<TeamMember>,
}

impl TeamPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, store: &mut EntityStore<TeamMember>, bus: &EventBus) {
        let schema = team::team_schema();
        let config = CrudConfig {
            noun: "Team member",
            headers: &["Photo", "Name", "Designation", "Bio"],
            row: &|ui, member: &TeamMember| {
                match &member.profile_picture {
                    Some(url) => data_url_preview(ui, "profilePicture", url),
                    None => {
                        ui.label(RichText::new("-").weak());
                    }
                }
                ui.label(&member.name);
                ui.label(&member.designation);
                ui.label(truncate(&member.bio, 60));
            },
            summary: &|member| member.name.clone(),
            visible: &|_| true,
        };
        self.crud.ui(ui, store, &schema, &config, bus);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 60), "short");
    }

    #[test]
    fn test_truncate_cuts_on_char_boundary() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 60);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 63);
    }
}
