//! Courses page.

use egui::Ui;

use crate::core::{EntityStore, EventBus};
use crate::entities::course::{self, Course};

use super::crud::{CrudConfig, CrudPage};

#[derive(Default)]
pub struct CoursesPage {
    crud: CrudPage<Course>,
}

impl CoursesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, store: &mut EntityStore<Course>, bus: &EventBus) {
        let schema = course::course_schema();
        let config = CrudConfig {
            noun: "Course",
            headers: &["Name", "Level", "Duration"],
            row: &|ui, course: &Course| {
                ui.label(&course.name);
                ui.label(&course.level);
                ui.label(&course.duration);
            },
            summary: &|course| course.name.clone(),
            visible: &|_| true,
        };
        self.crud.ui(ui, store, &schema, &config, bus);
    }
}
