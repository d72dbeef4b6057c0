//! Application shell: navigation, stores, event handling, status line.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use log::debug;

use crate::core::{AppEvent, EntityStore, EventBus, LocalStorage, SectionStore};
use crate::entities::about::AboutData;
use crate::entities::contact::ContactInfo;
use crate::entities::{about, blog, contact, course, team};
use crate::entities::{Blog, Contact, Course, TeamMember};
use crate::pages::{
    AboutPage, BlogsPage, ContactsPage, CoursesPage, SectionStores, SectionsPage, TeamPage,
};

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nav {
    #[default]
    Blogs,
    Courses,
    Contacts,
    Team,
    About,
    Sections,
}

impl Nav {
    pub const ALL: [Nav; 6] =
        [Nav::Blogs, Nav::Courses, Nav::Contacts, Nav::Team, Nav::About, Nav::Sections];

    pub fn label(self) -> &'static str {
        match self {
            Nav::Blogs => "Blogs",
            Nav::Courses => "Courses",
            Nav::Contacts => "Contacts",
            Nav::Team => "Team",
            Nav::About => "About",
            Nav::Sections => "Sections",
        }
    }

    /// Parse a startup page argument; unknown names fall back to None.
    pub fn from_arg(arg: &str) -> Option<Nav> {
        match arg.to_lowercase().as_str() {
            "blogs" => Some(Nav::Blogs),
            "courses" => Some(Nav::Courses),
            "contacts" => Some(Nav::Contacts),
            "team" => Some(Nav::Team),
            "about" => Some(Nav::About),
            "sections" => Some(Nav::Sections),
            _ => None,
        }
    }
}

pub struct ChalkbookApp {
    nav: Nav,
    bus: EventBus,

    blogs: EntityStore<Blog>,
    categories: SectionStore<Vec<String>>,
    courses: EntityStore<Course>,
    contacts: EntityStore<Contact>,
    contact_info: SectionStore<ContactInfo>,
    team: EntityStore<TeamMember>,
    about: SectionStore<AboutData>,
    sections: SectionStores,

    blogs_page: BlogsPage,
    courses_page: CoursesPage,
    contacts_page: ContactsPage,
    team_page: TeamPage,
    about_page: AboutPage,
    sections_page: SectionsPage,

    status: Option<(String, Instant)>,
}

impl ChalkbookApp {
    pub fn new(cc: &eframe::CreationContext<'_>, storage: Arc<LocalStorage>, start: Nav) -> Self {
        // Needed for bytes:// and http(s):// image previews
        egui_extras::install_image_loaders(&cc.egui_ctx);

        Self {
            nav: start,
            bus: EventBus::new(),
            blogs: EntityStore::open(storage.clone(), blog::BLOGS_KEY, blog::seed_blogs),
            categories: SectionStore::open(
                storage.clone(),
                blog::CATEGORIES_KEY,
                blog::default_categories,
            ),
            courses: EntityStore::open(storage.clone(), course::COURSES_KEY, course::seed_courses),
            contacts: EntityStore::open(
                storage.clone(),
                contact::CONTACTS_KEY,
                contact::seed_contacts,
            ),
            contact_info: SectionStore::open(
                storage.clone(),
                contact::CONTACT_INFO_KEY,
                ContactInfo::default,
            ),
            team: EntityStore::open(storage.clone(), team::TEAM_KEY, team::seed_team),
            about: SectionStore::open(storage.clone(), about::ABOUT_KEY, AboutData::default),
            sections: SectionStores::open(&storage),
            blogs_page: BlogsPage::new(),
            courses_page: CoursesPage::new(),
            contacts_page: ContactsPage::new(),
            team_page: TeamPage::new(),
            about_page: AboutPage::new(),
            sections_page: SectionsPage::new(),
            status: None,
        }
    }

    fn drain_events(&mut self) {
        for event in self.bus.poll() {
            match event {
                AppEvent::Notify(message) => {
                    self.status = Some((message, Instant::now()));
                }
                AppEvent::StoreChanged { key } => {
                    debug!("Store '{}' changed", key);
                }
            }
        }
        if let Some((_, since)) = &self.status {
            if since.elapsed() > STATUS_TIMEOUT {
                self.status = None;
            }
        }
    }
}

impl eframe::App for ChalkbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(140.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Chalkbook");
                ui.separator();
                for nav in Nav::ALL {
                    if ui.selectable_label(self.nav == nav, nav.label()).clicked() {
                        self.nav = nav;
                    }
                }
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            match &self.status {
                Some((message, _)) => {
                    ui.label(message);
                }
                None => {
                    ui.label(egui::RichText::new("Ready").weak());
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.nav {
            Nav::Blogs => {
                self.blogs_page.ui(ui, &mut self.blogs, &mut self.categories, &self.bus)
            }
            Nav::Courses => self.courses_page.ui(ui, &mut self.courses, &self.bus),
            Nav::Contacts => {
                self.contacts_page.ui(ui, &mut self.contacts, &mut self.contact_info, &self.bus)
            }
            Nav::Team => self.team_page.ui(ui, &mut self.team, &self.bus),
            Nav::About => self.about_page.ui(ui, &mut self.about, &self.bus),
            Nav::Sections => self.sections_page.ui(ui, &mut self.sections, &self.bus),
        });

        // Background image reads finish without user input; keep polling.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_from_arg_is_case_insensitive() {
        assert_eq!(Nav::from_arg("Blogs"), Some(Nav::Blogs));
        assert_eq!(Nav::from_arg("SECTIONS"), Some(Nav::Sections));
        assert_eq!(Nav::from_arg("unknown"), None);
    }
}
