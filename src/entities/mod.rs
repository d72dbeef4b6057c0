//! Entities module - the records the site is made of
//!
//! Each entity file carries the type, its storage key, the seed content a
//! fresh install starts from, and the form schema that edits it.

pub mod about;
pub mod blog;
pub mod contact;
pub mod course;
pub mod sections;
pub mod team;

pub use about::{AboutData, AboutTeamMember, ABOUT_KEY};
pub use blog::{Blog, ALL_CATEGORIES, BLOGS_KEY, CATEGORIES_KEY};
pub use contact::{Contact, ContactInfo, CONTACTS_KEY, CONTACT_INFO_KEY};
pub use course::{Course, COURSES_KEY};
pub use team::{TeamMember, TEAM_KEY};
