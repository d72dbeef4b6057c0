//! Admin pages - one module per navigation entry
//!
//! Each page owns its transient UI state (open form, filter, mode) and
//! borrows its store from the app for the duration of a frame.

pub mod about;
pub mod blogs;
pub mod contacts;
pub mod coordinator;
pub mod courses;
pub mod crud;
pub mod sections;
pub mod team;

pub use about::AboutPage;
pub use blogs::BlogsPage;
pub use contacts::ContactsPage;
pub use coordinator::Mode;
pub use courses::CoursesPage;
pub use crud::{CrudConfig, CrudPage};
pub use sections::{SectionStores, SectionsPage};
pub use team::TeamPage;
