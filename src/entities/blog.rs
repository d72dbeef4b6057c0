//! Blog posts and their category list.

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::forms::{FieldKind, FieldSpec, Schema};

pub const BLOGS_KEY: &str = "blogs";
pub const CATEGORIES_KEY: &str = "categories";

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub date: String,
    /// Remote URL or embedded data-URL; absent for text-only posts.
    #[serde(default)]
    pub image: Option<String>,
}

impl Entity for Blog {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

pub fn seed_blogs() -> Vec<Blog> {
    vec![
        Blog {
            id: 1,
            title: "The myth of Housekeeping".into(),
            content: "Housekeeping is often seen as a routine and behind-the-scenes operation..."
                .into(),
            excerpt: "Housekeeping is often seen as a routine and behind-the-scenes operation in the household industry...".into(),
            category: "Housekeeping".into(),
            author: "Anne Chlain".into(),
            date: "2005-06-10".into(),
            image: None,
        },
        Blog {
            id: 2,
            title: "Field Visit to Hotel Reception".into(),
            content: "As part of the practical training for Hotel Management students...".into(),
            excerpt: "As part of the practical training for Hotel Management students...".into(),
            category: "Field Visit".into(),
            author: "Admin".into(),
            date: "2023-05-15".into(),
            image: None,
        },
        Blog {
            id: 3,
            title: "Playing with numbers".into(),
            content: "Playing with Numbers at Angam Global School offers students a unique and innovative way...".into(),
            excerpt: "Playing with Numbers at Angam Global School offers students a unique and innovative way...".into(),
            category: "General Accounting".into(),
            author: "Home Video".into(),
            date: "2023-02-20".into(),
            image: None,
        },
    ]
}

pub fn default_categories() -> Vec<String> {
    ["Kitchen Arts", "Field Visit", "Housekeeping", "General Accounting"]
        .map(String::from)
        .to_vec()
}

/// Form schema for adding/editing a blog; categories come from the live list.
pub fn blog_schema(categories: &[String]) -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").required(),
        FieldSpec::long_text("content", "Content").required(),
        FieldSpec::long_text("excerpt", "Excerpt").max_len(150),
        FieldSpec::new("category", "Category", FieldKind::Select(categories.to_vec())).required(),
        FieldSpec::text("author", "Author").required(),
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("image", "Image", FieldKind::Image),
    ])
}

/// Whether a post passes the category filter; `All` (or an empty selection)
/// passes everything through.
pub fn matches_category(blog: &Blog, category: &str) -> bool {
    category == ALL_CATEGORIES || category.is_empty() || blog.category == category
}

/// Apply the category filter to a whole list.
pub fn filter_by_category<'a>(blogs: &'a [Blog], category: &str) -> Vec<&'a Blog> {
    blogs.iter().filter(|b| matches_category(b, category)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_passes_everything() {
        let blogs = seed_blogs();
        assert_eq!(filter_by_category(&blogs, ALL_CATEGORIES).len(), blogs.len());
        assert_eq!(filter_by_category(&blogs, "").len(), blogs.len());
    }

    #[test]
    fn test_filter_matches_exact_category() {
        let blogs = seed_blogs();
        let hits = filter_by_category(&blogs, "Housekeeping");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The myth of Housekeeping");
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let blogs = seed_blogs();
        assert!(filter_by_category(&blogs, "Astronomy").is_empty());
    }

    #[test]
    fn test_matches_category_per_post() {
        let post = &seed_blogs()[1];
        assert!(matches_category(post, "Field Visit"));
        assert!(matches_category(post, ALL_CATEGORIES));
        assert!(!matches_category(post, "Housekeeping"));
    }

    #[test]
    fn test_blog_json_shape_is_camel_case() {
        let json = serde_json::to_value(&seed_blogs()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["category"], "Housekeeping");
        assert!(json["image"].is_null());
    }

    #[test]
    fn test_blog_without_id_defaults_to_zero() {
        let blog: Blog = serde_json::from_str(
            r#"{"title":"t","content":"c","category":"Field Visit","author":"a","date":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(blog.id, 0);
        assert_eq!(blog.excerpt, "");
        assert_eq!(blog.image, None);
    }
}
