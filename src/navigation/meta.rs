//! Per-view document metadata.

use serde::{Deserialize, Serialize};

use crate::grouping::CategoryIndex;
use crate::navigation::View;

/// Site-wide metadata defaults, loaded from the `site` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    pub owner_name: String,
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: String,
    pub admin_title: String,
    pub admin_description: String,
    /// Used for categories without a description. `{owner}` and `{name}` are
    /// substituted.
    #[serde(default = "default_category_description")]
    pub category_description: String,
}

fn default_category_description() -> String {
    "استكشف أعمال {owner} في مجال {name}.".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Title, description and keywords for `view`. Unresolved category slugs get
/// the defaults.
pub fn page_meta(view: &View, categories: &CategoryIndex<'_>, site: &SiteMeta) -> PageMeta {
    let defaults = PageMeta {
        title: site.default_title.clone(),
        description: site.default_description.clone(),
        keywords: site.default_keywords.clone(),
    };

    match view {
        View::Home => defaults,
        View::Login | View::Dashboard => PageMeta {
            title: site.admin_title.clone(),
            description: site.admin_description.clone(),
            ..defaults
        },
        View::CategoryDetail { slug, raw } => match categories.lookup(slug, raw) {
            Some(category) => {
                let name = category.name.as_str();
                let description = if category.description.trim().is_empty() {
                    site.category_description
                        .replace("{owner}", &site.owner_name)
                        .replace("{name}", name)
                } else {
                    category.description.clone()
                };
                PageMeta {
                    title: format!("{name} | {}", site.owner_name),
                    description,
                    keywords: format!("{name}, {}", site.default_keywords),
                }
            }
            None => defaults,
        },
    }
}

/// A `<title>` or `<meta>` element of the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadElement {
    /// `title` or `meta`.
    pub tag: &'static str,
    /// `name` or `property` for meta elements, empty for the title.
    pub attribute: &'static str,
    pub key: String,
    pub content: String,
}

/// Document head with upsert semantics: an element is created when absent
/// and overwritten otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentHead {
    elements: Vec<HeadElement>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, tag: &'static str, attribute: &'static str, key: &str, content: &str) {
        let existing = self
            .elements
            .iter_mut()
            .find(|e| e.tag == tag && e.attribute == attribute && e.key == key);
        match existing {
            Some(element) => element.content = content.to_string(),
            None => self.elements.push(HeadElement {
                tag,
                attribute,
                key: key.to_string(),
                content: content.to_string(),
            }),
        }
    }

    pub fn apply(&mut self, meta: &PageMeta) {
        self.upsert("title", "", "title", &meta.title);
        self.upsert("meta", "name", "description", &meta.description);
        self.upsert("meta", "name", "keywords", &meta.keywords);
        self.upsert("meta", "property", "og:title", &meta.title);
        self.upsert("meta", "property", "og:description", &meta.description);
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    pub fn title(&self) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.tag == "title")
            .map(|e| e.content.as_str())
    }

    pub fn content(&self, attribute: &str, key: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.tag == "meta" && e.attribute == attribute && e.key == key)
            .map(|e| e.content.as_str())
    }
}

impl From<&PageMeta> for DocumentHead {
    fn from(meta: &PageMeta) -> Self {
        let mut head = Self::new();
        head.apply(meta);
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::repository::test::{sample_category, sample_site as site};

    fn detail(slug: &str) -> View {
        View::CategoryDetail {
            slug: slug.into(),
            raw: slug.into(),
        }
    }

    #[test]
    fn admin_views_share_title() {
        let index = CategoryIndex::new(&[]);
        let meta = page_meta(&View::Dashboard, &index, &site());
        assert_eq!(meta.title, "Dashboard | Owner");
        assert_eq!(meta.keywords, "design, photo");
    }

    #[test]
    fn category_meta_uses_template_without_description() {
        let categories = vec![sample_category(1, "Video", "video")];
        let index = CategoryIndex::new(&categories);

        let meta = page_meta(&detail("video"), &index, &site());

        assert_eq!(meta.title, "Video | Owner");
        assert_eq!(meta.description, "استكشف أعمال Owner في مجال Video.");
        assert_eq!(meta.keywords, "Video, design, photo");
    }

    #[test]
    fn category_meta_prefers_own_description() {
        let mut category: Category = sample_category(1, "Video", "video");
        category.description = "Motion work".into();
        let categories = vec![category];
        let index = CategoryIndex::new(&categories);

        let meta = page_meta(&detail("video"), &index, &site());
        assert_eq!(meta.description, "Motion work");

        let fallback = page_meta(&detail("missing"), &index, &site());
        assert_eq!(fallback.title, "Owner | Portfolio");
    }

    #[test]
    fn applying_twice_keeps_single_elements() {
        let index = CategoryIndex::new(&[]);
        let meta = page_meta(&View::Home, &index, &site());
        let mut head = DocumentHead::new();

        head.apply(&meta);
        head.apply(&meta);

        assert_eq!(head.elements().len(), 5);
        assert_eq!(head.title(), Some("Owner | Portfolio"));
        assert_eq!(head.content("property", "og:description"), Some("Works"));
    }

    #[test]
    fn apply_overwrites_existing_content() {
        let index = CategoryIndex::new(&[]);
        let mut head = DocumentHead::from(&page_meta(&View::Home, &index, &site()));
        head.apply(&page_meta(&View::Login, &index, &site()));

        assert_eq!(head.elements().len(), 5);
        assert_eq!(head.title(), Some("Dashboard | Owner"));
        assert_eq!(head.content("name", "description"), Some("Manage"));
    }
}
