//! Partitioning of the flat portfolio feed for display.
//!
//! Every function here is pure: it borrows a snapshot of categories,
//! sub-categories and items and returns views into it. Items keep the order
//! they arrive in, which for repository reads is newest first.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::portfolio_item::PortfolioItem;
use crate::domain::sub_category::SubCategory;
use crate::domain::types::{CategoryId, SubCategoryId, SubCategoryRef};

/// Token separating a packed sub-category label from the real description
/// in legacy records, e.g. `Posters||Tour poster for ...`.
pub const LEGACY_SEPARATOR: &str = "||";

/// Bucket for legacy records without a usable label.
pub const LEGACY_FALLBACK_LABEL: &str = "Other";

/// Shown wherever an item has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "لا يوجد وصف متاح لهذا العمل حالياً.";

/// Slug lookup over a category snapshot.
pub struct CategoryIndex<'a> {
    by_slug: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let by_slug = categories.iter().map(|c| (c.slug.as_str(), c)).collect();
        Self { by_slug }
    }

    pub fn get(&self, slug: &str) -> Option<&'a Category> {
        self.by_slug.get(slug).copied()
    }

    /// Matches the decoded slug first, then the slug as it appeared in the
    /// address.
    pub fn lookup(&self, decoded: &str, raw: &str) -> Option<&'a Category> {
        self.get(decoded).or_else(|| self.get(raw))
    }
}

/// One display bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    pub label: String,
    pub is_fallback: bool,
    pub items: Vec<T>,
}

/// Item with its sub-category resolved to a single label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem<'a> {
    pub item: &'a PortfolioItem,
    pub sub_category_label: Option<String>,
    /// Description ready for display, legacy prefix removed.
    pub description: String,
}

/// All items of one category, order preserved.
pub fn filter_by_category(items: &[PortfolioItem], category_id: CategoryId) -> Vec<&PortfolioItem> {
    items
        .iter()
        .filter(|item| item.category_id == category_id)
        .collect()
}

/// Splits a legacy `label||description` value.
///
/// Returns the label only when a separator is present and the part before
/// it is not blank. The returned description has the prefix removed whenever
/// a separator was found.
pub fn split_legacy_description(description: &str) -> (Option<&str>, &str) {
    match description.split_once(LEGACY_SEPARATOR) {
        Some((label, rest)) => {
            let label = label.trim();
            let label = (!label.is_empty()).then_some(label);
            (label, rest.trim())
        }
        None => (None, description),
    }
}

/// Placeholder for absent or blank descriptions.
pub fn display_description(description: Option<&str>) -> &str {
    match description.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => DESCRIPTION_PLACEHOLDER,
    }
}

/// Groups by a label in first-seen order. Unlabelled items land in a
/// fallback bucket that is always last.
fn group_by<T>(
    items: impl IntoIterator<Item = T>,
    label_of: impl Fn(&T) -> Option<String>,
    fallback_label: &str,
) -> Vec<Group<T>> {
    let mut groups: Vec<Group<T>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut fallback: Vec<T> = Vec::new();

    for item in items {
        let Some(label) = label_of(&item) else {
            fallback.push(item);
            continue;
        };
        match positions.get(&label) {
            Some(&index) => groups[index].items.push(item),
            None => {
                positions.insert(label.clone(), groups.len());
                groups.push(Group {
                    label,
                    is_fallback: false,
                    items: vec![item],
                });
            }
        }
    }

    if !fallback.is_empty() {
        groups.push(Group {
            label: fallback_label.to_string(),
            is_fallback: true,
            items: fallback,
        });
    }
    groups
}

/// Groups by the label packed into each description.
pub fn group_by_legacy_label<'a>(items: &[&'a PortfolioItem]) -> Vec<Group<&'a PortfolioItem>> {
    group_by(
        items.iter().copied(),
        |item| {
            item.description
                .as_deref()
                .and_then(|d| split_legacy_description(d).0)
                .map(str::to_string)
        },
        LEGACY_FALLBACK_LABEL,
    )
}

/// Groups by relational sub-category. Items without one (or pointing at a
/// removed one) fall into a bucket named after `parent`.
pub fn group_by_sub_category<'a>(
    items: &[&'a PortfolioItem],
    sub_categories: &[SubCategory],
    parent: &Category,
) -> Vec<Group<&'a PortfolioItem>> {
    let names: HashMap<SubCategoryId, &str> = sub_categories
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();
    group_by(
        items.iter().copied(),
        |item| match &item.sub_category {
            SubCategoryRef::EntityRef { id } => names.get(id).map(|name| name.to_string()),
            _ => None,
        },
        parent.name.as_str(),
    )
}

/// Resolves every item's sub-category once.
///
/// Relational references are joined against `sub_categories`, legacy labels
/// are taken as-is and items without either are checked for a label packed
/// into the description.
pub fn normalize_items<'a>(
    items: &[&'a PortfolioItem],
    sub_categories: &[SubCategory],
) -> Vec<GalleryItem<'a>> {
    let names: HashMap<SubCategoryId, &str> = sub_categories
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();

    items
        .iter()
        .map(|&item| {
            let raw = item.description.as_deref().unwrap_or_default();
            let (packed_label, stripped) = split_legacy_description(raw);
            let label = match &item.sub_category {
                SubCategoryRef::EntityRef { id } => names.get(id).map(|n| n.to_string()),
                SubCategoryRef::LegacyLabel { label } => Some(label.clone()),
                SubCategoryRef::None => packed_label.map(str::to_string),
            };
            GalleryItem {
                item,
                sub_category_label: label,
                description: display_description(Some(stripped)).to_string(),
            }
        })
        .collect()
}

/// Groups normalized items by their resolved label.
pub fn group_gallery<'a>(
    items: Vec<GalleryItem<'a>>,
    fallback_label: &str,
) -> Vec<Group<GalleryItem<'a>>> {
    group_by(items, |item| item.sub_category_label.clone(), fallback_label)
}

/// Diverse preview for the home page.
///
/// Items are queued per category, in `categories` order followed by any
/// category only seen in `items`, and taken one per queue per round until
/// `quota` is reached or every queue is empty.
pub fn round_robin_preview<'a>(
    items: &'a [PortfolioItem],
    categories: &[Category],
    quota: usize,
) -> Vec<&'a PortfolioItem> {
    let mut queues: Vec<(CategoryId, VecDeque<&PortfolioItem>)> = categories
        .iter()
        .map(|c| (c.id, VecDeque::new()))
        .collect();
    for item in items {
        match queues.iter_mut().find(|(id, _)| *id == item.category_id) {
            Some((_, queue)) => queue.push_back(item),
            None => queues.push((item.category_id, VecDeque::from([item]))),
        }
    }

    let mut preview = Vec::with_capacity(quota.min(items.len()));
    while preview.len() < quota {
        let mut progressed = false;
        for (_, queue) in queues.iter_mut() {
            if preview.len() == quota {
                break;
            }
            if let Some(item) = queue.pop_front() {
                preview.push(item);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    preview
}
