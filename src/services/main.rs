//! Public pages.
//!
//! Every page starts from a full snapshot of the three collections. A failed
//! read is logged and leaves that collection empty; nothing is rendered
//! before all three reads have finished.

use serde::Serialize;

use crate::domain::auth::OwnerSession;
use crate::domain::category::Category;
use crate::domain::portfolio_item::PortfolioItem;
use crate::domain::sub_category::SubCategory;
use crate::dto::categories::CategoryDto;
use crate::dto::gallery::{GalleryCardDto, GalleryGroupDto};
use crate::grouping::{
    CategoryIndex, filter_by_category, group_gallery, normalize_items, round_robin_preview,
};
use crate::navigation::meta::{DocumentHead, SiteMeta, page_meta};
use crate::navigation::{Effect, HOME_TOKEN, Router, Screen, View, screen_for};
use crate::repository::{
    CategoryReader, PortfolioItemListQuery, PortfolioItemReader, SubCategoryListQuery,
    SubCategoryReader,
};
use crate::services::dashboard::{DashboardPage, dashboard_page};
use crate::storage::MediaStorage;

/// Everything the public site reads, fetched in one go.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub sub_categories: Vec<SubCategory>,
    pub items: Vec<PortfolioItem>,
}

pub fn load_snapshot<R>(repo: &R) -> Snapshot
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader,
{
    let categories = repo.list_categories().unwrap_or_else(|e| {
        log::error!("Failed to list categories: {e}");
        vec![]
    });
    let sub_categories = repo
        .list_sub_categories(SubCategoryListQuery::default())
        .unwrap_or_else(|e| {
            log::error!("Failed to list sub-categories: {e}");
            vec![]
        });
    let items = repo
        .list_items(PortfolioItemListQuery::default())
        .unwrap_or_else(|e| {
            log::error!("Failed to list portfolio items: {e}");
            vec![]
        });

    Snapshot {
        categories,
        sub_categories,
        items,
    }
}

/// Settings shared by every page render.
pub struct PageSettings<'a> {
    pub router: &'a Router,
    pub site: &'a SiteMeta,
    pub preview_quota: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Login,
    Dashboard,
    Category,
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub categories: Vec<CategoryDto>,
    pub preview: Vec<GalleryCardDto>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: CategoryDto,
    pub groups: Vec<GalleryGroupDto>,
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub kind: PageKind,
    pub head: DocumentHead,
    /// Element id to scroll to once the page has loaded.
    pub scroll_anchor: Option<String>,
    pub scroll_to_top: bool,
    pub signed_in: bool,
    pub home: Option<HomePage>,
    pub category: Option<CategoryPage>,
    pub dashboard: Option<DashboardPage>,
}

pub fn home_page(snapshot: &Snapshot, preview_quota: usize) -> HomePage {
    let preview = round_robin_preview(&snapshot.items, &snapshot.categories, preview_quota);
    HomePage {
        categories: snapshot
            .categories
            .iter()
            .map(|c| CategoryDto::with_items(c, &snapshot.items))
            .collect(),
        preview: normalize_items(&preview, &snapshot.sub_categories)
            .into_iter()
            .map(GalleryCardDto::from)
            .collect(),
    }
}

/// Items of `category` grouped by sub-category. Works without a
/// sub-category are grouped last under the category's own name.
pub fn category_page(snapshot: &Snapshot, category: &Category) -> CategoryPage {
    let items = filter_by_category(&snapshot.items, category.id);
    let gallery = normalize_items(&items, &snapshot.sub_categories);
    CategoryPage {
        category: CategoryDto::with_items(category, &snapshot.items),
        groups: group_gallery(gallery, category.name.as_str())
            .into_iter()
            .map(GalleryGroupDto::from)
            .collect(),
    }
}

/// Renders the page a fragment (or request path) resolves to.
pub fn show_page<R, S>(
    fragment: &str,
    session: Option<&OwnerSession>,
    settings: &PageSettings<'_>,
    repo: &R,
    storage: &S,
) -> PageView
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader,
    S: MediaStorage,
{
    let snapshot = load_snapshot(repo);
    let index = CategoryIndex::new(&snapshot.categories);

    let transition = settings.router.transition(fragment);
    let meta = page_meta(&transition.view, &index, settings.site);
    let scroll_anchor = transition
        .effects
        .iter()
        .find_map(|effect| effect.anchor().map(str::to_string));
    let scroll_to_top = transition.effects.contains(&Effect::ScrollToTop);

    let mut page = PageView {
        kind: PageKind::Home,
        head: DocumentHead::from(&meta),
        scroll_anchor,
        scroll_to_top,
        signed_in: session.is_some(),
        home: None,
        category: None,
        dashboard: None,
    };

    // Home only answers to the bare path, `home` and single-segment anchors.
    let normalized = Router::normalize(fragment);
    let stray_path = transition.view == View::Home
        && !normalized.is_empty()
        && normalized != HOME_TOKEN
        && !Router::is_anchor(normalized);
    let screen = if stray_path {
        Screen::NotFound
    } else {
        screen_for(&transition.view, session.is_some(), &index)
    };

    match screen {
        Screen::Home => {
            page.home = Some(home_page(&snapshot, settings.preview_quota));
        }
        Screen::Login => page.kind = PageKind::Login,
        Screen::Dashboard => {
            page.kind = PageKind::Dashboard;
            page.dashboard = Some(dashboard_page(&snapshot, storage));
        }
        Screen::Category(category) => {
            page.kind = PageKind::Category;
            page.category = Some(category_page(&snapshot, category));
        }
        Screen::NotFound => page.kind = PageKind::NotFound,
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{SubCategoryId, SubCategoryRef};
    use crate::navigation::RouteTokens;
    use crate::repository::test::{
        TestRepository, sample_category, sample_item, sample_site, sample_sub_category,
    };
    use crate::storage::memory::MemoryStorage;

    fn repo() -> TestRepository {
        let mut logo = sample_item(3, 1, "Logo", 30);
        logo.sub_category = SubCategoryRef::EntityRef {
            id: SubCategoryId::new(9).unwrap(),
        };
        TestRepository::new(
            vec![
                sample_category(1, "تصميم", "تصميم"),
                sample_category(2, "Video", "video"),
            ],
            vec![
                logo,
                sample_item(2, 2, "Clip", 20),
                sample_item(1, 1, "Poster", 10),
            ],
        )
        .with_sub_categories(vec![sample_sub_category(9, 1, "Logos")])
    }

    fn render(fragment: &str, session: Option<&OwnerSession>) -> PageView {
        let router = Router::new(RouteTokens::default());
        let site = sample_site();
        let settings = PageSettings {
            router: &router,
            site: &site,
            preview_quota: 6,
        };
        show_page(fragment, session, &settings, &repo(), &MemoryStorage::default())
    }

    #[test]
    fn home_lists_categories_and_preview() {
        let page = render("", None);
        assert_eq!(page.kind, PageKind::Home);
        let home = page.home.unwrap();
        assert_eq!(home.categories.len(), 2);
        assert_eq!(home.preview.len(), 3);
        assert_eq!(page.scroll_anchor, None);
    }

    #[test]
    fn anchor_paths_render_home_with_scroll_target() {
        let page = render("contact", None);
        assert_eq!(page.kind, PageKind::Home);
        assert_eq!(page.scroll_anchor.as_deref(), Some("contact"));
    }

    #[test]
    fn encoded_category_path_groups_items() {
        let page = render("category/%D8%AA%D8%B5%D9%85%D9%8A%D9%85", None);
        assert_eq!(page.kind, PageKind::Category);
        assert!(page.scroll_to_top);
        assert_eq!(page.head.title(), Some("تصميم | Owner"));

        let category = page.category.unwrap();
        let labels: Vec<&str> = category.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Logos", "تصميم"]);
        assert!(category.groups[1].is_fallback);
    }

    #[test]
    fn multi_segment_and_file_paths_are_not_found() {
        for path in ["/dashboard/cv", "/favicon.ico", "/contact/extra"] {
            let page = render(path, None);
            assert_eq!(page.kind, PageKind::NotFound, "{path}");
            assert_eq!(page.scroll_anchor, None, "{path}");
        }
        assert_eq!(render("/home", None).kind, PageKind::Home);
    }

    #[test]
    fn unknown_category_is_not_found() {
        let page = render("category/missing", None);
        assert_eq!(page.kind, PageKind::NotFound);
        assert!(page.category.is_none());
    }

    #[test]
    fn dashboard_requires_session() {
        assert_eq!(render("dashboard", None).kind, PageKind::Login);

        let owner = OwnerSession {
            email: "owner@example.com".into(),
        };
        let page = render("dashboard", Some(&owner));
        assert_eq!(page.kind, PageKind::Dashboard);
        assert_eq!(page.dashboard.unwrap().items.len(), 3);
    }
}
