use chrono::{Duration, Utc};
use pushkind_portfolio::domain::category::{Category, CategoryUpdate, NewCategory};
use pushkind_portfolio::domain::portfolio_item::{NewPortfolioItem, PortfolioItemUpdate};
use pushkind_portfolio::domain::sub_category::NewSubCategory;
use pushkind_portfolio::domain::types::{
    CategoryId, CategoryName, CategorySlug, ItemTitle, MediaType, MediaUrl, SubCategoryName,
    SubCategoryRef,
};
use pushkind_portfolio::grouping::{group_gallery, normalize_items};
use pushkind_portfolio::repository::{
    CategoryReader, CategoryWriter, DieselRepository, PortfolioItemListQuery,
    PortfolioItemReader, PortfolioItemWriter, RepositoryError, SubCategoryListQuery,
    SubCategoryReader, SubCategoryWriter,
};
use pushkind_portfolio::services::main::load_snapshot;

mod common;

fn create_category(repo: &DieselRepository, name: &str) -> Category {
    let name = CategoryName::new(name).expect("valid name");
    let now = Utc::now().naive_utc();
    repo.create_category(&NewCategory {
        slug: CategorySlug::from_name(&name),
        name,
        description: String::new(),
        cover_image: MediaUrl::new("https://example.com/cover.png").expect("valid url"),
        created_at: now,
        updated_at: now,
    })
    .expect("should create category")
}

fn new_item(
    category_id: CategoryId,
    title: &str,
    sub_category: SubCategoryRef,
    minutes_ago: i64,
) -> NewPortfolioItem {
    let at = Utc::now().naive_utc() - Duration::minutes(minutes_ago);
    NewPortfolioItem {
        category_id,
        sub_category,
        title: ItemTitle::new(title).expect("valid title"),
        image_url: MediaUrl::new("https://example.com/work.png").expect("valid url"),
        media_type: MediaType::Image,
        description: None,
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn categories_are_listed_by_name_and_found_by_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    create_category(&repo, "Photography");
    let design = create_category(&repo, "Graphic Design");

    let names: Vec<String> = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Graphic Design", "Photography"]);

    let found = repo
        .get_category_by_slug("graphic-design")
        .expect("should query by slug")
        .expect("category exists");
    assert_eq!(found.id, design.id);
    assert!(repo.get_category_by_slug("missing").unwrap().is_none());
}

#[test]
fn duplicate_slug_is_a_conflict() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    create_category(&repo, "Photography");
    let name = CategoryName::new("photography").unwrap();
    let now = Utc::now().naive_utc();
    let err = repo
        .create_category(&NewCategory {
            slug: CategorySlug::from_name(&name),
            name,
            description: String::new(),
            cover_image: MediaUrl::new("https://example.com/c.png").unwrap(),
            created_at: now,
            updated_at: now,
        })
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[test]
fn update_category_overwrites_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let category = create_category(&repo, "Photo");

    let name = CategoryName::new("Photography").unwrap();
    let affected = repo
        .update_category(
            category.id,
            &CategoryUpdate {
                slug: CategorySlug::from_name(&name),
                name,
                description: "Light and shadow".to_string(),
                cover_image: MediaUrl::new("/media/categories/1.png").unwrap(),
            },
        )
        .expect("should update");
    assert_eq!(affected, 1);

    let stored = repo.get_category_by_id(category.id).unwrap().unwrap();
    assert_eq!(stored.slug, "photography");
    assert_eq!(stored.description, "Light and shadow");
    assert_eq!(stored.cover_image.as_str(), "/media/categories/1.png");
}

#[test]
fn delete_category_removes_children() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let doomed = create_category(&repo, "Photography");
    let kept = create_category(&repo, "Design");

    repo.create_sub_category(&NewSubCategory {
        category_id: doomed.id,
        name: SubCategoryName::new("Portraits").unwrap(),
        created_at: Utc::now().naive_utc(),
    })
    .unwrap();
    repo.create_item(&new_item(doomed.id, "Dune", SubCategoryRef::None, 1))
        .unwrap();
    repo.create_item(&new_item(kept.id, "Logo", SubCategoryRef::None, 1))
        .unwrap();

    assert_eq!(repo.delete_category(doomed.id).unwrap(), 1);

    assert!(repo.get_category_by_id(doomed.id).unwrap().is_none());
    assert!(
        repo.list_sub_categories(SubCategoryListQuery::default().category(doomed.id))
            .unwrap()
            .is_empty()
    );
    let items = repo.list_items(PortfolioItemListQuery::default()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category_id, kept.id);
}

#[test]
fn delete_sub_category_detaches_items() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let category = create_category(&repo, "Design");
    let sub = repo
        .create_sub_category(&NewSubCategory {
            category_id: category.id,
            name: SubCategoryName::new("Branding").unwrap(),
            created_at: Utc::now().naive_utc(),
        })
        .unwrap();
    let item = repo
        .create_item(&new_item(
            category.id,
            "Logo",
            SubCategoryRef::EntityRef { id: sub.id },
            1,
        ))
        .unwrap();

    assert_eq!(repo.delete_sub_category(sub.id).unwrap(), 1);

    let stored = repo.get_item_by_id(item.id).unwrap().unwrap();
    assert_eq!(stored.sub_category, SubCategoryRef::None);
    assert!(repo.get_sub_category_by_id(sub.id).unwrap().is_none());
}

#[test]
fn items_are_listed_newest_first_and_filtered() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let photo = create_category(&repo, "Photography");
    let design = create_category(&repo, "Design");

    repo.create_item(&new_item(photo.id, "Old", SubCategoryRef::None, 30))
        .unwrap();
    repo.create_item(&new_item(photo.id, "New", SubCategoryRef::None, 5))
        .unwrap();
    repo.create_item(&new_item(design.id, "Logo", SubCategoryRef::None, 10))
        .unwrap();

    let titles: Vec<String> = repo
        .list_items(PortfolioItemListQuery::default())
        .unwrap()
        .into_iter()
        .map(|i| i.title.into_inner())
        .collect();
    assert_eq!(titles, vec!["New", "Logo", "Old"]);

    let photo_items = repo
        .list_items(PortfolioItemListQuery::default().category(photo.id).limit(1))
        .unwrap();
    assert_eq!(photo_items.len(), 1);
    assert_eq!(photo_items[0].title.as_str(), "New");
}

#[test]
fn legacy_label_survives_a_round_trip_and_updates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let category = create_category(&repo, "Design");
    let item = repo
        .create_item(&new_item(
            category.id,
            "Poster",
            SubCategoryRef::LegacyLabel {
                label: "Posters".to_string(),
            },
            1,
        ))
        .unwrap();
    assert_eq!(
        item.sub_category,
        SubCategoryRef::LegacyLabel {
            label: "Posters".to_string()
        }
    );

    repo.update_item(
        item.id,
        &PortfolioItemUpdate {
            category_id: category.id,
            sub_category: SubCategoryRef::None,
            title: ItemTitle::new("Festival poster").unwrap(),
            description: Some("Screen print".to_string()),
        },
    )
    .unwrap();

    let stored = repo.get_item_by_id(item.id).unwrap().unwrap();
    assert_eq!(stored.title.as_str(), "Festival poster");
    assert_eq!(stored.sub_category, SubCategoryRef::None);
    assert_eq!(stored.description.as_deref(), Some("Screen print"));
    assert_eq!(stored.image_url, item.image_url);
}

#[test]
fn deleted_item_is_absent_from_the_next_gallery() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let category = create_category(&repo, "Photography");
    let kept = repo
        .create_item(&new_item(category.id, "Dune", SubCategoryRef::None, 2))
        .unwrap();
    let removed = repo
        .create_item(&new_item(category.id, "Sea", SubCategoryRef::None, 1))
        .unwrap();

    assert_eq!(repo.delete_item(removed.id).unwrap(), 1);

    let snapshot = load_snapshot(&repo);
    let all: Vec<_> = snapshot.items.iter().collect();
    let groups = group_gallery(normalize_items(&all, &snapshot.sub_categories), "Other");
    let ids: Vec<_> = groups
        .iter()
        .flat_map(|g| g.items.iter().map(|i| i.item.id))
        .collect();
    assert_eq!(ids, vec![kept.id]);
}
