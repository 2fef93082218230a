use rango::domain::auth::AuthenticatedUser;
use rango::domain::category::{DeletePolicy, NewCategory};
use rango::domain::page::NewPage;
use rango::domain::types::{
    CategoryName, LikeCount, PageId, PageTitle, PageUrl, UserId, Username, ViewCount,
};
use rango::forms::pages::AddPageForm;
use rango::repository::{
    CategoryReader, CategoryWriter, DieselRepository, PageReader, PageWriter, RepositoryError,
    TOP_LIST_LIMIT,
};
use rango::seed::populate;
use rango::services::ServiceError;
use rango::services::pages::add_page;

mod common;

fn category_name(name: &str) -> CategoryName {
    CategoryName::new(name).expect("valid category name")
}

fn seeded_category(
    repo: &DieselRepository,
    name: &str,
    views: i32,
    likes: i32,
) -> rango::domain::category::Category {
    let category = NewCategory::new(category_name(name))
        .expect("sluggable name")
        .with_counters(
            ViewCount::new(views).expect("valid views"),
            LikeCount::new(likes).expect("valid likes"),
        );
    repo.create_category(&category)
        .expect("should create category")
}

fn new_page(category: &rango::domain::category::Category, title: &str) -> NewPage {
    NewPage {
        category_id: category.id,
        title: PageTitle::new(title).expect("valid title"),
        url: PageUrl::new("http://www.example.com/").expect("valid url"),
        views: ViewCount::default(),
    }
}

#[test]
fn get_or_create_category_is_idempotent() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .get_or_create_category(&category_name("Other Frameworks"))
        .expect("should create category");
    let second = repo
        .get_or_create_category(&category_name("Other Frameworks"))
        .expect("should find category");

    assert_eq!(first.id, second.id);
    assert_eq!(first.slug, "other-frameworks");
    assert_eq!(second.slug, first.slug);
    assert_eq!(first.views, 0);
    assert_eq!(first.likes, 0);
    assert_eq!(repo.list_categories().expect("should list").len(), 1);
}

#[test]
fn get_or_create_page_refreshes_views() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let python = repo
        .get_or_create_category(&category_name("Python"))
        .expect("should create category");
    let title = PageTitle::new("Official Python Tutorial").expect("valid title");
    let url = PageUrl::new("http://docs.python.org/3/tutorial/").expect("valid url");

    let first = repo
        .get_or_create_page(python.id, &title, &url, ViewCount::new(75).expect("views"))
        .expect("should create page");
    let second = repo
        .get_or_create_page(python.id, &title, &url, ViewCount::new(100).expect("views"))
        .expect("should update page");

    assert_eq!(first.id, second.id);
    assert_eq!(second.views, 100);

    let stored = repo
        .get_page_by_id(first.id)
        .expect("should query page")
        .expect("page should exist");
    assert_eq!(stored.views, 100);
    assert_eq!(
        repo.list_pages_for_category(python.id)
            .expect("should list pages")
            .len(),
        1
    );
}

#[test]
fn top_categories_are_ordered_by_likes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    seeded_category(&repo, "Django", 64, 32);
    seeded_category(&repo, "Python", 128, 64);

    let top = repo
        .list_top_categories(TOP_LIST_LIMIT)
        .expect("should list top categories");
    let names: Vec<_> = top.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Python", "Django"]);
}

#[test]
fn top_lists_are_capped() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..7 {
        let category = seeded_category(&repo, &format!("Category {i}"), 0, i);
        let mut page = new_page(&category, &format!("Page {i}"));
        page.views = ViewCount::new(i * 3).expect("views");
        repo.create_page(&page).expect("should create page");
    }

    let top = repo
        .list_top_categories(TOP_LIST_LIMIT)
        .expect("should list top categories");
    assert_eq!(top.len(), 5);
    assert!(top.windows(2).all(|w| w[0].likes.get() >= w[1].likes.get()));
    assert_eq!(top[0].likes, 6);

    let pages = repo
        .list_top_pages(TOP_LIST_LIMIT)
        .expect("should list top pages");
    assert_eq!(pages.len(), 5);
    assert_eq!(pages[0].views, 18);
}

#[test]
fn top_list_ties_keep_insertion_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    seeded_category(&repo, "Alpha", 0, 10);
    seeded_category(&repo, "Beta", 0, 10);

    let top = repo
        .list_top_categories(TOP_LIST_LIMIT)
        .expect("should list top categories");
    let names: Vec<_> = top.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
}

#[test]
fn duplicate_category_is_a_conflict() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    seeded_category(&repo, "Python", 0, 0);
    let duplicate = NewCategory::new(category_name("Python")).expect("sluggable name");

    let err = repo.create_category(&duplicate).unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[test]
fn counters_increment() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = seeded_category(&repo, "Django", 64, 32);
    let page = repo
        .create_page(&new_page(&category, "Django Rocks"))
        .expect("should create page");

    assert_eq!(repo.like_category(category.id).expect("like"), 33);
    assert_eq!(repo.increment_category_views(category.id).expect("view"), 65);
    assert_eq!(repo.increment_page_views(page.id).expect("view"), 1);

    let missing = PageId::new(999).expect("valid id");
    assert!(matches!(
        repo.increment_page_views(missing),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn update_category_stores_new_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = seeded_category(&repo, "Django", 0, 0);
    let name = category_name("Django Framework");
    let slug = rango::domain::types::CategorySlug::from_name(&name).expect("slug");

    let updated = repo
        .update_category(category.id, &name, &slug)
        .expect("should update category");
    assert_eq!(updated.slug, "django-framework");
    assert!(
        repo.get_category_by_slug(&slug)
            .expect("should query")
            .is_some()
    );
}

#[test]
fn delete_category_honours_policy() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let python = seeded_category(&repo, "Python", 0, 0);
    let page = repo
        .create_page(&new_page(&python, "Official Python Tutorial"))
        .expect("should create page");

    let err = repo
        .delete_category(python.id, DeletePolicy::Block)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert!(repo.get_page_by_id(page.id).expect("query").is_some());

    repo.delete_category(python.id, DeletePolicy::Cascade)
        .expect("should delete category and pages");
    assert!(repo.get_page_by_id(page.id).expect("query").is_none());
    assert!(matches!(
        repo.delete_category(python.id, DeletePolicy::Cascade),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn add_page_to_missing_category_creates_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let user = AuthenticatedUser {
        id: UserId::new(1).expect("valid id"),
        username: Username::new("laura").expect("valid username"),
        is_active: true,
    };
    let form = AddPageForm {
        title: "Orphan".to_string(),
        url: "http://www.example.com/".to_string(),
    };

    let result = add_page("nonexistent-slug", form, &user, &repo);
    assert_eq!(result, Err(ServiceError::NotFound));
    assert!(
        repo.list_top_pages(TOP_LIST_LIMIT)
            .expect("should list pages")
            .is_empty()
    );
}

#[test]
fn populate_is_repeatable() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = populate(&repo).expect("should seed");
    let second = populate(&repo).expect("should reseed");

    assert_eq!(first.len(), 8);
    assert_eq!(second.len(), 8);
    assert_eq!(repo.list_categories().expect("should list").len(), 3);

    let python = repo
        .get_category_by_name(&category_name("Python"))
        .expect("should query")
        .expect("python should exist");
    assert_eq!(
        repo.list_pages_for_category(python.id)
            .expect("should list pages")
            .len(),
        3
    );
}

#[test]
fn usernames_are_unique() {
    use rango::domain::types::EmailAddress;
    use rango::domain::user::NewUser;
    use rango::repository::{UserReader, UserWriter};

    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let new_user = NewUser {
        username: Username::new("leifos").expect("valid username"),
        email: EmailAddress::new("leifos@example.com").expect("valid email"),
        password_hash: "$argon2id$placeholder".to_string(),
        website: None,
        created_at: chrono::Utc::now().naive_utc(),
    };

    let created = repo.create_user(&new_user).expect("should create user");
    assert!(created.is_active);
    assert!(matches!(
        repo.create_user(&new_user),
        Err(RepositoryError::Conflict(_))
    ));

    let found = repo
        .get_user_by_id(created.id)
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(found.username, "leifos");
}

#[test]
fn category_without_pages_lists_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let python = seeded_category(&repo, "Python", 0, 0);
    let pages = repo
        .list_pages_for_category(python.id)
        .expect("an empty category is not an error");
    assert!(pages.is_empty());

    let detail = rango::services::categories::show_category("python", &repo)
        .expect("should render category");
    assert_eq!(detail.category.expect("category should exist").views, 1);
    assert!(detail.pages.is_empty());
}

#[test]
fn concurrent_get_or_create_category_returns_one_row() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let barrier = std::sync::Arc::new(std::sync::Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let repo = repo.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                barrier.wait();
                repo.get_or_create_category(&category_name("Rust"))
                    .expect("should get or create category")
                    .id
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread should finish"))
        .collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(repo.list_categories().expect("should list").len(), 1);
}

#[test]
fn get_or_create_category_reports_slug_clash() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    seeded_category(&repo, "Python", 0, 0);

    let err = repo
        .get_or_create_category(&category_name("python"))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert_eq!(repo.list_categories().expect("should list").len(), 1);
}
