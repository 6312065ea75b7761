use blog_api::{
    app::{build_router, build_state},
    config::Config,
};
use blog_client::{
    ClientError, HttpPostsApi, PostsApi,
    admin::AdminDashboard,
    browse::{CategoryFilter, PostBrowser},
    form::{PostForm, submit_new_post, submit_post_update},
    normalize_post, normalize_posts,
};
use tokio::net::TcpListener;
use url::Url;

async fn spawn_server() -> HttpPostsApi {
    let config = Config::default();
    let state = build_state(&config).await.unwrap();
    let app = build_router(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpPostsApi::new(Url::parse(&format!("http://{addr}")).unwrap()).unwrap()
}

fn form(title: &str, categories: &str) -> PostForm {
    PostForm {
        title_en: title.into(),
        excerpt: "short".into(),
        content: "<p>Hello</p>".into(),
        categories: categories.into(),
        image_url: "https://img.test/cover.png".into(),
        publish_date: "2024-03-05".into(),
        ..PostForm::default()
    }
}

#[tokio::test]
async fn create_browse_edit_delete() {
    let api = spawn_server().await;

    let created = submit_new_post(&api, form("First post", "Rust, Web"))
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_owned();
    submit_new_post(&api, form("Second post", "Life")).await.unwrap();

    let posts = normalize_posts(&api.list_posts().await.unwrap());
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, id);
    assert_eq!(posts[0].title, "First post");
    assert_eq!(posts[0].categories, vec!["Rust", "Web"]);
    assert_eq!(posts[0].published, "Mar 5, 2024");

    let mut browser = PostBrowser::new(posts);
    browser.set_category(CategoryFilter::parse("Life"));
    let titles: Vec<&str> = browser.page().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Second post"]);

    let fetched = api.get_post(&id).await.unwrap();
    let mut edit = PostForm::from_document(&fetched);
    assert_eq!(edit.categories, "Rust, Web");
    edit.title_en = "First post, revised".into();
    submit_post_update(&api, &id, edit).await.unwrap();

    let shown = normalize_post(&api.get_post(&id).await.unwrap()).unwrap();
    assert_eq!(shown.title, "First post, revised");
    assert_eq!(shown.categories, vec!["Rust", "Web"]);

    let mut dashboard = AdminDashboard::load(&api).await.unwrap();
    dashboard.delete_post(&api, &id).await.unwrap();
    assert_eq!(dashboard.posts().len(), 1);

    let err = api.get_post(&id).await.unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
}

#[tokio::test]
async fn unknown_ids_surface_as_not_found() {
    let api = spawn_server().await;

    let err = api.delete_post("nope").await.unwrap_err();
    assert!(err.is_not_found());

    let mut dashboard = AdminDashboard::load(&api).await.unwrap();
    assert!(dashboard.delete_post(&api, "nope").await.is_err());
    assert!(dashboard.posts().is_empty());
    assert!(dashboard.error().is_some());
}

#[tokio::test]
async fn invalid_forms_are_stopped_before_the_server() {
    let api = spawn_server().await;

    let blank = PostForm {
        content: String::new(),
        ..form("Title", "")
    };
    let err = submit_new_post(&api, blank).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    assert!(api.list_posts().await.unwrap().is_empty());
}
