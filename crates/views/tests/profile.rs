mod common;

use std::sync::Arc;

use common::{FailingStore, MemoryStore, list_post, post, user};
use village_richtext::{DefaultRoutes, MemoryDiagnostics, Tag, TextVariant};
use village_views::{ProfileController, ProfileView, ViewContext, ViewError};

#[test]
fn profile_view_lists_post_previews() {
    let view = ProfileView {
        user: user("u1", "Ada"),
        posts: vec![
            post("p1", "u1", "Engines", "analytical"),
            list_post("p2", "u1", &["a", "b", "c", "d"]),
        ],
    };
    let diagnostics = MemoryDiagnostics::new();
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics);
    let rendered = view.render(&ctx);

    let name = rendered
        .find(&|el| el.tag == Tag::typography(TextVariant::H1))
        .expect("name heading");
    assert_eq!(name.children.len(), 1);

    let items = rendered.find_all(&|el| el.has_class("post-list-item"));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get_attr("data-key"), Some("p1"));

    let links = rendered.find_all(&|el| el.tag == Tag::Link);
    let hrefs: Vec<_> = links.iter().filter_map(|el| el.get_attr("href")).collect();
    assert_eq!(hrefs, vec!["/post/u1/p1", "/post/u1/p2"]);

    let previews: Vec<String> = rendered
        .find_all(&|el| el.has_class("secondary"))
        .into_iter()
        .map(|el| village_richtext::View::Element(el.clone()).text_content())
        .collect();
    assert_eq!(previews, vec!["analytical".to_string(), "a\nb\nc".to_string()]);
    assert!(diagnostics.records().is_empty());
}

#[test]
fn posts_without_id_render_unlinked_with_warning() {
    let mut draft = post("x", "u1", "Draft", "body");
    draft.id = None;
    let view = ProfileView {
        user: user("u1", "Ada"),
        posts: vec![draft],
    };
    let diagnostics = MemoryDiagnostics::new();
    let rendered = view.render(&ViewContext::new(&DefaultRoutes, &diagnostics));

    assert!(rendered.find(&|el| el.tag == Tag::Link).is_none());
    assert!(rendered.text_content().contains("Draft"));
    assert_eq!(diagnostics.warnings().len(), 1);
}

#[tokio::test]
async fn load_fills_user_and_posts() -> anyhow::Result<()> {
    let store = MemoryStore::default()
        .with_user(user("u1", "Ada"), vec![post("p1", "u1", "Engines", "x")]);
    let users = MemoryStore::default().with_user(user("u1", "Ada"), Vec::new());
    let controller = ProfileController::new(store, users);

    assert!(controller.snapshot().is_none());
    controller.load("u1").await?;

    let view = controller.snapshot().expect("loaded");
    assert_eq!(view.user.display_name, "Ada");
    assert_eq!(view.posts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_user_is_a_hard_failure() {
    let controller = ProfileController::new(MemoryStore::default(), MemoryStore::default());
    let err = controller.load("ghost").await.unwrap_err();
    assert!(matches!(err, ViewError::MissingUser { ref user_id } if user_id == "ghost"));
    assert!(controller.snapshot().is_none());
}

#[tokio::test]
async fn store_errors_propagate() {
    let users = MemoryStore::default().with_user(user("u1", "Ada"), Vec::new());
    let controller = ProfileController::new(FailingStore, users);
    let err = controller.load("u1").await.unwrap_err();
    assert!(matches!(err, ViewError::Store(_)));
}

#[tokio::test]
async fn stale_results_are_discarded_when_profile_changes() {
    let posts = MemoryStore::default()
        .with_user(user("a", "A"), vec![post("pa", "a", "From A", "a")])
        .with_user(user("b", "B"), vec![post("pb", "b", "From B", "b")])
        .gate_posts_of("a");
    let gate = posts.gate.clone();
    let users = MemoryStore::default()
        .with_user(user("a", "A"), Vec::new())
        .with_user(user("b", "B"), Vec::new());
    let controller = Arc::new(ProfileController::new(posts, users));

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.load("a").await }
    });
    // Let the first load start and park on the gated posts.
    tokio::task::yield_now().await;
    assert_eq!(controller.current_user_id().as_deref(), Some("a"));

    controller.load("b").await.expect("second load");
    gate.notify_one();
    first.await.expect("join").expect("first load");

    let view = controller.snapshot().expect("loaded");
    assert_eq!(view.user.uid, "b");
    let titles: Vec<_> = view.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["From B"]);
}

#[tokio::test]
async fn stale_store_errors_are_discarded() {
    let posts = MemoryStore::default()
        .with_user(user("a", "A"), Vec::new())
        .with_user(user("b", "B"), vec![post("pb", "b", "From B", "b")])
        .gate_posts_of("a")
        .fail_posts_of("a");
    let gate = posts.gate.clone();
    let users = MemoryStore::default()
        .with_user(user("a", "A"), Vec::new())
        .with_user(user("b", "B"), Vec::new());
    let controller = Arc::new(ProfileController::new(posts, users));

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.load("a").await }
    });
    tokio::task::yield_now().await;

    controller.load("b").await.expect("second load");
    gate.notify_one();
    first
        .await
        .expect("join")
        .expect("a stale failure is not reported");

    assert_eq!(controller.current_user_id().as_deref(), Some("b"));
    let view = controller.snapshot().expect("loaded");
    assert_eq!(view.user.uid, "b");
    assert_eq!(view.posts.len(), 1);
}

#[tokio::test]
async fn current_store_errors_still_fail_after_gate() {
    let posts = MemoryStore::default()
        .with_user(user("a", "A"), Vec::new())
        .gate_posts_of("a")
        .fail_posts_of("a");
    let gate = posts.gate.clone();
    let users = MemoryStore::default().with_user(user("a", "A"), Vec::new());
    let controller = Arc::new(ProfileController::new(posts, users));

    let load = tokio::spawn({
        let controller = controller.clone();
        async move { controller.load("a").await }
    });
    tokio::task::yield_now().await;
    gate.notify_one();

    let err = load.await.expect("join").unwrap_err();
    assert!(matches!(err, ViewError::Store(_)));
}
