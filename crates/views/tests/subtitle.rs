mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::{RecordingDeleter, user};
use village_richtext::{DefaultRoutes, Icon, MemoryDiagnostics, Tag, View};
use village_views::{PostDeleter, PostSubtitleRow, ViewContext, ViewError};

fn row(delete_post: Option<Arc<dyn PostDeleter>>) -> PostSubtitleRow {
    PostSubtitleRow {
        author: user("u1", "Ada"),
        post_title: "My Stack".to_string(),
        post_id: "p1".to_string(),
        updated_at: Some(Utc.with_ymd_and_hms(2021, 3, 4, 12, 0, 0).unwrap()),
        num_mentions: 0,
        delete_post,
    }
}

fn has_delete_menu(view: &View) -> bool {
    view.find(&|el| el.tag == Tag::Icon(Icon::Delete)).is_some()
}

#[test]
fn author_without_delete_callback_is_rejected() {
    let diagnostics = MemoryDiagnostics::new();
    let author = user("u1", "Ada");
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics).with_viewer(Some(&author));

    let err = row(None).render(&ctx).unwrap_err();
    assert!(matches!(
        err,
        ViewError::MissingRequiredCallback { name: "deletePost" }
    ));
}

#[test]
fn other_viewers_see_no_delete_action() {
    let diagnostics = MemoryDiagnostics::new();
    let reader = user("u2", "Grace");

    for viewer in [None, Some(&reader)] {
        let ctx = ViewContext::new(&DefaultRoutes, &diagnostics).with_viewer(viewer);
        let view = row(None).render(&ctx).expect("render");
        assert!(!has_delete_menu(&view));
    }
}

#[test]
fn author_sees_delete_action() {
    let diagnostics = MemoryDiagnostics::new();
    let author = user("u1", "Ada");
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics).with_viewer(Some(&author));

    let deleter: Arc<dyn PostDeleter> = Arc::new(RecordingDeleter::default());
    let view = row(Some(deleter)).render(&ctx).expect("render");
    assert!(has_delete_menu(&view));
    assert!(view.text_content().contains("Delete"));
}

#[test]
fn renders_author_date_and_links() {
    let diagnostics = MemoryDiagnostics::new();
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics);
    let view = row(None).render(&ctx).expect("render");

    let text = view.text_content();
    assert!(text.starts_with("Ada"));
    assert!(text.contains("Mar 4"));

    let hrefs: Vec<_> = view
        .find_all(&|el| el.tag == Tag::Link)
        .iter()
        .filter_map(|el| el.get_attr("href"))
        .collect();
    assert_eq!(hrefs, vec!["/profile/u1-name", "/stack/My%20Stack", "#mentions"]);

    let mentions_button = view
        .find(&|el| {
            el.tag == Tag::IconButton
                && el
                    .children
                    .iter()
                    .any(|c| c.as_element().is_some_and(|i| i.tag == Tag::Icon(Icon::CallReceived)))
        })
        .expect("mentions button");
    assert_eq!(mentions_button.get_attr("disabled"), Some("true"));
}

#[test]
fn mentions_button_is_enabled_when_post_is_mentioned() {
    let diagnostics = MemoryDiagnostics::new();
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics);
    let mut row = row(None);
    row.num_mentions = 2;
    let view = row.render(&ctx).expect("render");

    let disabled = view.find_all(&|el| el.tag == Tag::IconButton && el.get_attr("disabled").is_some());
    assert!(disabled.is_empty());
}

#[test]
fn missing_date_uses_now() {
    let diagnostics = MemoryDiagnostics::new();
    let now = Utc.with_ymd_and_hms(2022, 12, 25, 0, 0, 0).unwrap();
    let ctx = ViewContext::new(&DefaultRoutes, &diagnostics).at(now);
    let mut row = row(None);
    row.updated_at = None;
    assert!(row.render(&ctx).expect("render").text_content().contains("Dec 25"));
}

#[test]
fn broken_date_format_does_not_abort_render() {
    let diagnostics = MemoryDiagnostics::new();
    let mut ctx = ViewContext::new(&DefaultRoutes, &diagnostics);
    ctx.options.date_format = "%Q".to_string();

    let view = row(None).render(&ctx).expect("render");
    assert!(view.text_content().contains("Mar 4"));
}

#[tokio::test]
async fn delete_calls_back_and_redirects_home() {
    let diagnostics = MemoryDiagnostics::new();
    let deleter = Arc::new(RecordingDeleter::default());
    let row = row(Some(deleter.clone()));

    let target = row.delete(&diagnostics).await.expect("delete");
    assert_eq!(target, "/");
    assert_eq!(
        *deleter.calls.lock().unwrap(),
        vec![("u1".to_string(), "p1".to_string())]
    );
    assert!(
        diagnostics
            .records()
            .iter()
            .any(|record| record.message == "Post p1 deleted!")
    );
}

#[tokio::test]
async fn delete_without_callback_fails() {
    let diagnostics = MemoryDiagnostics::new();
    let err = row(None).delete(&diagnostics).await.unwrap_err();
    assert!(matches!(err, ViewError::MissingRequiredCallback { .. }));
}
