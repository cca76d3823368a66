use std::sync::Arc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::{Selectable as _, Sizable as _, h_flex, v_flex};
use gpui_village_richtext::RichTextView;
use village_richtext::{
    DefaultRoutes, Flavor, RenderContext, RenderOptions, RichText, TracingDiagnostics, plain_text,
};
use village_views::{
    PostSubtitleRow, ProfileController, ProfileView, UserRecord, ViewContext,
    resolve_profile_user_id,
};

use crate::fixtures::{Fixtures, LoggingDeleter, MemoryStore};

const VIEWER_ID: &str = "ada";
const SUBTITLE_POST: (&str, &str) = ("ada", "engines");

pub struct VillageStory {
    document: RichText,
    store: MemoryStore,
    viewer: Option<UserRecord>,
    flavor: Flavor,
    compact: bool,
    controller: Arc<ProfileController<MemoryStore, MemoryStore>>,
    profile: Option<ProfileView>,
    status: Option<SharedString>,
}

impl VillageStory {
    pub fn view(fixtures: Fixtures, window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(fixtures, window, cx))
    }

    fn new(fixtures: Fixtures, _window: &mut Window, cx: &mut Context<Self>) -> Self {
        let Fixtures { document, store } = fixtures;
        let viewer = store.user(VIEWER_ID).cloned();
        let controller = Arc::new(ProfileController::new(store.clone(), store.clone()));

        let mut this = Self {
            document,
            store,
            viewer,
            flavor: Flavor::Village,
            compact: false,
            controller,
            profile: None,
            status: None,
        };
        this.load_profile(None, cx);
        this
    }

    fn load_profile(&mut self, route_user_id: Option<&str>, cx: &mut Context<Self>) {
        let Some(user_id) = resolve_profile_user_id(route_user_id, self.viewer.as_ref()) else {
            self.status = Some("Sign in to see your profile".into());
            return;
        };

        let controller = self.controller.clone();
        cx.spawn(async move |this, cx| {
            let result = controller.load(&user_id).await;
            this.update(cx, |this, cx| {
                match result {
                    Ok(()) => {
                        this.profile = controller.snapshot();
                        this.status = None;
                    }
                    Err(err) => {
                        tracing::warn!(%err, %user_id, "profile load failed");
                        this.status = Some(err.to_string().into());
                    }
                }
                cx.notify();
            })
        })
        .detach();
    }

    fn subtitle_row(&self) -> Option<PostSubtitleRow> {
        let (author_id, post_id) = SUBTITLE_POST;
        let author = self.store.user(author_id)?.clone();
        let post = self.store.post(author_id, post_id)?;
        Some(PostSubtitleRow {
            author,
            post_title: post.title.clone(),
            post_id: post_id.to_string(),
            updated_at: post.updated_at,
            num_mentions: post.mentions.len(),
            delete_post: Some(Arc::new(LoggingDeleter)),
        })
    }

    fn delete_sample_post(&mut self, cx: &mut Context<Self>) {
        let Some(row) = self.subtitle_row() else {
            return;
        };
        cx.spawn(async move |this, cx| {
            let status: SharedString = match row.delete(&TracingDiagnostics).await {
                Ok(path) => format!("Deleted, navigating to {path}").into(),
                Err(err) => err.to_string().into(),
            };
            this.update(cx, |this, cx| {
                this.status = Some(status);
                cx.notify();
            })
        })
        .detach();
    }

    fn toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let flavor = self.flavor;
        h_flex()
            .gap(px(4.))
            .items_center()
            .child(
                Button::new("flavor-kmgmt")
                    .label("Kmgmt")
                    .ghost()
                    .small()
                    .selected(flavor == Flavor::Kmgmt)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.flavor = Flavor::Kmgmt;
                        cx.notify();
                    })),
            )
            .child(
                Button::new("flavor-village")
                    .label("Village")
                    .ghost()
                    .small()
                    .selected(flavor == Flavor::Village)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.flavor = Flavor::Village;
                        cx.notify();
                    })),
            )
            .child(
                Button::new("toggle-compact")
                    .label("Compact")
                    .ghost()
                    .small()
                    .selected(self.compact)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.compact = !this.compact;
                        cx.notify();
                    })),
            )
            .child(
                Button::new("load-ada")
                    .label("My profile")
                    .ghost()
                    .small()
                    .on_click(cx.listener(|this, _, _window, cx| this.load_profile(None, cx))),
            )
            .child(
                Button::new("load-grace")
                    .label("Grace's profile")
                    .ghost()
                    .small()
                    .on_click(
                        cx.listener(|this, _, _window, cx| this.load_profile(Some("grace"), cx)),
                    ),
            )
            .child(
                Button::new("load-missing")
                    .label("Missing profile")
                    .ghost()
                    .small()
                    .on_click(
                        cx.listener(|this, _, _window, cx| this.load_profile(Some("nobody"), cx)),
                    ),
            )
            .child(
                Button::new("delete-post")
                    .label("Delete post")
                    .ghost()
                    .small()
                    .on_click(cx.listener(|this, _, _window, cx| this.delete_sample_post(cx))),
            )
    }
}

fn section_title(title: &'static str) -> impl IntoElement {
    div()
        .text_size(px(12.))
        .font_weight(FontWeight::SEMIBOLD)
        .child(title)
}

fn log_navigation(href: &str, _window: &mut Window, _cx: &mut App) {
    tracing::info!(href, "navigate");
}

impl Render for VillageStory {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let routes = DefaultRoutes;
        let diagnostics = TracingDiagnostics;

        let render_ctx = RenderContext::new(self.flavor, &routes, &diagnostics).with_options(
            RenderOptions {
                compact: self.compact,
            },
        );
        let document = RichTextView::document("sample-document", &self.document, &render_ctx)
            .on_navigate(log_navigation);

        let view_ctx = ViewContext::new(&routes, &diagnostics).with_viewer(self.viewer.as_ref());
        let subtitle = self
            .subtitle_row()
            .map(|row| row.render(&view_ctx))
            .transpose();
        let subtitle = match subtitle {
            Ok(Some(view)) => RichTextView::new("post-subtitle", view)
                .on_navigate(log_navigation)
                .into_any_element(),
            Ok(None) => div().into_any_element(),
            Err(err) => div().child(err.to_string()).into_any_element(),
        };

        let profile = self.profile.as_ref().map(|profile| {
            RichTextView::new("profile", profile.render(&view_ctx)).on_navigate(log_navigation)
        });

        let theme = cx.theme();
        let muted = theme.muted;
        let background = theme.background;
        let border = theme.border;
        let muted_foreground = theme.muted_foreground;

        v_flex()
            .size_full()
            .bg(muted)
            .child(
                div()
                    .w_full()
                    .bg(background)
                    .border_1()
                    .border_color(border)
                    .p(px(8.))
                    .child(self.toolbar(cx)),
            )
            .child(
                div()
                    .id("village-story-scroll")
                    .flex_1()
                    .overflow_y_scroll()
                    .p(px(16.))
                    .child(
                        v_flex()
                            .gap(px(16.))
                            .child(section_title("Document"))
                            .child(document)
                            .child(
                                div()
                                    .text_size(px(12.))
                                    .text_color(muted_foreground)
                                    .child(plain_text(&self.document)),
                            )
                            .child(section_title("Post subtitle"))
                            .child(subtitle)
                            .child(section_title("Profile"))
                            .when_some(self.status.clone(), |this, status| {
                                this.child(div().text_color(muted_foreground).child(status))
                            })
                            .children(profile),
                    ),
            )
    }
}
