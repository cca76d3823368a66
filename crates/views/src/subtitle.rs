use std::sync::Arc;

use chrono::{DateTime, Utc};
use village_richtext::{Diagnostics, Icon, Tag, View, ViewElement};

use crate::context::ViewContext;
use crate::error::ViewError;
use crate::records::{PostId, UserRecord};
use crate::store::PostDeleter;

const DELETE_POST: &str = "deletePost";

/// Where the app navigates after a post is deleted.
pub const AFTER_DELETE_PATH: &str = "/";

/// Author, date and action links shown under a post title.
#[derive(Clone)]
pub struct PostSubtitleRow {
    pub author: UserRecord,
    pub post_title: String,
    pub post_id: PostId,
    pub updated_at: Option<DateTime<Utc>>,
    pub num_mentions: usize,
    /// Required when the viewer is the author.
    pub delete_post: Option<Arc<dyn PostDeleter>>,
}

impl PostSubtitleRow {
    pub fn render(&self, ctx: &ViewContext<'_>) -> Result<View, ViewError> {
        let is_author = ctx.viewer_is(&self.author);
        if is_author && self.delete_post.is_none() {
            return Err(ViewError::MissingRequiredCallback { name: DELETE_POST });
        }

        let date = ctx.options.format_date(self.updated_at.unwrap_or(ctx.now));

        let author_link = ViewElement::new(Tag::Link)
            .class("link")
            .attr("href", ctx.routes.profile_url(&self.author.username))
            .child(ViewElement::new(Tag::Emphasis).child(self.author.display_name.as_str()));

        let stack = tooltip(
            "View stack",
            ViewElement::new(Tag::Link)
                .class("link")
                .attr("href", ctx.routes.stack_url(&self.post_title))
                .child(icon_button(Icon::LibraryBooks, false)),
        );

        let mentions = tooltip(
            "View mentions",
            ViewElement::new(Tag::Link)
                .class("link")
                .attr("href", "#mentions")
                .attr("data-smooth", "true")
                .child(icon_button(Icon::CallReceived, self.num_mentions == 0)),
        );

        let mut actions = ViewElement::new(Tag::Span)
            .class("subtitle-part")
            .child(stack)
            .child(mentions);
        if is_author {
            actions = actions.child(self.render_author_menu());
        }

        Ok(ViewElement::new(Tag::Div)
            .class("post-subtitle")
            .child(
                ViewElement::new(Tag::Div)
                    .child(author_link)
                    .child(ViewElement::new(Tag::Span).class("subtitle-part").child(date))
                    .child(actions),
            )
            .into_view())
    }

    fn render_author_menu(&self) -> View {
        let more = tooltip(
            "Delete, settings, and more...",
            icon_button(Icon::MoreHoriz, false).attr("aria-haspopup", "menu"),
        );
        let menu = ViewElement::new(Tag::Menu).attr("role", "menu").child(
            ViewElement::new(Tag::MenuItem)
                .attr("data-action", "delete")
                .child(ViewElement::new(Tag::Icon(Icon::Delete)).class("subtitle-more-menu-item"))
                .child(
                    ViewElement::new(Tag::Span)
                        .class("subtitle-more-menu-item-text")
                        .child("Delete"),
                ),
        );
        View::Fragment(vec![more.into_view(), menu.into_view()])
    }

    /// Deletes the post through the configured callback and returns the path
    /// to navigate to.
    pub async fn delete(&self, diagnostics: &dyn Diagnostics) -> Result<String, ViewError> {
        let delete_post = self
            .delete_post
            .as_ref()
            .ok_or(ViewError::MissingRequiredCallback { name: DELETE_POST })?;

        delete_post
            .delete_post(&self.author.uid, &self.post_id)
            .await?;
        diagnostics.debug("PostSubtitleRow", &format!("Post {} deleted!", self.post_id));
        Ok(AFTER_DELETE_PATH.to_string())
    }
}

fn tooltip(title: &str, child: ViewElement) -> ViewElement {
    ViewElement::new(Tag::Tooltip).attr("title", title).child(child)
}

fn icon_button(icon: Icon, disabled: bool) -> ViewElement {
    let mut button = ViewElement::new(Tag::IconButton).attr("data-size", "small");
    if disabled {
        button = button.attr("disabled", "true");
    }
    button.child(ViewElement::new(Tag::Icon(icon)))
}
