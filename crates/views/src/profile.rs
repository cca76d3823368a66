use std::sync::{Mutex, MutexGuard};

use village_richtext::{Tag, TextVariant, View, ViewElement, preview_with};

use crate::context::ViewContext;
use crate::error::{StoreError, ViewError};
use crate::records::{PostRecord, UserRecord, UserId};
use crate::store::{PostStore, UserStore};

/// A user's profile page: name, description and a summary of each post.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: UserRecord,
    pub posts: Vec<PostRecord>,
}

impl ProfileView {
    pub fn render(&self, ctx: &ViewContext<'_>) -> View {
        let items = self.posts.iter().map(|post| self.render_post(post, ctx));

        View::Fragment(vec![
            ViewElement::new(Tag::typography(TextVariant::H1))
                .child(self.user.display_name.as_str())
                .into_view(),
            ViewElement::new(Tag::typography(TextVariant::H5))
                .child(self.user.description.as_str())
                .into_view(),
            ViewElement::new(Tag::Divider)
                .class("profile-divider")
                .into_view(),
            ViewElement::new(Tag::UnorderedList)
                .class("post-list")
                .children(items)
                .into_view(),
        ])
    }

    fn render_post(&self, post: &PostRecord, ctx: &ViewContext<'_>) -> View {
        let title = ViewElement::new(Tag::typography(TextVariant::H6)).child(post.title.as_str());

        let primary = match post.id.as_deref() {
            Some(post_id) => ViewElement::new(Tag::Link)
                .class("link")
                .attr("href", ctx.routes.post_url(&post.author_id, post_id))
                .child(title)
                .into_view(),
            None => {
                ctx.diagnostics.warn(
                    "ProfileView",
                    &format!("post {:?} by {} has no id", post.title, post.author_id),
                );
                title.into_view()
            }
        };

        let summary = preview_with(&post.body, &ctx.options.preview).unwrap_or_default();
        let secondary = ViewElement::new(Tag::typography(TextVariant::Body1)).child(summary);

        let mut item = ViewElement::new(Tag::ListItem).class("post-list-item");
        if let Some(post_id) = post.id.as_deref() {
            item = item.attr("data-key", post_id);
        }
        item.child(ViewElement::new(Tag::Div).class("primary").child(primary))
            .child(ViewElement::new(Tag::Div).class("secondary").child(secondary))
            .into_view()
    }
}

/// Identifies one round of profile loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Loaded profile data. Each load round gets a new generation; results that
/// arrive for an older generation are dropped.
#[derive(Debug, Default)]
pub struct ProfileState {
    generation: u64,
    user_id: Option<UserId>,
    posts: Vec<PostRecord>,
    user: Option<UserRecord>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `user_id`, invalidating every outstanding ticket.
    pub fn begin(&mut self, user_id: &str) -> LoadTicket {
        self.generation += 1;
        self.user_id = Some(user_id.to_string());
        self.posts.clear();
        self.user = None;
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns whether the posts were applied.
    pub fn apply_posts(&mut self, ticket: LoadTicket, posts: Vec<PostRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.posts = posts;
        true
    }

    /// Returns whether the user was applied. A current load that found no
    /// user is an error; a stale one is simply dropped.
    pub fn apply_user(
        &mut self,
        ticket: LoadTicket,
        user: Option<UserRecord>,
    ) -> Result<bool, ViewError> {
        if !self.is_current(ticket) {
            return Ok(false);
        }
        match user {
            Some(user) => {
                self.user = Some(user);
                Ok(true)
            }
            None => Err(ViewError::missing_user(
                self.user_id.clone().unwrap_or_default(),
            )),
        }
    }

    /// The view to show, once the user has loaded.
    pub fn view(&self) -> Option<ProfileView> {
        let user = self.user.clone()?;
        Some(ProfileView {
            user,
            posts: self.posts.clone(),
        })
    }
}

/// The route parameter wins; without one, the signed-in viewer's own profile.
pub fn resolve_profile_user_id(
    route_user_id: Option<&str>,
    viewer: Option<&UserRecord>,
) -> Option<UserId> {
    route_user_id
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| viewer.map(|viewer| viewer.uid.clone()))
}

/// Runs the two independent profile loads against the data layer.
pub struct ProfileController<P, U> {
    posts: P,
    users: U,
    state: Mutex<ProfileState>,
}

impl<P: PostStore, U: UserStore> ProfileController<P, U> {
    pub fn new(posts: P, users: U) -> Self {
        Self {
            posts,
            users,
            state: Mutex::new(ProfileState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProfileState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads posts and user concurrently. Results are only applied while no
    /// newer load has started.
    pub async fn load(&self, user_id: &str) -> Result<(), ViewError> {
        let ticket = self.state().begin(user_id);

        let (posts, user) = tokio::join!(
            self.load_posts(ticket, user_id),
            self.load_user(ticket, user_id)
        );
        posts?;
        user
    }

    async fn load_posts(&self, ticket: LoadTicket, user_id: &str) -> Result<(), ViewError> {
        let posts = match self.posts.get_user_posts(user_id).await {
            Ok(posts) => posts,
            Err(err) => return self.discard_if_stale(ticket, user_id, err),
        };
        if !self.state().apply_posts(ticket, posts) {
            tracing::debug!(user_id, "dropping stale posts");
        }
        Ok(())
    }

    async fn load_user(&self, ticket: LoadTicket, user_id: &str) -> Result<(), ViewError> {
        let user = match self.users.get_user(user_id).await {
            Ok(user) => user,
            Err(err) => return self.discard_if_stale(ticket, user_id, err),
        };
        if !self.state().apply_user(ticket, user)? {
            tracing::debug!(user_id, "dropping stale user");
        }
        Ok(())
    }

    /// Store failures only matter to the load that is still current.
    fn discard_if_stale(
        &self,
        ticket: LoadTicket,
        user_id: &str,
        err: StoreError,
    ) -> Result<(), ViewError> {
        if self.state().is_current(ticket) {
            return Err(err.into());
        }
        tracing::debug!(user_id, %err, "dropping stale store error");
        Ok(())
    }

    pub fn snapshot(&self) -> Option<ProfileView> {
        self.state().view()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.state().user_id().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(uid: &str) -> UserRecord {
        UserRecord {
            uid: uid.to_string(),
            username: uid.to_string(),
            display_name: uid.to_uppercase(),
            description: String::new(),
        }
    }

    #[test]
    fn stale_tickets_are_dropped() {
        let mut state = ProfileState::new();
        let first = state.begin("a");
        let second = state.begin("b");

        assert!(!state.apply_posts(first, Vec::new()));
        assert!(!state.apply_user(first, None).expect("stale user is ignored"));
        assert!(state.apply_user(second, Some(user("b"))).expect("current user"));
        assert_eq!(state.view().map(|view| view.user.uid), Some("b".to_string()));
    }

    #[test]
    fn current_missing_user_is_an_error() {
        let mut state = ProfileState::new();
        let ticket = state.begin("ghost");
        let err = state.apply_user(ticket, None).unwrap_err();
        assert!(matches!(err, ViewError::MissingUser { ref user_id } if user_id == "ghost"));
    }

    #[test]
    fn profile_id_prefers_route_parameter() {
        let viewer = user("me");
        assert_eq!(
            resolve_profile_user_id(Some("them"), Some(&viewer)),
            Some("them".to_string())
        );
        assert_eq!(
            resolve_profile_user_id(None, Some(&viewer)),
            Some("me".to_string())
        );
        assert_eq!(resolve_profile_user_id(Some(""), None), None);
    }
}
