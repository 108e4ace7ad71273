//! Mounted application root.
//!
//! The shell owns the navigator, the category snapshot and the document
//! head. It subscribes to fragment changes and auth changes once on mount and
//! releases both subscriptions when dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::auth::{AuthChange, OwnerSession};
use crate::domain::category::Category;
use crate::grouping::CategoryIndex;
use crate::navigation::events::{AuthEvents, FragmentEvents, Subscription};
use crate::navigation::meta::{DocumentHead, PageMeta, SiteMeta, page_meta};
use crate::navigation::session::SessionContext;
use crate::navigation::{Effect, Navigator, Router, Screen, Transition, View, screen_for};

struct ShellState {
    navigator: Navigator,
    site: SiteMeta,
    categories: Vec<Category>,
    pending_effects: Vec<Effect>,
    meta: PageMeta,
    head: DocumentHead,
}

impl ShellState {
    fn enter(&mut self, transition: Transition) {
        self.pending_effects.extend(transition.effects);
        self.refresh_meta();
    }

    fn refresh_meta(&mut self) {
        let index = CategoryIndex::new(&self.categories);
        self.meta = page_meta(self.navigator.view(), &index, &self.site);
        self.head.apply(&self.meta);
    }
}

fn lock(state: &Mutex<ShellState>) -> MutexGuard<'_, ShellState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Shell {
    state: Arc<Mutex<ShellState>>,
    session: SessionContext,
    _fragment_subscription: Subscription,
    _auth_subscription: Subscription,
}

impl Shell {
    /// Evaluates `initial_fragment` eagerly and starts listening.
    pub fn mount(
        router: Router,
        site: SiteMeta,
        initial_fragment: &str,
        initial_session: Option<OwnerSession>,
        fragments: &FragmentEvents,
        auth_changes: &AuthEvents,
    ) -> Self {
        let (writer, session) = SessionContext::new();
        if let Some(owner) = initial_session {
            writer.apply(&AuthChange::SignedIn(owner));
        }

        let mut navigator = Navigator::new(router);
        let initial = navigator.start(initial_fragment);
        let mut state = ShellState {
            navigator,
            site,
            categories: Vec::new(),
            pending_effects: Vec::new(),
            meta: PageMeta {
                title: String::new(),
                description: String::new(),
                keywords: String::new(),
            },
            head: DocumentHead::new(),
        };
        state.enter(initial);
        let state = Arc::new(Mutex::new(state));

        let fragment_state = Arc::clone(&state);
        let fragment_subscription = fragments.subscribe(move |fragment: &String| {
            let mut state = lock(&fragment_state);
            if let Some(transition) = state.navigator.on_fragment_change(fragment) {
                log::debug!("Navigated to {:?}", transition.view);
                state.enter(transition);
            }
        });
        let auth_subscription = auth_changes.subscribe(move |change: &AuthChange| {
            writer.apply(change);
        });

        Self {
            state,
            session,
            _fragment_subscription: fragment_subscription,
            _auth_subscription: auth_subscription,
        }
    }

    /// Replaces the category snapshot after a full re-fetch.
    pub fn set_categories(&self, categories: Vec<Category>) {
        let mut state = lock(&self.state);
        state.categories = categories;
        state.refresh_meta();
    }

    pub fn view(&self) -> View {
        lock(&self.state).navigator.view().clone()
    }

    /// Runs `render` with the screen the current view resolves to.
    pub fn with_screen<R>(&self, render: impl FnOnce(Screen<'_>) -> R) -> R {
        let state = lock(&self.state);
        let index = CategoryIndex::new(&state.categories);
        render(screen_for(
            state.navigator.view(),
            self.session.is_signed_in(),
            &index,
        ))
    }

    /// Drains the effects produced since the last call.
    pub fn take_effects(&self) -> Vec<Effect> {
        std::mem::take(&mut lock(&self.state).pending_effects)
    }

    pub fn meta(&self) -> PageMeta {
        lock(&self.state).meta.clone()
    }

    pub fn head(&self) -> DocumentHead {
        lock(&self.state).head.clone()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RouteTokens;
    use crate::repository::test::{sample_category, sample_site};

    fn mount(
        fragment: &str,
        fragments: &FragmentEvents,
        auth: &AuthEvents,
    ) -> Shell {
        Shell::mount(
            Router::new(RouteTokens::default()),
            sample_site(),
            fragment,
            None,
            fragments,
            auth,
        )
    }

    #[test]
    fn mount_evaluates_initial_fragment() {
        let fragments = FragmentEvents::new();
        let auth = AuthEvents::new();
        let shell = mount("#admin", &fragments, &auth);

        assert_eq!(shell.view(), View::Login);
        assert_eq!(shell.head().title(), Some("Dashboard | Owner"));
    }

    #[test]
    fn fragment_changes_drive_transitions_once() {
        let fragments = FragmentEvents::new();
        let auth = AuthEvents::new();
        let shell = mount("", &fragments, &auth);
        shell.set_categories(vec![sample_category(1, "Photo", "photo")]);

        fragments.emit(&"#category/photo".to_string());
        fragments.emit(&"#category/photo".to_string());

        assert_eq!(shell.take_effects(), vec![Effect::ScrollToTop]);
        assert_eq!(shell.head().title(), Some("Photo | Owner"));
        shell.with_screen(|screen| match screen {
            Screen::Category(category) => assert_eq!(category.slug.as_str(), "photo"),
            other => panic!("unexpected screen {other:?}"),
        });
    }

    #[test]
    fn category_meta_follows_late_snapshot() {
        let fragments = FragmentEvents::new();
        let auth = AuthEvents::new();
        let shell = mount("#category/photo", &fragments, &auth);
        assert_eq!(shell.meta().title, "Owner | Portfolio");

        shell.set_categories(vec![sample_category(1, "Photo", "photo")]);

        assert_eq!(shell.meta().title, "Photo | Owner");
        assert_eq!(shell.head().elements().len(), 5);
    }

    #[test]
    fn auth_changes_unlock_dashboard() {
        let fragments = FragmentEvents::new();
        let auth = AuthEvents::new();
        let shell = mount("#dashboard", &fragments, &auth);
        shell.with_screen(|screen| assert_eq!(screen, Screen::Login));

        auth.emit(&AuthChange::SignedIn(OwnerSession {
            email: "owner@example.com".into(),
        }));
        shell.with_screen(|screen| assert_eq!(screen, Screen::Dashboard));

        auth.emit(&AuthChange::SignedOut);
        assert!(!shell.session().is_signed_in());
    }

    #[test]
    fn drop_releases_listeners() {
        let fragments = FragmentEvents::new();
        let auth = AuthEvents::new();
        let shell = mount("", &fragments, &auth);
        assert_eq!(fragments.listener_count(), 1);
        assert_eq!(auth.listener_count(), 1);

        drop(shell);

        assert_eq!(fragments.listener_count(), 0);
        assert_eq!(auth.listener_count(), 0);

        let _remounted = mount("", &fragments, &auth);
        assert_eq!(fragments.listener_count(), 1);
    }
}
