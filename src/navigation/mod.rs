//! Address-fragment routing.
//!
//! A fragment such as `category/%D8%AA%D8%B5%D9%85%D9%8A%D9%85` or `contact`
//! maps to exactly one [`View`]. Side effects that accompany a transition are
//! returned as [`Effect`] values and carried out by whoever renders the view.
//! The server feeds request paths through the same [`Router`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::grouping::CategoryIndex;

pub mod events;
pub mod meta;
pub mod session;
pub mod shell;

/// Fragment of the landing view.
pub const HOME_TOKEN: &str = "home";
/// Prefix of category detail fragments.
pub const CATEGORY_PREFIX: &str = "category/";
/// Delay before scrolling to an anchor so the home view can mount first.
pub const ANCHOR_SCROLL_DELAY: Duration = Duration::from_millis(100);
/// Height of the sticky header cleared when scrolling to an anchor.
pub const ANCHOR_SCROLL_OFFSET_PX: u32 = 80;

/// Reserved fragments of the owner area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTokens {
    pub login: String,
    pub dashboard: String,
}

impl Default for RouteTokens {
    fn default() -> Self {
        Self {
            login: "admin".to_string(),
            dashboard: "dashboard".to_string(),
        }
    }
}

/// Closed set of application views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum View {
    Home,
    Login,
    Dashboard,
    /// `slug` is percent-decoded, `raw` is the remainder as it appeared in
    /// the fragment.
    CategoryDetail { slug: String, raw: String },
}

/// One-shot side effect of entering a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reset the viewport immediately.
    ScrollToTop,
    /// Smoothly scroll to the element with id `anchor` after `delay`, stopping
    /// `offset_px` above it.
    ScrollToAnchor {
        anchor: String,
        delay: Duration,
        offset_px: u32,
    },
}

impl Effect {
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::ScrollToAnchor { anchor, .. } => Some(anchor),
            Self::ScrollToTop => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub view: View,
    pub effects: Vec<Effect>,
}

/// Stateless fragment interpreter.
#[derive(Debug, Clone, Default)]
pub struct Router {
    tokens: RouteTokens,
}

impl Router {
    pub fn new(tokens: RouteTokens) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &RouteTokens {
        &self.tokens
    }

    /// Strips the leading `#` or `/` so fragments and request paths compare
    /// equal.
    pub fn normalize(fragment: &str) -> &str {
        fragment
            .strip_prefix('#')
            .or_else(|| fragment.strip_prefix('/'))
            .unwrap_or(fragment)
    }

    /// Whether a home fragment names an element id on the landing view.
    /// Multi-segment and dotted values (`dashboard/cv`, `favicon.ico`) are
    /// not anchors.
    pub fn is_anchor(fragment: &str) -> bool {
        let fragment = Self::normalize(fragment);
        !fragment.is_empty() && fragment != HOME_TOKEN && !fragment.contains(['/', '.'])
    }

        pub fn resolve(&self, fragment: &str) -> View {
        let fragment = Self::normalize(fragment);
        if fragment == self.tokens.login {
            View::Login
        } else if fragment == self.tokens.dashboard {
            View::Dashboard
        } else if let Some(raw) = fragment.strip_prefix(CATEGORY_PREFIX) {
            let slug = urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            View::CategoryDetail {
                slug,
                raw: raw.to_string(),
            }
        } else {
            View::Home
        }
    }

    /// Resolves the fragment together with the effects of entering it.
    pub fn transition(&self, fragment: &str) -> Transition {
        let view = self.resolve(fragment);
        let effects = match &view {
            View::CategoryDetail { .. } => vec![Effect::ScrollToTop],
            View::Home => {
                let anchor = Self::normalize(fragment);
                if !Self::is_anchor(anchor) {
                    vec![]
                } else {
                    vec![Effect::ScrollToAnchor {
                        anchor: anchor.to_string(),
                        delay: ANCHOR_SCROLL_DELAY,
                        offset_px: ANCHOR_SCROLL_OFFSET_PX,
                    }]
                }
            }
            View::Login | View::Dashboard => vec![],
        };
        Transition { view, effects }
    }
}

/// Tracks the current fragment and emits a transition per real change.
#[derive(Debug, Clone)]
pub struct Navigator {
    router: Router,
    fragment: Option<String>,
    view: View,
}

impl Navigator {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            fragment: None,
            view: View::Home,
        }
    }

    /// Evaluates the fragment present at load time.
    pub fn start(&mut self, fragment: &str) -> Transition {
        self.apply(fragment)
    }

    /// Returns `None` when the fragment did not change.
    pub fn on_fragment_change(&mut self, fragment: &str) -> Option<Transition> {
        if self.fragment.as_deref() == Some(Router::normalize(fragment)) {
            return None;
        }
        Some(self.apply(fragment))
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    fn apply(&mut self, fragment: &str) -> Transition {
        let transition = self.router.transition(fragment);
        self.fragment = Some(Router::normalize(fragment).to_string());
        self.view = transition.view.clone();
        transition
    }
}

/// What actually gets rendered for a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Home,
    Login,
    Dashboard,
    Category(&'a Category),
    NotFound,
}

/// Applies the render-time checks: the dashboard needs a session and a
/// category slug has to resolve.
pub fn screen_for<'a>(view: &View, signed_in: bool, categories: &CategoryIndex<'a>) -> Screen<'a> {
    match view {
        View::Home => Screen::Home,
        View::Login => Screen::Login,
        View::Dashboard if signed_in => Screen::Dashboard,
        View::Dashboard => Screen::Login,
        View::CategoryDetail { slug, raw } => categories
            .lookup(slug, raw)
            .map_or(Screen::NotFound, Screen::Category),
    }
}
