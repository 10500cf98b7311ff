//! Hash-path view dispatch with stale-completion discard.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Hash fragments understood by the dashboard shell.
pub mod routes {
    pub const LOGIN: &str = "#/login";
    pub const SIGNUP: &str = "#/signup";
    pub const SUMMARY: &str = "#/summary";
    pub const TRADE: &str = "#/trade";
    pub const ADMIN: &str = "#/admin";
    pub const PORTFOLIO: &str = "#/portfolio";
    pub const NEWS: &str = "#/news";
    pub const PROFILE: &str = "#/profile";
    pub const SETTINGS: &str = "#/settings";
}

/// Rendered view payload produced by a registered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewContent {
    pub title: String,
    pub body: String,
}

impl ViewContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    fn missing(path: &str) -> Self {
        Self::new("not found", format!("no view registered for '{path}'"))
    }
}

/// Identifies one view mount. A token minted by `dispatch` stays valid until
/// the next dispatch; async work finished under an older token is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountToken {
    generation: u64,
}

/// A dispatched view plus the token guarding its async completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub token: MountToken,
    pub content: ViewContent,
}

/// Outcome of applying an async completion against the current mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncOutcome {
    Applied,
    Stale,
}

type ViewProducer = Box<dyn Fn() -> ViewContent + Send + Sync>;

/// Path → view-producer registry and dispatcher.
///
/// Unregistered or empty paths fall back to the default path given at
/// construction (the login/summary entry view).
pub struct Router {
    views: HashMap<String, ViewProducer>,
    default_path: String,
    generation: AtomicU64,
    current: Mutex<Option<ViewContent>>,
}

impl Router {
    pub fn new(default_path: impl Into<String>) -> Self {
        Self {
            views: HashMap::new(),
            default_path: default_path.into(),
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Register a zero-argument producer for `path`, replacing any prior one.
    pub fn register<F>(&mut self, path: impl Into<String>, producer: F)
    where
        F: Fn() -> ViewContent + Send + Sync + 'static,
    {
        self.views.insert(path.into(), Box::new(producer));
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// Resolve `path` (falling back to the default path), produce its view,
    /// and replace the currently mounted content.
    pub fn dispatch(&self, path: &str) -> Mount {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = MountToken { generation };

        let resolved = if path.trim().is_empty() {
            self.default_path.as_str()
        } else {
            path
        };
        let producer = self
            .views
            .get(resolved)
            .or_else(|| self.views.get(&self.default_path));

        let content = match producer {
            Some(producer) => producer(),
            None => ViewContent::missing(resolved),
        };

        self.replace_current(content.clone());
        Mount { token, content }
    }

    /// Whether `token` still identifies the latest mount.
    pub fn is_current(&self, token: MountToken) -> bool {
        token.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Apply an async completion. Content finished under a superseded token
    /// is discarded instead of overwriting the newer view.
    pub fn apply_async(&self, token: MountToken, content: ViewContent) -> AsyncOutcome {
        if !self.is_current(token) {
            return AsyncOutcome::Stale;
        }

        self.replace_current(content);
        AsyncOutcome::Applied
    }

    /// The most recently mounted content, if any view has been dispatched.
    pub fn current(&self) -> Option<ViewContent> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_current(&self, content: ViewContent) {
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(content);
    }
}
