use std::sync::Arc;
use std::time::Duration;

use kadoc_client::KadocApi;
use tokio::sync::Mutex;

use crate::locale::{switch_locale, Locale};
use crate::location::{History, Location};
use crate::pages::snippets::SnippetListPage;
use crate::routes::{LocalizedRoute, Route};
use crate::search::SearchController;
use crate::theme::Theme;

/// Everything a page needs: the API, the shared history, and session-only
/// preferences.
pub struct FrontendState {
    api: Arc<dyn KadocApi>,
    history: History,
    quiet_period: Duration,
    theme: Arc<Mutex<Theme>>,
}

impl FrontendState {
    pub fn new(api: Arc<dyn KadocApi>, initial: Location, quiet_period: Duration) -> Self {
        Self {
            api,
            history: History::new(initial),
            quiet_period,
            theme: Arc::new(Mutex::new(Theme::default())),
        }
    }

    pub fn api(&self) -> Arc<dyn KadocApi> {
        Arc::clone(&self.api)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn route(&self) -> LocalizedRoute {
        LocalizedRoute::parse(&self.history.current())
    }

    pub fn locale(&self) -> Locale {
        self.route().locale
    }

    /// Push `route` in the current locale. Returns the new revision.
    pub fn navigate(&self, route: Route) -> u64 {
        let target = route.localized(self.locale()).to_location();
        tracing::debug!(%target, "navigate");
        self.history.push(target)
    }

    /// Push the current location under `locale`, keeping path and query.
    pub fn switch_locale(&self, locale: Locale) -> u64 {
        self.history.push(switch_locale(&self.history.current(), locale))
    }

    pub async fn theme(&self) -> Theme {
        *self.theme.lock().await
    }

    pub async fn toggle_theme(&self, system_prefers_dark: bool) -> Theme {
        let mut theme = self.theme.lock().await;
        *theme = theme.toggle(system_prefers_dark);
        *theme
    }

    /// A search box bound to this history.
    pub fn search(&self) -> SearchController {
        SearchController::new(self.history.clone(), self.quiet_period)
    }

    pub fn snippet_list(&self) -> SnippetListPage {
        SnippetListPage::open(self.api(), self.history.clone())
    }
}
