//! Typed front-end routes.
//!
//! Every route may carry a leading locale segment (`/fr/docs/42`); a path
//! without one is read as the default locale. Formatting always emits the
//! prefix.

use crate::locale::{locale_prefix, Locale};
use crate::location::Location;

const ABOUT: &str = "about";
const SNIPPETS: &str = "snippets";
const DOCS: &str = "docs";
const NEW: &str = "new";
const NOT_FOUND: &str = "404";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    About,
    Snippets,
    NewSnippet,
    Snippet(String),
    Docs,
    NewArticle,
    Article(String),
    NotFound,
}

impl Route {
    fn from_segments(segments: &[&str]) -> Route {
        match segments {
            [] => Route::Landing,
            [ABOUT] => Route::About,
            [SNIPPETS] => Route::Snippets,
            [SNIPPETS, NEW] => Route::NewSnippet,
            [SNIPPETS, id] => Route::Snippet(id.to_string()),
            [DOCS] => Route::Docs,
            [DOCS, NEW] => Route::NewArticle,
            [DOCS, id] => Route::Article(id.to_string()),
            _ => Route::NotFound,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Route::Landing => vec![],
            Route::About => vec![ABOUT],
            Route::Snippets => vec![SNIPPETS],
            Route::NewSnippet => vec![SNIPPETS, NEW],
            Route::Snippet(id) => vec![SNIPPETS, id.as_str()],
            Route::Docs => vec![DOCS],
            Route::NewArticle => vec![DOCS, NEW],
            Route::Article(id) => vec![DOCS, id.as_str()],
            Route::NotFound => vec![NOT_FOUND],
        }
    }

    pub fn localized(self, locale: Locale) -> LocalizedRoute {
        LocalizedRoute {
            locale,
            route: self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRoute {
    pub locale: Locale,
    pub route: Route,
}

impl LocalizedRoute {
    pub fn parse(location: &Location) -> Self {
        let segments = location.segments();
        let mut rest: Vec<&str> = segments.iter().map(String::as_str).collect();
        let locale = match locale_prefix(location) {
            Some(locale) => {
                rest.remove(0);
                locale
            }
            None => Locale::default(),
        };
        LocalizedRoute {
            locale,
            route: Route::from_segments(&rest),
        }
    }

    /// Path of this route, without any query.
    pub fn to_location(&self) -> Location {
        Location::from_segments(
            std::iter::once(self.locale.as_str()).chain(self.route.segments()),
        )
    }
}
