use std::sync::Arc;
use std::time::Duration;

use kadoc_client::KadocClient;
use kadoc_web::locale::Locale;
use kadoc_web::location::Location;
use kadoc_web::routes::Route;
use kadoc_web::state::FrontendState;
use kadoc_web::theme::Theme;

fn state(path: &str) -> FrontendState {
    // Never contacted by these tests.
    let api = KadocClient::new("http://127.0.0.1:9/api").unwrap();
    FrontendState::new(
        Arc::new(api),
        Location::parse(path).unwrap(),
        Duration::from_millis(500),
    )
}

#[test]
fn navigate_keeps_current_locale() {
    let state = state("/fr");
    assert_eq!(state.locale(), Locale::Fr);

    state.navigate(Route::Snippet("42".into()));
    assert_eq!(state.history().current().to_relative(), "/fr/snippets/42");
    assert_eq!(state.route().route, Route::Snippet("42".into()));
}

#[test]
fn unprefixed_start_uses_default_locale() {
    let state = state("/docs");
    assert_eq!(state.route(), Route::Docs.localized(Locale::En));

    state.navigate(Route::NewArticle);
    assert_eq!(state.history().current().to_relative(), "/en/docs/new");
}

#[test]
fn switch_locale_pushes_same_page() {
    let state = state("/en/snippets?q=rust");
    let revision = state.switch_locale(Locale::Fr);

    assert_eq!(revision, 1);
    assert_eq!(state.history().current().to_relative(), "/fr/snippets?q=rust");
    assert!(state.history().back());
    assert_eq!(state.locale(), Locale::En);
}

#[tokio::test]
async fn theme_toggle_is_session_only() {
    let state = state("/en");
    assert_eq!(state.theme().await, Theme::System);

    assert_eq!(state.toggle_theme(true).await, Theme::Light);
    assert_eq!(state.toggle_theme(true).await, Theme::Dark);
    assert_eq!(state.theme().await, Theme::Dark);
}

#[tokio::test(start_paused = true)]
async fn search_box_writes_to_shared_history() {
    let state = state("/en/snippets");
    let mut search = state.search();

    search.on_edit("tokio").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(
        state.history().current().query_param("q").as_deref(),
        Some("tokio")
    );
}
