use kadoc_web::error::WebError;
use kadoc_web::location::{History, Location};

fn loc(path: &str) -> Location {
    Location::parse(path).unwrap()
}

#[test]
fn parse_reads_path_and_decoded_query() {
    let location = loc("/en/snippets?q=hello%20world&tag=a%2Bb#top");
    assert_eq!(location.path(), "/en/snippets");
    assert_eq!(location.query_param("q").as_deref(), Some("hello world"));
    assert_eq!(location.query_param("tag").as_deref(), Some("a+b"));
    assert_eq!(location.query_param("missing"), None);
    assert_eq!(location.segments(), vec!["en", "snippets"]);
}

#[test]
fn parse_rejects_non_relative_paths() {
    for raw in ["snippets", "//evil.example/x", "https://example.com/", ""] {
        assert!(
            matches!(Location::parse(raw), Err(WebError::InvalidLocation(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn with_query_param_replaces_in_place() {
    let location = loc("/docs?a=1&q=x&b=2&q=y");
    assert_eq!(
        location.with_query_param("q", "new").to_relative(),
        "/docs?a=1&q=new&b=2"
    );
    assert_eq!(
        loc("/docs?a=1").with_query_param("q", "c++ & rust").to_relative(),
        "/docs?a=1&q=c%2B%2B+%26+rust"
    );
}

#[test]
fn without_query_param_keeps_others() {
    let location = loc("/docs?a=1&q=x&b=2");
    assert_eq!(location.without_query_param("q").to_relative(), "/docs?a=1&b=2");
    assert_eq!(loc("/docs?q=x").without_query_param("q").to_relative(), "/docs");
    assert_eq!(loc("/docs?q=x").without_query_param("q").query(), None);
}

#[test]
fn segments_are_encoded_and_decoded() {
    let location = Location::from_segments(["en", "snippets", "a/b c"]);
    assert_eq!(location.path(), "/en/snippets/a%2Fb%20c");
    assert_eq!(location.segments(), vec!["en", "snippets", "a/b c"]);
    assert_eq!(Location::root().to_relative(), "/");
    assert!(Location::root().segments().is_empty());
}

#[test]
fn with_path_of_moves_query() {
    let from = loc("/en/snippets?q=rust");
    let moved = from.with_path_of(&loc("/fr/snippets"));
    assert_eq!(moved.to_string(), "/fr/snippets?q=rust");
}

#[test]
fn history_push_back_forward() {
    let history = History::new(loc("/en"));
    assert_eq!(history.revision(), 0);

    assert_eq!(history.push(loc("/en/snippets")), 1);
    assert_eq!(history.push(loc("/en/docs")), 2);
    assert!(history.back());
    assert_eq!(history.current(), loc("/en/snippets"));
    assert_eq!(history.revision(), 3);

    assert!(history.forward());
    assert_eq!(history.current(), loc("/en/docs"));
    assert!(!history.forward());
    assert_eq!(history.revision(), 4);
}

#[test]
fn push_drops_forward_entries() {
    let history = History::new(loc("/en"));
    history.push(loc("/en/snippets"));
    history.back();
    history.push(loc("/en/docs"));

    assert!(!history.forward());
    assert!(history.back());
    assert_eq!(history.current(), loc("/en"));
    assert!(!history.back());
}

#[test]
fn replace_overwrites_current_entry() {
    let history = History::new(loc("/en"));
    history.push(loc("/en/snippets"));
    let revision = history.replace_with(|l| l.with_query_param("q", "go"));

    assert_eq!(revision, 2);
    assert_eq!(history.current().to_relative(), "/en/snippets?q=go");
    history.back();
    assert_eq!(history.current(), loc("/en"));
    history.forward();
    assert_eq!(history.current().to_relative(), "/en/snippets?q=go");

    history.replace(loc("/fr"));
    assert_eq!(history.current(), loc("/fr"));
}

#[tokio::test]
async fn declined_replace_leaves_history_untouched() {
    let history = History::new(loc("/en/snippets?q=foo"));
    let mut rx = history.subscribe();

    let declined = history.replace_if(|l| {
        (l.query_param("q").as_deref() == Some("bar")).then(|| l.with_query_param("q", "baz"))
    });
    assert_eq!(declined, None);
    assert_eq!(history.revision(), 0);
    assert!(!rx.has_changed().unwrap());

    let replaced = history.replace_if(|l| Some(l.with_query_param("q", "baz")));
    assert_eq!(replaced, Some(1));
    assert!(rx.has_changed().unwrap());
    assert_eq!(history.current().to_relative(), "/en/snippets?q=baz");
}

#[tokio::test]
async fn subscribers_see_every_navigation() {
    let history = History::new(loc("/en"));
    let mut rx = history.subscribe();

    history.push(loc("/en/docs"));
    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.revision(), 1);
    assert_eq!(state.location(), &loc("/en/docs"));
    assert!(state.can_go_back());
}
