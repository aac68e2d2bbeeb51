use kadoc_web::locale::{switch_locale, Locale};
use kadoc_web::location::Location;
use kadoc_web::routes::{LocalizedRoute, Route};
use kadoc_web::theme::Theme;

fn parse(path: &str) -> LocalizedRoute {
    LocalizedRoute::parse(&Location::parse(path).unwrap())
}

#[test]
fn parses_routes_with_and_without_locale() {
    assert_eq!(parse("/"), Route::Landing.localized(Locale::En));
    assert_eq!(parse("/fr"), Route::Landing.localized(Locale::Fr));
    assert_eq!(parse("/about"), Route::About.localized(Locale::En));
    assert_eq!(parse("/en/snippets"), Route::Snippets.localized(Locale::En));
    assert_eq!(parse("/snippets/new"), Route::NewSnippet.localized(Locale::En));
    assert_eq!(
        parse("/fr/snippets/abc-123?q=x"),
        Route::Snippet("abc-123".into()).localized(Locale::Fr)
    );
    assert_eq!(parse("/fr/docs"), Route::Docs.localized(Locale::Fr));
    assert_eq!(parse("/docs/new"), Route::NewArticle.localized(Locale::En));
    assert_eq!(
        parse("/en/docs/42"),
        Route::Article("42".into()).localized(Locale::En)
    );
}

#[test]
fn unknown_paths_are_not_found() {
    for path in ["/en/unknown", "/snippets/1/2", "/de/docs", "/en/about/x"] {
        assert_eq!(parse(path).route, Route::NotFound, "{path}");
    }
}

#[test]
fn format_then_parse_agrees() {
    let routes = [
        Route::Landing,
        Route::About,
        Route::Snippets,
        Route::NewSnippet,
        Route::Snippet("a b/c".into()),
        Route::Docs,
        Route::NewArticle,
        Route::Article("42".into()),
        Route::NotFound,
    ];
    for locale in Locale::ALL {
        for route in routes.clone() {
            let localized = route.localized(locale);
            assert_eq!(LocalizedRoute::parse(&localized.to_location()), localized);
        }
    }
    assert_eq!(
        Route::Snippet("a b".into())
            .localized(Locale::Fr)
            .to_location()
            .to_relative(),
        "/fr/snippets/a%20b"
    );
    assert_eq!(Route::Landing.localized(Locale::En).to_location().to_relative(), "/en");
}

#[test]
fn locale_parses_case_insensitively() {
    assert_eq!("fr".parse::<Locale>().unwrap(), Locale::Fr);
    assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
    assert!("de".parse::<Locale>().is_err());
    assert_eq!(Locale::default(), Locale::En);
    assert_eq!(serde_json::to_string(&Locale::Fr).unwrap(), "\"fr\"");
}

#[test]
fn switch_locale_preserves_path_and_query() {
    let location = Location::parse("/en/snippets?q=rust&page=2").unwrap();
    assert_eq!(
        switch_locale(&location, Locale::Fr).to_relative(),
        "/fr/snippets?q=rust&page=2"
    );

    let unprefixed = Location::parse("/docs/7").unwrap();
    assert_eq!(switch_locale(&unprefixed, Locale::Fr).to_relative(), "/fr/docs/7");

    let root = Location::root();
    assert_eq!(switch_locale(&root, Locale::En).to_relative(), "/en");
}

#[test]
fn theme_resolves_and_toggles() {
    assert_eq!(Theme::System.resolve(true), Theme::Dark);
    assert_eq!(Theme::System.resolve(false), Theme::Light);
    assert_eq!(Theme::Light.resolve(true), Theme::Light);

    assert_eq!(Theme::Light.toggle(true), Theme::Dark);
    assert_eq!(Theme::Dark.toggle(false), Theme::Light);
    assert_eq!(Theme::System.toggle(true), Theme::Light);
    assert_eq!(Theme::System.toggle(false), Theme::Dark);

    assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
    assert!("sepia".parse::<Theme>().is_err());
}
