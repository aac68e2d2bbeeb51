//! `kadoc`: terminal front-end for the Kadoc snippet and documentation
//! library.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use kadoc_client::{KadocClient, LoadState};
use kadoc_core::api_paths::SEARCH_PARAM;
use kadoc_core::models::article::{Article, Category};
use kadoc_core::models::snippet::Snippet;
use kadoc_web::config::{self, KadocConfig};
use kadoc_web::locale::Locale;
use kadoc_web::pages::articles::{load_article, ArticleListPage, NewArticleForm};
use kadoc_web::pages::snippets::{load_snippet, snippet_card, NewSnippetForm, SnippetListView};
use kadoc_web::routes::Route;
use kadoc_web::state::FrontendState;

#[derive(Parser)]
#[command(name = "kadoc")]
#[command(about = "Browse and add code snippets and documentation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides KADOC_API_URL and the saved config)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Locale prefix for navigation: en or fr
    #[arg(long, global = true)]
    locale: Option<Locale>,
}

#[derive(Subcommand)]
enum Commands {
    /// List snippets, optionally filtered
    Snippets {
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one snippet
    Snippet { id: String },

    /// Create a snippet
    NewSnippet {
        #[arg(long)]
        title: String,

        /// One of the offered languages (javascript, python, go, ...)
        #[arg(long, default_value = kadoc_core::models::snippet::DEFAULT_LANGUAGE)]
        language: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Code body; read from stdin when omitted
        #[arg(long)]
        code: Option<String>,

        #[arg(long, default_value_t = 1)]
        complexity: u8,

        /// Reference URL (repeatable)
        #[arg(long = "reference", value_name = "URL")]
        references: Vec<String>,
    },

    /// List documentation articles, optionally filtered by title or category
    Docs {
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show one article
    Doc { id: String },

    /// Create an article
    NewArticle {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "General")]
        category: String,

        /// Markdown body; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
    },

    /// Interactive debounced search: each input line replaces the query
    Search,

    /// Show or save configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Save the effective configuration
    Save,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = config::load_or_default()?;
    config.api_url = config.resolve_api_url(cli.api_url.as_deref());
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    match cli.command {
        Commands::Config { action } => run_config(action, &config),
        command => run(command, &config).await,
    }
}

fn run_config(action: ConfigAction, config: &KadocConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Save => {
            let path = config::save_config(config)?;
            println!("saved {}", path.display());
        }
    }
    Ok(())
}

async fn run(command: Commands, config: &KadocConfig) -> Result<()> {
    let client = KadocClient::new(&config.api_url)?;
    let start = Route::Landing.localized(config.locale).to_location();
    let state = FrontendState::new(Arc::new(client), start, config.quiet_period());
    let api = state.api();

    match command {
        Commands::Snippets { query } => {
            state.navigate(Route::Snippets);
            if let Some(query) = query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                state
                    .history()
                    .replace_with(|location| location.with_query_param(SEARCH_PARAM, query));
            }
            let mut page = state.snippet_list();
            print_snippet_list(&page.loaded().await);
        }
        Commands::Snippet { id } => {
            state.navigate(Route::Snippet(id.clone()));
            match load_snippet(api.as_ref(), &id).await {
                LoadState::Loaded(snippet) => print_snippet(&snippet),
                other => report(&other, "snippet"),
            }
        }
        Commands::NewSnippet {
            title,
            language,
            description,
            code,
            complexity,
            references,
        } => {
            state.navigate(Route::NewSnippet);
            let mut form = NewSnippetForm::default();
            form.title = title;
            form.set_language(&language)?;
            form.description = description;
            form.code = match code {
                Some(code) => code,
                None => read_stdin().await?,
            };
            form.set_complexity(complexity)?;
            for reference in references {
                let row = form.add_reference();
                form.set_reference(row, reference);
            }
            let created = form.submit(api.as_ref(), state.history(), state.locale()).await?;
            println!("created snippet {}", created.id);
            println!("now at {}", state.history().current());
        }
        Commands::Docs { filter } => {
            state.navigate(Route::Docs);
            let mut page = ArticleListPage::load(api.as_ref()).await;
            if let Some(filter) = filter {
                page.set_term(filter);
            }
            print_article_list(&page);
        }
        Commands::Doc { id } => {
            state.navigate(Route::Article(id.clone()));
            match load_article(api.as_ref(), &id).await {
                LoadState::Loaded(article) => print_article(&article),
                other => report(&other, "article"),
            }
        }
        Commands::NewArticle {
            title,
            category,
            content,
        } => {
            state.navigate(Route::NewArticle);
            let mut form = NewArticleForm::default();
            form.title = title;
            form.category = Category::from(category);
            form.content = match content {
                Some(content) => content,
                None => read_stdin().await?,
            };
            let created = form.submit(api.as_ref(), state.history(), state.locale()).await?;
            println!("created article {}", created.id);
            println!("now at {}", state.history().current());
        }
        Commands::Search => {
            state.navigate(Route::Snippets);
            interactive_search(&state).await?;
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

async fn interactive_search(state: &FrontendState) -> Result<()> {
    let mut search = state.search();
    let page = state.snippet_list();
    let mut views = page.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("type to search; an empty line clears the filter; ctrl-d quits");
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => search.on_edit(line).await,
                None => break,
            },
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if !view.state.is_loading() {
                    println!("-- {}", state.history().current());
                    print_snippet_list(&view);
                }
            }
        }
    }
    Ok(())
}

async fn read_stdin() -> Result<String> {
    use tokio::io::AsyncReadExt;

    let mut body = String::new();
    tokio::io::stdin().read_to_string(&mut body).await?;
    Ok(body)
}

fn report<T>(state: &LoadState<T>, what: &str) {
    match state {
        LoadState::NotFound => println!("{what} not found"),
        LoadState::Failed(_) => println!("could not load {what}"),
        LoadState::Loading | LoadState::Loaded(_) => {}
    }
}

fn print_snippet_list(view: &SnippetListView) {
    match &view.state {
        LoadState::Loaded(snippets) => {
            if let Some(empty) = view.empty_state() {
                println!("{empty}");
            }
            for snippet in snippets {
                print!("{}", snippet_card(snippet));
            }
        }
        other => report(other, "snippets"),
    }
}

fn print_snippet(snippet: &Snippet) {
    println!("{} [{}]", snippet.title, snippet.language);
    println!("complexity: {}", snippet.complexity);
    println!("{}", snippet.description_or("No description"));
    println!();
    println!("{}", snippet.code);
    if !snippet.references.is_empty() {
        println!();
        for reference in &snippet.references {
            println!("- {reference}");
        }
    }
    println!();
    println!("created {}, updated {}", snippet.created_at, snippet.updated_at);
}

fn print_article_list(page: &ArticleListPage) {
    match page.state() {
        LoadState::Loaded(_) => {
            if let Some(empty) = page.empty_state() {
                println!("{empty}");
            }
            for article in page.visible() {
                println!("{}  [{}] {}", article.id, article.category, article.title);
            }
        }
        other => report(other, "articles"),
    }
}

fn print_article(article: &Article) {
    println!("{} [{}]", article.title, article.category);
    println!();
    println!("{}", article.content);
    println!();
    println!("created {}, updated {}", article.created_at, article.updated_at);
}
