//!
//! showcase CLI binary
//! -------------------
//! One-shot catalog queries (`list`, `show`, `categories`) and an interactive
//! browser (`browse`) against a dummyjson-compatible product API.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use showcase::cli::{self, ListOutput, RenderOptions};
use showcase::config::Config;
use showcase::http::HttpProductSource;
use showcase::model::SortKey;
use showcase::orchestrator::{Completion, ViewState};
use showcase::session::CatalogSession;

#[derive(Parser, Debug)]
#[command(name = "showcase", version, about = "Browse a paginated product catalog from the terminal")]
struct Cli {
    /// Catalog API root (default: $SHOWCASE_BASE_URL or https://dummyjson.com)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Products per page (default: $SHOWCASE_PAGE_SIZE or 12)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Show three page buttons instead of five
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of products
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        search: String,
        /// none, price-asc, price-desc, name-asc, name-desc, rating-desc, discount-desc
        #[arg(long, default_value = "")]
        sort: String,
        #[arg(long)]
        json: bool,
    },
    /// Show a single product
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// List category names
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Interactive browser (default)
    Browse,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let args = Cli::parse();
    let config = build_config(&args)?;
    info!(target: "showcase", "base_url={}, page_size={}, max_visible={}", config.base_url, config.page_size, config.max_visible_pages);

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let source = HttpProductSource::new(&config)?;
    let mut session = CatalogSession::new(source, &config);
    let opts = RenderOptions { width: cli::table::terminal_width(), color: std::env::var_os("NO_COLOR").is_none() };

    match args.command.unwrap_or(Commands::Browse) {
        Commands::Browse => cli::run_repl(&rt, &mut session, opts),
        Commands::List { page, category, search, sort, json } => {
            let key = SortKey::parse_user(&sort).map_err(|e| anyhow!("{}", e.message()))?;
            rt.block_on(session.load_query(&search, &category, key, page));
            let view = session.view();
            let products = match &view.products {
                ViewState::Ready(p) => p,
                ViewState::Error(msg) => return Err(anyhow!("{}", msg)),
                ViewState::Loading => return Err(anyhow!("no data")),
            };
            if cli::wants_json(json) {
                println!("{}", serde_json::to_string_pretty(&ListOutput::new(&view.pagination, products))?);
            } else {
                print!("{}", cli::render_products(products, opts));
                print!("{}", cli::render_pagination(&view.pagination));
            }
            Ok(())
        }
        Commands::Show { id, json } => {
            let outcome = rt.block_on(session.orchestrator().load_one(id));
            if let Completion::Failed(err) = outcome {
                return Err(anyhow!("{}", err.user_message()));
            }
            let detail = session.view().detail.ok_or_else(|| anyhow!("no product loaded"))?;
            match (&detail.state, cli::wants_json(json)) {
                (ViewState::Ready(p), true) => println!("{}", serde_json::to_string_pretty(p)?),
                _ => print!("{}", cli::render_detail(&detail, opts.width)),
            }
            Ok(())
        }
        Commands::Categories { json } => {
            let outcome = rt.block_on(session.orchestrator().load_categories());
            if let Completion::Failed(err) = outcome {
                return Err(anyhow!("Failed to load categories: {}", err.user_message()));
            }
            let categories = session.view().categories;
            if cli::wants_json(json) {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print!("{}", cli::render_categories(&categories));
            }
            Ok(())
        }
    }
}

fn build_config(args: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(base) = &args.base_url {
        config = config.with_base_url(base)?;
    }
    if let Some(size) = args.page_size {
        config = config.with_page_size(size)?;
    }
    if args.compact {
        config = config.with_max_visible_pages(showcase::config::MAX_VISIBLE_PAGES_COMPACT)?;
    }
    Ok(config)
}
