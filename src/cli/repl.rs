//!
//! Interactive catalog browser
//! ---------------------------
//! Line-oriented REPL over a [`CatalogSession`]. Each line parses into one
//! [`Command`]; catalog commands become session [`Action`]s and the resulting
//! frame is printed after every change.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::model::SortKey;
use crate::session::{Action, CatalogSession};
use crate::source::ProductSource;

use super::render::{render_catalog, render_categories, render_detail, RenderOptions};

pub const HELP: &str = "Commands:
  search <text>         filter the current page by title, description or brand (empty clears)
  category <name>|all   browse one category (resets to page 1)
  categories            list category names
  sort <key>|none       price-asc, price-desc, name-asc, name-desc, rating-desc, discount-desc
  page <n>              jump to page n
  next | prev           move one page
  open <id>             show product details
  img next|prev|<n>     cycle product images or jump to image n
  close                 close product details
  clear                 reset search, category and sort
  retry                 repeat the last page request
  refresh               reload the current page
  show                  print the current page again
  help                  show this help
  quit | exit           leave the browser";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Catalog(Action),
    Categories,
    Show,
    Help,
    Quit,
    Empty,
}

/// Parse one REPL line.
pub fn parse_command(line: &str) -> CatalogResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let cmd = match head.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Catalog(Action::Search(rest.to_string())),
        "category" | "cat" => {
            let category = if rest.eq_ignore_ascii_case("all") { String::new() } else { rest.to_string() };
            Command::Catalog(Action::Category(category))
        }
        "categories" => Command::Categories,
        "sort" => Command::Catalog(Action::Sort(SortKey::parse_user(rest)?)),
        "page" | "p" => Command::Catalog(Action::Page(parse_number(rest, "page")?)),
        "next" | "n" => Command::Catalog(Action::Next),
        "prev" | "previous" => Command::Catalog(Action::Previous),
        "open" | "o" => Command::Catalog(Action::Open(parse_number(rest, "product id")?)),
        "close" => Command::Catalog(Action::Close),
        "img" | "image" => match rest.to_ascii_lowercase().as_str() {
            "next" | "" => Command::Catalog(Action::NextImage),
            "prev" | "previous" => Command::Catalog(Action::PreviousImage),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Catalog(Action::SelectImage(n - 1)),
                _ => {
                    return Err(CatalogError::user(
                        "bad_command",
                        format!("img expects next, prev or an image number, got '{}'", other),
                    ))
                }
            },
        },
        "clear" => Command::Catalog(Action::ClearFilters),
        "retry" => Command::Catalog(Action::Retry),
        "refresh" => Command::Catalog(Action::Refresh),
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CatalogError::user("bad_command", format!("unknown command '{}' (try 'help')", other))),
    };
    Ok(cmd)
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> CatalogResult<T> {
    text.parse::<T>()
        .map_err(|_| CatalogError::user("bad_number", format!("{} must be a positive integer, got '{}'", what, text)))
}

/// Run one command against the session and return the text to print, or
/// `None` when the browser should exit.
pub async fn execute<S: ProductSource>(
    session: &mut CatalogSession<S>,
    command: Command,
    opts: RenderOptions,
) -> Option<String> {
    match command {
        Command::Quit => None,
        Command::Empty => Some(String::new()),
        Command::Help => Some(format!("{}\n", HELP)),
        Command::Show => Some(render_catalog(&session.view(), opts)),
        Command::Categories => {
            let view = session.view();
            if view.categories.is_empty() {
                session.dispatch(Action::LoadCategories).await;
            }
            let view = session.view();
            match view.categories_error {
                Some(err) => Some(format!("{}\n", err)),
                None => Some(render_categories(&view.categories)),
            }
        }
        Command::Catalog(action) => {
            let shows_detail =
            matches!(action, Action::Open(_) | Action::NextImage | Action::PreviousImage | Action::SelectImage(_));
            session.dispatch(action).await;
            let view = session.view();
            if shows_detail {
                if let Some(detail) = &view.detail {
                    return Some(render_detail(detail, opts.width));
                }
            }
            Some(render_catalog(&view, opts))
        }
    }
}

/// Blocking REPL loop. Async work is driven on `rt`.
pub fn run_repl<S: ProductSource>(
    rt: &tokio::runtime::Runtime,
    session: &mut CatalogSession<S>,
    opts: RenderOptions,
) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("Type 'help' for commands.");
    rt.block_on(session.start());
    print!("{}", render_catalog(&session.view(), opts));
    loop {
        let line = match editor.readline("showcase> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e.message());
                continue;
            }
        };
        debug!(target: "showcase::repl", "command: {:?}", command);
        match rt.block_on(execute(session, command, opts)) {
            Some(text) => print!("{}", text),
            None => break,
        }
    }
    Ok(())
}
