//! Interactive browser.
//!
//! One actor task owns the [`CatalogSession`] and applies commands one at a
//! time. Page hydration runs on spawned tasks and reports back over a
//! channel; views are accepted only if no newer page was requested in the
//! meantime. Search commands are debounced: searches arriving within the
//! window collapse into the last one.

use std::io::{self, BufRead};
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::catalog::{
    CatalogSession, CategoryFilter, PageRequest, PageStep, PageView, Subgroup, load_page,
};
use crate::config::Config;
use crate::display::{Renderer, TerminalRenderer};
use crate::error::{DexError, Result};
use crate::remote::{CatalogClient, JsonGateway};

use super::open_session;

pub const HELP: &str = "\
Commands:
  n, next            next page
  p, prev            previous page
  page <n>           jump to page n
  /<text>            search by name (empty clears the search)
  type <name>        filter by category ('all' clears it)
  gen <1-7|all>      filter by generation
  clear              clear every filter
  show <id>          show details of one entry
  close              close the detail view
  help, ?            this help
  q, quit            exit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Page(usize),
    Search(String),
    Category(CategoryFilter),
    Subgroup(Subgroup),
    Clear,
    Show(u32),
    Close,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        let line = s.trim();

        if let Some(text) = line.strip_prefix('/') {
            return Ok(BrowseCommand::Search(text.to_string()));
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "n" | "next" => Ok(BrowseCommand::Next),
            "p" | "prev" => Ok(BrowseCommand::Prev),
            "page" => rest
                .parse()
                .map(BrowseCommand::Page)
                .map_err(|_| DexError::Other(format!("'{rest}' is not a page number"))),
            "search" => Ok(BrowseCommand::Search(rest.to_string())),
            "type" | "cat" | "category" => Ok(BrowseCommand::Category(rest.parse()?)),
            "gen" | "generation" => Ok(BrowseCommand::Subgroup(rest.parse()?)),
            "clear" => Ok(BrowseCommand::Clear),
            "show" => rest
                .trim_start_matches('#')
                .parse()
                .map(BrowseCommand::Show)
                .map_err(|_| DexError::Other(format!("'{rest}' is not an id"))),
            "close" => Ok(BrowseCommand::Close),
            "help" | "?" => Ok(BrowseCommand::Help),
            "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
            _ => Err(DexError::Other(format!(
                "unknown command '{line}', type 'help' for a list"
            ))),
        }
    }
}

/// Run the interactive browser on stdin/stdout
pub async fn cmd_browse(config: &Config) -> Result<()> {
    let session = open_session(config)?;
    let (tx, rx) = mpsc::channel(32);

    // Blocking stdin reads stay off the runtime so shutdown never waits on them
    std::thread::spawn(move || read_commands(io::stdin().lock(), tx));

    let mut renderer = TerminalRenderer::stdout();
    renderer.notice(HELP)?;
    run_browser(session, &mut renderer, rx, config.search_debounce()).await
}

/// Parse lines from `input` into commands until EOF or the receiver is gone
fn read_commands(input: impl BufRead, tx: mpsc::Sender<BrowseCommand>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<BrowseCommand>() {
            Ok(command) => {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
}

enum Flow {
    Continue(Option<PageRequest>),
    Quit,
}

/// Drive `session` from `commands` until `Quit` or until the sender closes.
///
/// On `Quit` the browser returns immediately. When the command stream simply
/// ends, pages still loading are rendered before returning.
pub async fn run_browser<G, R>(
    mut session: CatalogSession<G>,
    renderer: &mut R,
    mut commands: mpsc::Receiver<BrowseCommand>,
    debounce: Duration,
) -> Result<()>
where
    G: JsonGateway + Clone + 'static,
    R: Renderer,
{
    let (pages_tx, mut pages) = mpsc::channel::<PageView>(8);

    let first = session.start().await;
    renderer.set_loading(true)?;
    spawn_load(session.client(), first, &pages_tx);

    let mut deferred: Option<BrowseCommand> = None;

    loop {
        let command = match deferred.take() {
            Some(command) => command,
            None => tokio::select! {
                Some(view) = pages.recv() => {
                    show_view(&session, renderer, view)?;
                    continue;
                }
                command = commands.recv() => match command {
                    Some(command) => command,
                    None => break,
                },
            },
        };

        let command = match command {
            BrowseCommand::Search(text) => {
                let (text, next) = debounce_search(text, &mut commands, debounce).await;
                deferred = next;
                BrowseCommand::Search(text)
            }
            other => other,
        };

        match handle(command, &mut session, renderer).await? {
            Flow::Continue(Some(request)) => {
                renderer.set_loading(true)?;
                spawn_load(session.client(), request, &pages_tx);
            }
            Flow::Continue(None) => {}
            Flow::Quit => return Ok(()),
        }
    }

    drop(pages_tx);
    while let Some(view) = pages.recv().await {
        show_view(&session, renderer, view)?;
    }
    Ok(())
}

/// Collapse searches arriving within `window` into the last one.
///
/// Returns the search text to apply and the first non-search command that
/// ended the window, if any.
async fn debounce_search(
    first: String,
    commands: &mut mpsc::Receiver<BrowseCommand>,
    window: Duration,
) -> (String, Option<BrowseCommand>) {
    let mut text = first;
    loop {
        match tokio::time::timeout(window, commands.recv()).await {
            Ok(Some(BrowseCommand::Search(next))) => text = next,
            Ok(Some(other)) => return (text, Some(other)),
            // Window elapsed, or the sender is gone and the caller sees it next
            Ok(None) | Err(_) => return (text, None),
        }
    }
}

async fn handle<G, R>(
    command: BrowseCommand,
    session: &mut CatalogSession<G>,
    renderer: &mut R,
) -> Result<Flow>
where
    G: JsonGateway,
    R: Renderer,
{
    let request = match command {
        BrowseCommand::Next => {
            let request = session.step_page(PageStep::Next).await;
            if request.is_none() {
                renderer.notice("Already on the last page.")?;
            }
            request
        }
        BrowseCommand::Prev => {
            let request = session.step_page(PageStep::Prev).await;
            if request.is_none() {
                renderer.notice("Already on the first page.")?;
            }
            request
        }
        BrowseCommand::Page(page) => {
            let request = session.go_to_page(page).await;
            if request.is_none() {
                let total = session.pagination().total_pages();
                renderer.notice(&DexError::PageOutOfRange(page, total).to_string())?;
            }
            request
        }
        BrowseCommand::Search(text) => Some(session.set_search(&text).await),
        BrowseCommand::Category(category) => Some(session.set_category(category).await),
        BrowseCommand::Subgroup(subgroup) => Some(session.set_subgroup(subgroup).await),
        BrowseCommand::Clear => Some(session.clear_filters().await),
        BrowseCommand::Show(id) => {
            if let Some(detail) = session.detail(id).await {
                renderer.render_detail(&detail)?;
            }
            None
        }
        BrowseCommand::Close => {
            renderer.close_detail()?;
            None
        }
        BrowseCommand::Help => {
            renderer.notice(HELP)?;
            None
        }
        BrowseCommand::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(request))
}

fn spawn_load<G>(client: &CatalogClient<G>, request: PageRequest, tx: &mpsc::Sender<PageView>)
where
    G: JsonGateway + Clone + 'static,
{
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let view = load_page(&client, request).await;
        // The browser may have quit already
        let _ = tx.send(view).await;
    });
}

fn show_view<G, R>(session: &CatalogSession<G>, renderer: &mut R, view: PageView) -> Result<()>
where
    G: JsonGateway,
    R: Renderer,
{
    if let Some(view) = session.accept(view) {
        renderer.set_loading(false)?;
        renderer.render_view(&view)?;
    }
    Ok(())
}
