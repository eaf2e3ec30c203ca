//! Command-line entry point.
//!
//! A thin layer over the library: every subcommand opens the collection,
//! calls one library operation and prints the result. With no subcommand the
//! interactive menu runs.
//!
//! # Menu Loop
//!
//! ```text
//! stdin line → parse_input → handle_event → actions → perform → handle_event
//!                                  │
//!                                  └── render → stdout
//! ```
//!
//! Logs go to the log file only, never to the terminal.

#![allow(clippy::multiple_crate_versions)]

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use librarian::app::{
    apply, handle_event, parse_input, perform, Action, AppState, CirculationOp, CirculationRequest, OrderSource,
};
use librarian::circulation::{describe, recent_activity, Circulation};
use librarian::insights::{self, Dimension, Tally};
use librarian::query::{search, search_by_field, FieldQuery};
use librarian::storage::{self, TextStorage};
use librarian::ui::render;
use librarian::{observability, Book, BookId, Config, LibrarianError, MemberId, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "librarian", version)]
#[command(about = "Search, lend and plan purchases for a personal book collection")]
struct Cli {
    /// Config file (default: ./librarian.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the catalog and ledger files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Print results as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in catalog and an empty ledger into the data directory.
    Init {
        /// Overwrite existing files.
        #[arg(long)]
        force: bool,
    },
    /// Natural-language search, e.g. `books by becky chambers in science fiction`.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search one field: id, title, author, category, price or date.
    Find {
        field: String,
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },
    /// Add a book to the catalog.
    Add {
        id: BookId,
        category: String,
        title: String,
        author: String,
        /// Purchase price in whole pounds.
        price: u32,
        /// Purchase date, YYYY-MM-DD.
        date: NaiveDate,
    },
    /// Show whether a book is available, out or reserved.
    Status { id: BookId },
    /// Check books out to a member.
    Checkout {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<BookId>,
        #[arg(long, short)]
        member: MemberId,
    },
    /// Reserve books that are on loan to someone else.
    Reserve {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<BookId>,
        #[arg(long, short)]
        member: MemberId,
    },
    /// Cancel reservations.
    Dereserve {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<BookId>,
    },
    /// Return books.
    Return {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<BookId>,
    },
    /// Recent circulation, most recent first.
    Activity {
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Author and category prevalence.
    Stats {
        #[arg(long, value_enum, default_value_t = SourceArg::Ledger)]
        source: SourceArg,
    },
    /// Suggest how to spend a budget in whole pounds.
    Recommend { budget: u32 },
    /// Interactive menu (the default).
    Menu,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Ledger,
    Catalog,
}

impl From<SourceArg> for OrderSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Ledger => Self::Ledger,
            SourceArg::Catalog => Self::Catalog,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let data_dir = config.data_dir(cli.data_dir.as_deref());

    let level = if cli.verbose > 0 { Some("debug") } else { config.trace_level.as_deref() };
    observability::init_tracing(&config.log_path(&data_dir), level);
    tracing::debug!(data_dir = %data_dir.display(), "librarian starting");

    let json = cli.json;
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Init { force } => init(&data_dir, force),
        Commands::Search { query } => {
            let desk = open(&data_dir)?;
            let found = search(desk.catalog(), &query.join(" "));
            print_books(&desk, &found, json)
        }
        Commands::Find { field, value } => {
            let desk = open(&data_dir)?;
            let query = FieldQuery::parse(&field, &value.join(" "))?;
            let found = search_by_field(desk.catalog(), &query);
            print_books(&desk, &found, json)
        }
        Commands::Add {
            id,
            category,
            title,
            author,
            price,
            date,
        } => {
            let mut desk = open(&data_dir)?;
            let book = Book::new(
                id,
                category.trim().to_lowercase(),
                title.trim().to_lowercase(),
                author.trim().to_lowercase(),
                price,
                date,
            );
            desk.add_book(book)?;
            println!("added book {id}");
            Ok(())
        }
        Commands::Status { id } => status(&open(&data_dir)?, id, json),
        Commands::Checkout { ids, member } => circulate(&data_dir, CirculationOp::CheckOut, ids, Some(member)),
        Commands::Reserve { ids, member } => circulate(&data_dir, CirculationOp::Reserve, ids, Some(member)),
        Commands::Dereserve { ids } => circulate(&data_dir, CirculationOp::Dereserve, ids, None),
        Commands::Return { ids } => circulate(&data_dir, CirculationOp::Return, ids, None),
        Commands::Activity { limit } => {
            let desk = open(&data_dir)?;
            for line in recent_activity(desk.catalog(), desk.ledger().entries(), limit) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Stats { source } => stats(&open(&data_dir)?, source.into(), json),
        Commands::Recommend { budget } => {
            let desk = open(&data_dir)?;
            let rec = insights::recommend(desk.catalog(), desk.ledger().entries(), budget)?;
            if json {
                return print_json(&rec);
            }
            println!("{}", rec.summary());
            print_tallies("Books to buy per author", &rec.authors);
            print_tallies("Books to buy per category", &rec.categories);
            Ok(())
        }
        Commands::Menu => menu(&config, &data_dir),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn open(data_dir: &Path) -> Result<Circulation<TextStorage>> {
    Circulation::open(TextStorage::open(data_dir)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| LibrarianError::Storage(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn init(data_dir: &Path, force: bool) -> Result<()> {
    if storage::seed(data_dir, force)? {
        println!("initialised {}", data_dir.display());
    } else {
        println!("{} already holds a collection, use --force to overwrite", data_dir.display());
    }
    Ok(())
}

fn print_books(desk: &Circulation<TextStorage>, books: &[Book], json: bool) -> Result<()> {
    if json {
        return print_json(&books);
    }
    if books.is_empty() {
        println!("no books found");
        return Ok(());
    }
    for book in books {
        let status = desk.ledger().status(book.id);
        println!(
            "{} {:>3}  {} by {}  ({}, £{}, {})",
            status.letter(),
            book.id,
            book.display_title(),
            book.display_author(),
            book.display_category(),
            book.purchase_price,
            book.purchase_date.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

fn status(desk: &Circulation<TextStorage>, id: BookId, json: bool) -> Result<()> {
    let status = desk.status(id)?;
    let ledger = desk.ledger();
    if json {
        return print_json(&serde_json::json!({
            "id": id,
            "status": status,
            "loaned_to": ledger.loan_holder(id),
            "reserved_by": ledger.reservation_holder(id),
        }));
    }

    println!("book {id}: {}", status.as_str());
    if let Some(member) = ledger.loan_holder(id) {
        println!("  on loan to member {member}");
    }
    if let Some(member) = ledger.reservation_holder(id) {
        println!("  reserved by member {member}");
    }
    Ok(())
}

fn circulate(data_dir: &Path, op: CirculationOp, books: Vec<BookId>, member: Option<MemberId>) -> Result<()> {
    let mut desk = open(data_dir)?;
    let request = CirculationRequest { op, books, member };

    let outcome = apply(&mut desk, &request, today());
    for entry in &outcome.entries {
        println!("{}", describe(desk.catalog(), entry));
    }
    outcome.error.map_or(Ok(()), Err)
}

fn stats(desk: &Circulation<TextStorage>, source: OrderSource, json: bool) -> Result<()> {
    let (authors, categories) = match source {
        OrderSource::Ledger => (
            insights::ledger_prevalence(desk.catalog(), desk.ledger().entries(), Dimension::Author),
            insights::ledger_prevalence(desk.catalog(), desk.ledger().entries(), Dimension::Category),
        ),
        OrderSource::Catalog => (
            insights::catalog_prevalence(desk.catalog(), Dimension::Author),
            insights::catalog_prevalence(desk.catalog(), Dimension::Category),
        ),
    };

    if json {
        return print_json(&serde_json::json!({ "authors": authors, "categories": categories }));
    }
    print_tallies("Authors", &authors);
    print_tallies("Categories", &categories);
    Ok(())
}

fn print_tallies(title: &str, tallies: &[Tally]) {
    println!("\n{title}");
    let width = tallies.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    for tally in tallies {
        println!("  {:<width$}  {:>3}  {}", tally.name, tally.count, "#".repeat(tally.count));
    }
}

/// Terminal size from `LINES`/`COLUMNS`, else 24 by 80.
fn terminal_size() -> (usize, usize) {
    let read = |name: &str, fallback: usize| {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(fallback)
    };
    (read("LINES", 24), read("COLUMNS", 80))
}

fn menu(config: &Config, data_dir: &Path) -> Result<()> {
    let (mut desk, mut state) = librarian::initialize(config, data_dir)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut redraw = true;

    loop {
        if redraw {
            draw(&mut stdout, &state)?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            tracing::debug!("stdin closed, leaving menu");
            return Ok(());
        }

        let event = parse_input(&line, &state);
        let (should_render, actions) = handle_event(&mut state, &event)?;
        redraw = should_render;

        for action in actions {
            match action {
                Action::Quit => return Ok(()),
                Action::Circulate(request) => {
                    let outcome = perform(&mut desk, &request, today());
                    handle_event(&mut state, &outcome)?;
                    redraw = true;
                }
            }
        }
    }
}

fn draw(out: &mut impl Write, state: &AppState) -> Result<()> {
    let (rows, cols) = terminal_size();
    write!(out, "\u{1b}[2J\u{1b}[H{}", render(state, rows, cols))?;
    Ok(())
}
