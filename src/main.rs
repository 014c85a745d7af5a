use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use shoplist::config::{Backend, Config};
use shoplist::expiry::{Expiry, ExpiryLevel, format_date};
use shoplist::{Item, ItemForm, ItemId, ItemStore, PRESET_CATEGORIES, Storage, Submitted, UNCATEGORIZED};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Shopping list with categories and expiration dates")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/shoplist/config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the list data
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, value_enum, global = true)]
    backend: Option<Backend>,

    /// Name of the slot the list is saved under
    #[arg(long, global = true)]
    slot: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item
    Add {
        name: String,

        #[arg(short, long, help = category_help())]
        category: Option<String>,

        /// Expiration date, YYYY-MM-DD
        #[arg(short, long)]
        expires: Option<String>,
    },

    /// Edit an item; omitted fields keep their current value, "" clears them
    Edit {
        id: ItemId,

        /// New name
        name: Option<String>,

        #[arg(short, long, help = category_help())]
        category: Option<String>,

        /// Expiration date, YYYY-MM-DD
        #[arg(short, long)]
        expires: Option<String>,
    },

    /// Delete an item
    Rm { id: ItemId },

    /// Check or uncheck an item
    Toggle { id: ItemId },

    /// Show the list
    List {
        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the suggested categories and the ones in use
    Categories,

    /// Remove all checked items
    ClearChecked {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove every item
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn category_help() -> String {
    format!(
        "Category, e.g. {} (default: {})",
        PRESET_CATEGORIES.join(", "),
        UNCATEGORIZED
    )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("shoplist=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shoplist=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(slot) = cli.slot {
        config.slot = slot;
    }

    let storage = config.open_storage()?;
    let mut store = ItemStore::open_slot(storage, config.slot.clone());

    match cli.command {
        Commands::Add {
            name,
            category,
            expires,
        } => {
            let mut form = ItemForm::new();
            form.name = name;
            form.category = category.unwrap_or_default();
            form.expiration = expires.unwrap_or_default();
            submit(&mut form, &mut store)?;
        }
        Commands::Edit {
            id,
            name,
            category,
            expires,
        } => {
            let item = store.get(id).ok_or_else(|| eyre!("No item with id {}", id))?;
            let mut form = ItemForm::new();
            form.begin_edit(item);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(expires) = expires {
                form.expiration = expires;
            }
            submit(&mut form, &mut store)?;
        }
        Commands::Rm { id } => {
            if store.delete(id) {
                println!("Deleted {}", id);
            } else {
                println!("No item with id {}", id);
            }
        }
        Commands::Toggle { id } => match store.toggle_checked(id) {
            Some(true) => println!("Checked {}", id),
            Some(false) => println!("Unchecked {}", id),
            None => println!("No item with id {}", id),
        },
        Commands::List { search } => {
            print_list(&store, search.as_deref().unwrap_or(""));
        }
        Commands::Categories => {
            println!("Suggested: {}", PRESET_CATEGORIES.join(", "));
            let in_use = store.categories();
            if !in_use.is_empty() {
                println!("In use:    {}", in_use.join(", "));
            }
        }
        Commands::ClearChecked { yes } => {
            if yes || confirm("Remove all checked items?")? {
                let removed = store.clear_checked();
                println!("Removed {} checked item(s)", removed);
            }
        }
        Commands::Clear { yes } => {
            if yes || confirm("Clear the whole list?")? {
                let removed = store.clear_all();
                println!("Removed {} item(s)", removed);
            }
        }
    }

    if let Some(err) = store.last_persist_error() {
        eprintln!("{} changes were not saved: {}", "warning:".yellow().bold(), err);
    }

    Ok(())
}

fn submit<S: Storage>(form: &mut ItemForm, store: &mut ItemStore<S>) -> Result<()> {
    match form.submit(store) {
        Some(Submitted::Added(id)) => println!("Added {}", id),
        Some(Submitted::Updated(id)) => println!("Updated {}", id),
        Some(Submitted::Vanished(id)) => println!("No item with id {}", id),
        None => {
            let message = form.error().unwrap_or("invalid input").to_string();
            return Err(eyre!(message));
        }
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_list<S: Storage>(store: &ItemStore<S>, query: &str) {
    let items = store.search(query);

    if items.is_empty() {
        if store.is_empty() {
            println!("{}", "No items in the list. Add one with `shoplist add <name>`.".dimmed());
        } else {
            println!("{}", format!("No items match {:?}.", query).dimmed());
        }
        return;
    }

    let now = Utc::now();
    for item in items {
        println!("{}", render_item(item, now));
    }

    let counts = store.counts();
    println!(
        "{}",
        format!("{} item(s), {} checked", counts.total, counts.checked).dimmed()
    );
}

fn render_item(item: &Item, now: chrono::DateTime<Utc>) -> String {
    let mark = if item.checked { "[x]".green() } else { "[ ]".normal() };
    let name = if item.checked {
        item.name.strikethrough().dimmed()
    } else {
        item.name.bold()
    };

    let mut line = format!(
        "{} {} {}  {}",
        mark,
        item.id.to_string().dimmed(),
        name,
        item.category.cyan()
    );

    if let Some(date) = item.expiration_date {
        let info = format!("{} ({})", format_date(date), Expiry::of(Some(date), now));
        let info = match ExpiryLevel::of(Some(date), now) {
            ExpiryLevel::Expired => info.red(),
            ExpiryLevel::Soon => info.yellow(),
            ExpiryLevel::Fresh => info.green(),
            ExpiryLevel::None => info.normal(),
        };
        line.push_str(&format!("  {}", info));
    }

    line
}
