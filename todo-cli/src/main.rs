use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;
use todo_cli::app::{App, Event};
use todo_cli::config::Config;
use todo_list::{FileStorage, ItemId, ListStore, Theme};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "A to-do list that remembers what you still have to do")]
struct Cli {
    /// Storage file to use instead of the configured one
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new todo
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark a todo as done, or as not done again
    Toggle { id: ItemId },
    /// Delete a todo
    Delete { id: ItemId },
    /// Show all todos
    List,
    /// Show, toggle or set the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Write the list as HTML
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Subcommand)]
enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = Config::load()?;
    if let Some(storage) = args.storage {
        config.storage_path = storage;
    }
    tracing_subscriber::fmt()
        .with_max_level(config.max_log_level())
        .with_writer(io::stderr)
        .init();
    let storage = FileStorage::new(&config.storage_path);
    info!("Using storage at {}", storage.path().display());

    let store = ListStore::new(storage);
    let mut app = App::new(store);

    let event = match args.command {
        Commands::Add { text } => Event::Add(text.join(" ")),
        Commands::Toggle { id } => Event::ToggleComplete(id),
        Commands::Delete { id } => Event::Delete(id),
        Commands::List => Event::Load,
        Commands::Theme { action: None } => {
            println!("Theme: {}", app.theme()?);
            return Ok(());
        }
        Commands::Theme {
            action: Some(action),
        } => match action {
            ThemeAction::Toggle => Event::ToggleTheme,
            ThemeAction::Light => Event::SetTheme(Theme::Light),
            ThemeAction::Dark => Event::SetTheme(Theme::Dark),
        },
        Commands::Export { output } => {
            let html = app.export_html()?;
            match output {
                Some(path) => {
                    fs::write(&path, html)?;
                    println!("Exported to {}", path.display());
                }
                None => print!("{}", html),
            }
            return Ok(());
        }
    };

    app.handle(event, &mut io::stdout().lock())
}
