//! CLI entry point for newtab-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newtab")]
#[command(version)]
#[command(about = "A personal new-tab landing page built from Markdown snippet cards", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site with a sample manifest
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new snippet card and add it to the manifest
    New {
        /// Card title
        title: String,

        /// Card width: auto, full, or any CSS width
        #[arg(short, long)]
        width: Option<String>,

        /// Create an HTML snippet instead of Markdown
        #[arg(long)]
        html: bool,
    },

    /// Generate the page
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// List manifest entries and their front matter
    List,

    /// Open a web search with the configured engine
    Search {
        /// Search terms
        #[arg(required = true)]
        terms: Vec<String>,

        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newtab_rs=debug,info"
    } else {
        "newtab_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            newtab_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized new tab site in {:?}", target_dir);
        }

        Commands::New { title, width, html } => {
            let app = newtab_rs::NewTab::new(&base_dir)?;
            let path =
                newtab_rs::commands::new::create_snippet(&app, &title, width.as_deref(), html)?;
            println!("Created {}", path.display());
        }

        Commands::Generate { watch } => {
            let app = newtab_rs::NewTab::new(&base_dir)?;
            tracing::info!("Generating page...");

            app.generate().await?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                newtab_rs::commands::generate::watch(&app).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let app = newtab_rs::NewTab::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating page...");
            app.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            newtab_rs::server::start(&app, &ip, port, !r#static, open).await?;
        }

        Commands::List => {
            let app = newtab_rs::NewTab::new(&base_dir)?;
            newtab_rs::commands::list::run(&app).await?;
        }

        Commands::Search { terms, print } => {
            let app = newtab_rs::NewTab::new(&base_dir)?;
            let url = newtab_rs::commands::search::run(&app, &terms, !print)?;
            println!("{}", url);
        }

        Commands::Clean => {
            let app = newtab_rs::NewTab::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("newtab-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
