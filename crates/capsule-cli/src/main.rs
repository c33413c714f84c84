//! Capsule CLI
//!
//! Operator commands over the capsule service and its SQLite store

use clap::{Parser, Subcommand};

mod commands;

use commands::context::{Context, GlobalArgs};
use commands::{mutate, read};

#[derive(Debug, Parser)]
#[command(name = "capsule")]
#[command(about = "Capsule - short educational content backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a capsule from a JSON input; prints the new id
    Create(mutate::JsonArgs),
    /// Update a capsule's descriptive fields from a JSON input
    Update(mutate::JsonArgs),
    /// Disable a capsule
    Disable(mutate::IdArgs),
    /// Approve a submitted capsule
    Approve(mutate::IdArgs),
    /// Record a view
    View(mutate::IdArgs),
    /// Record a bookmark
    Bookmark(mutate::IdArgs),
    /// Record a recommendation
    Recommend(mutate::IdArgs),
    /// Print one capsule
    Get(mutate::IdArgs),
    /// Print every capsule (summary fields only)
    List,
    /// Print the number of capsules
    Count,
    /// Print active capsules for one or more topics
    Feed(read::FeedArgs),
    /// Print active capsules for one topic
    Topic(read::TopicArgs),
    /// Print capsules awaiting approval
    Pending,
    /// Print the metadata catalogs
    Metadata,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open(&cli.global)?;

    match cli.command {
        Commands::Create(args) => mutate::create(&ctx, args),
        Commands::Update(args) => mutate::update(&ctx, args),
        Commands::Disable(args) => mutate::disable(&ctx, args),
        Commands::Approve(args) => mutate::approve(&ctx, args),
        Commands::View(args) => mutate::view(&ctx, args),
        Commands::Bookmark(args) => mutate::bookmark(&ctx, args),
        Commands::Recommend(args) => mutate::recommend(&ctx, args),
        Commands::Get(args) => read::get(&ctx, args),
        Commands::List => read::list(&ctx),
        Commands::Count => read::count(&ctx),
        Commands::Feed(args) => read::feed(&ctx, args),
        Commands::Topic(args) => read::topic(&ctx, args),
        Commands::Pending => read::pending(&ctx),
        Commands::Metadata => read::metadata(&ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
