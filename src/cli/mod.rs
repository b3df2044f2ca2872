//! Command-line interface for petflix.
//!
//! Provides commands for browsing and searching the catalog, managing
//! favorites, recording views, and inspecting view statistics. Every
//! command is a thin wrapper over one core operation; ledger failures are
//! fail-open by contract and never abort a command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::Catalog;
use crate::config;
use crate::domain::{CategoryFilter, VideoId, VideoRecord};
use crate::ledger::{FavoritesLedger, Persistence, ViewLedger};
use crate::query;
use crate::storage::FileStore;

/// petflix - Local-first pet video catalog
#[derive(Parser, Debug)]
#[command(name = "petflix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List videos in the catalog
    Videos {
        /// Filter by category ("all", "dogs", "cats", "birds", "hamsters", "rabbits")
        #[arg(short, long)]
        category: Option<String>,

        /// Only show featured videos
        #[arg(long)]
        featured: bool,

        /// Maximum number of videos to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search the catalog
    Search {
        /// Search query (matches title, description, and channel)
        query: String,
    },

    /// Show details of a video
    Show {
        /// Video ID
        video_id: String,
    },

    /// Record a view of a video, then show it
    Watch {
        /// Video ID
        video_id: String,
    },

    /// Manage favorites
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },

    /// Show view statistics
    Stats {
        /// Maximum number of most-viewed videos to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Add a video to favorites
    Add {
        /// Video ID
        video_id: String,
    },

    /// Remove a video from favorites
    Remove {
        /// Video ID
        video_id: String,
    },

    /// List favorited videos
    List,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Videos {
                category,
                featured,
                limit,
            } => list_videos(category, featured, limit).await,
            Commands::Search { query } => search_videos(&query).await,
            Commands::Show { video_id } => show_video(&video_id, false).await,
            Commands::Watch { video_id } => show_video(&video_id, true).await,
            Commands::Fav { command } => execute_fav(command).await,
            Commands::Stats { limit } => show_stats(limit).await,
            Commands::Config => show_config(),
        }
    }
}

/// Execute favorites subcommands
async fn execute_fav(command: FavCommands) -> Result<()> {
    match command {
        FavCommands::Add { video_id } => fav_add(&video_id),
        FavCommands::Remove { video_id } => fav_remove(&video_id),
        FavCommands::List => fav_list().await,
    }
}

/// The favorites ledger over the profile directory
fn favorites() -> Result<FavoritesLedger<FileStore>> {
    Ok(FavoritesLedger::new(FileStore::new(config::petflix_home()?)))
}

/// The view ledger over the profile directory
fn views() -> Result<ViewLedger<FileStore>> {
    Ok(ViewLedger::new(FileStore::new(config::petflix_home()?)))
}

/// Warn on stderr when a mutation did not land cleanly
fn report_persistence(outcome: Persistence) {
    match outcome {
        Persistence::Saved => {}
        Persistence::RecoveredEmpty => {
            eprintln!("⚠️  Existing data was unreadable and has been reset")
        }
        Persistence::WriteDropped => eprintln!("⚠️  Change could not be persisted"),
    }
}

fn print_video_table(videos: &[&VideoRecord]) {
    println!("{:<6} {:<10} {:<8} {:<44}", "ID", "CATEGORY", "LENGTH", "TITLE");
    println!("{}", "-".repeat(70));

    for video in videos {
        let title_truncated = if video.title.len() > 41 {
            format!("{}...", &video.title[..41])
        } else {
            video.title.clone()
        };
        println!(
            "{:<6} {:<10} {:<8} {:<44}",
            video.id, video.category, video.duration, title_truncated
        );
    }
}

/// List catalog videos, optionally filtered
async fn list_videos(category: Option<String>, featured: bool, limit: usize) -> Result<()> {
    let catalog = Catalog::load().await?;

    let filter = match category {
        Some(raw) => raw.parse::<CategoryFilter>().with_context(|| {
            let options: Vec<String> = CategoryFilter::options()
                .iter()
                .map(|f| f.to_string())
                .collect();
            format!("Invalid category '{}'. Expected one of: {}", raw, options.join(", "))
        })?,
        None => CategoryFilter::All,
    };

    let mut videos = catalog.filter_by_category(filter);
    if featured {
        videos.retain(|v| v.featured);
    }
    videos.truncate(limit);

    if videos.is_empty() {
        println!("No videos match");
        return Ok(());
    }

    print_video_table(&videos);
    println!("\nTotal: {} of {} videos", videos.len(), catalog.len());

    Ok(())
}

/// Search the catalog
async fn search_videos(query: &str) -> Result<()> {
    let catalog = Catalog::load().await?;

    let results = catalog.search(query);

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    print_video_table(&results);

    Ok(())
}

/// Show one video, optionally recording a view first
async fn show_video(video_id: &str, record_view: bool) -> Result<()> {
    let catalog = Catalog::load().await?;
    let id = VideoId::new(video_id);

    let video = catalog
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Video not found: {}", video_id))?;

    let views = views()?;
    if record_view {
        report_persistence(views.record_view(&id));
    }

    let favorites = favorites()?;
    let stats = views.snapshot();
    let tracked = stats.get(&id);

    println!("Title:       {}", video.title);
    println!("Channel:     {}", video.channel);
    println!("Category:    {}", video.category);
    println!("Duration:    {}", video.duration);
    println!("Uploaded:    {}", video.upload_time);
    println!("Views:       {}", video.views);
    println!("Favorite:    {}", if favorites.is_favorite(&id) { "yes" } else { "no" });
    println!(
        "Watched:     {} time(s)",
        tracked.map(|s| s.view_count).unwrap_or(0)
    );
    if let Some(stats) = tracked {
        println!("Last viewed: {}", stats.last_viewed.to_rfc3339());
    }
    println!("Download:    {}", video.download_link());
    println!("\n{}", video.description);

    Ok(())
}

/// Add a video to favorites
fn fav_add(video_id: &str) -> Result<()> {
    let ledger = favorites()?;
    report_persistence(ledger.add(&VideoId::new(video_id)));
    eprintln!("✅ Added to favorites: {}", video_id);
    Ok(())
}

/// Remove a video from favorites
fn fav_remove(video_id: &str) -> Result<()> {
    let ledger = favorites()?;
    report_persistence(ledger.remove(&VideoId::new(video_id)));
    eprintln!("✅ Removed from favorites: {}", video_id);
    Ok(())
}

/// List favorited videos
async fn fav_list() -> Result<()> {
    let catalog = Catalog::load().await?;
    let ledger = favorites()?;

    let favorites = ledger.all();
    if favorites.is_empty() {
        println!("No favorites yet. Use 'petflix fav add <id>'.");
        return Ok(());
    }

    println!("{:<6} {:<44}", "ID", "TITLE");
    println!("{}", "-".repeat(50));

    for id in &favorites {
        let title = catalog
            .get(id)
            .map(|v| v.title.as_str())
            .unwrap_or("(not in catalog)");
        println!("{:<6} {:<44}", id, title);
    }

    println!("\nTotal: {} favorite(s)", favorites.len());

    Ok(())
}

/// Show view statistics and the most-viewed table
async fn show_stats(limit: usize) -> Result<()> {
    let catalog = Catalog::load().await?;
    let views = views()?;

    let summary = query::summary(&views);
    println!("Total views:    {}", summary.total_views);
    println!("Videos watched: {}", summary.videos_watched);

    let ranked = query::most_viewed(&catalog, &views, limit);
    let viewed: Vec<_> = ranked.iter().filter(|r| r.view_count > 0).collect();

    if viewed.is_empty() {
        println!("\nNo views recorded yet. Use 'petflix watch <id>'.");
        return Ok(());
    }

    println!("\n{:<6} {:<6} {:<44}", "VIEWS", "ID", "TITLE");
    println!("{}", "-".repeat(56));

    for entry in viewed {
        println!(
            "{:<6} {:<6} {:<44}",
            entry.view_count, entry.video.id, entry.video.title
        );
    }

    Ok(())
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Profile dir: {}", config.home.display());
    match &config.catalog {
        Some(path) => println!("Catalog:     {}", path.display()),
        None => println!("Catalog:     (bundled)"),
    }
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none found)"),
    }

    Ok(())
}
