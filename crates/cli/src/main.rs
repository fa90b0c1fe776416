use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, UserId};
use engine::{FavoritesExtractor, Recommendation, Recommender};
use id_codec::IdCodec;
use mf_model::MfModel;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Cinematch - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Personalized movie recommendations from a trained matrix-factorization model", long_about = None)]
struct Cli {
    /// Path to the directory containing ratings.csv and movies.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the trained model artifact
    #[arg(short, long, default_value = "model/recommender.bin")]
    model_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        top_n: usize,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show a user's top-rated movies
    Favorites {
        /// User ID to display favorites for
        #[arg(long)]
        user_id: UserId,

        /// Number of favorites to return
        #[arg(long, default_value = "5")]
        top_n: usize,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show a user's rating history summary
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Show dataset summary statistics
    Stats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load everything up front; any failure here aborts the process
    // before a single request is served.
    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_files(&cli.data_dir).context("Failed to load dataset")?,
    );
    let codec = Arc::new(IdCodec::fit(dataset.ratings()));
    let model = Arc::new(
        MfModel::load(&cli.model_path, codec.num_users(), codec.num_movies())
            .context("Failed to load model artifact")?,
    );
    println!("{} Loaded dataset and model in {:?}", "✓".green(), start.elapsed());

    let recommender = Recommender::new(dataset.clone(), codec, model);
    let favorites = FavoritesExtractor::new(dataset.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            top_n,
            json,
        } => handle_recommend(&recommender, user_id, top_n, json)?,
        Commands::Favorites {
            user_id,
            top_n,
            json,
        } => handle_favorites(&favorites, user_id, top_n, json)?,
        Commands::User { user_id } => handle_user(&dataset, &favorites, user_id),
        Commands::Stats => handle_stats(&dataset),
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender,
    user_id: UserId,
    top_n: usize,
    json: bool,
) -> Result<()> {
    let start = Instant::now();
    let recommendations = recommender.recommend(user_id, top_n)?;
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!(
            "{}",
            "No recommendations available. User may be new or has rated everything known."
                .yellow()
        );
        return Ok(());
    }

    println!("{}", format!("Top picks for user {}:", user_id).bold().blue());
    print_recommendations(&recommendations);
    println!("\nGenerated in {:.3} seconds", elapsed.as_secs_f64());
    Ok(())
}

/// Handle the 'favorites' command
fn handle_favorites(
    favorites: &FavoritesExtractor,
    user_id: UserId,
    top_n: usize,
    json: bool,
) -> Result<()> {
    let favs = favorites.top_favorites(user_id, top_n);

    if json {
        println!("{}", serde_json::to_string_pretty(&favs)?);
        return Ok(());
    }

    if favs.is_empty() {
        println!("{}", "No ratings found for this user.".yellow());
        return Ok(());
    }

    println!("{}", format!("Favorites for user {}:", user_id).bold().blue());
    for (rank, fav) in favs.iter().enumerate() {
        println!(
            "{}. {} [{}] {} {}",
            (rank + 1).to_string().green(),
            fav.title,
            fav.primary_genre,
            "★".yellow(),
            fav.rating
        );
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(dataset: &Dataset, favorites: &FavoritesExtractor, user_id: UserId) {
    let ratings = dataset.ratings_for_user(user_id);

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    if ratings.is_empty() {
        println!("{}", "No ratings found for this user.".yellow());
        return;
    }

    let avg_rating: f32 = ratings.iter().map(|r| r.rating).sum::<f32>() / ratings.len() as f32;
    println!("{}Number of ratings: {}", "• ".cyan(), ratings.len());
    println!("{}Average rating: {:.2}", "• ".cyan(), avg_rating);

    println!("Top rated movies:");
    for fav in favorites.top_favorites(user_id, 5) {
        println!("  - {} (Rating: {})", fav.title, fav.rating);
    }
}

/// Handle the 'stats' command
fn handle_stats(dataset: &Dataset) {
    println!("{}", "Dataset statistics:".bold().blue());
    println!("{}Total users: {}", "• ".cyan(), dataset.user_count());
    println!("{}Total movies: {}", "• ".cyan(), dataset.movie_count());
    println!("{}Total ratings: {}", "• ".cyan(), dataset.rating_count());

    let user_ids = dataset.user_ids();
    if let (Some(first), Some(last)) = (user_ids.first(), user_ids.last()) {
        println!("{}User id range: {}..{}", "• ".cyan(), first, last);
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    for (rank, rec) in recommendations.iter().enumerate() {
        let match_pct = (rec.score * 100.0).round() as u32;
        let match_label = if rec.score > 0.7 {
            format!("Match: {}%", match_pct).green()
        } else {
            format!("Match: {}%", match_pct).yellow()
        };
        println!(
            "{}. {} [{}] - {}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.primary_genre,
            match_label
        );
    }
}
