use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading dataset...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(data_dir).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", dataset.user_count());
    println!("Movies: {}", dataset.movie_count());
    println!("Ratings: {}", dataset.rating_count());
    println!(
        "\nPerformance: {:.0} ratings/second",
        dataset.rating_count() as f64 / elapsed.as_secs_f64()
    );
}
