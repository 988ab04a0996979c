//! # Tagpress Bot Entry Point
//!
//! Thin binary wrapper; all logic lives in the library crate.

#[tokio::main]
async fn main() {
    if let Err(err) = tagpress_bot::run().await {
        eprintln!("tagpress-bot failed: {err}");
        std::process::exit(1);
    }
}
