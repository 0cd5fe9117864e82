//! Passforge - password generation and crack-time estimation
//!
//! A CLI toolkit that assembles passwords from word and character pools
//! (system dictionaries, scraped song lyrics, plain alphabets) and classifies
//! password strength from zxcvbn crack-time estimates, including a
//! speculative quantum-adjusted estimate.

pub mod assemble;
pub mod corpus;
pub mod error;
pub mod generate;
pub mod pool;
pub mod scrape;
pub mod strength;
pub mod types;

// Re-export commonly used types
pub use error::{PassForgeError, Result};
pub use types::{
    AcceptancePolicy, GeneratedPassword, GenerationPolicy, ScrapeConfig, SelectionPolicy,
    SourceConfig, StrengthResult, SuffixClass, Tier,
};

// Re-export main functionality
pub use assemble::PasswordAssembler;
pub use corpus::LyricsCorpus;
pub use generate::PasswordGenerator;
pub use pool::TokenPool;
pub use scrape::LyricsScraper;
pub use strength::StrengthClassifier;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
