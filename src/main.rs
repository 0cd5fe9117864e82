//! Passforge - password generation and crack-time estimation
//!
//! Four flows behind one binary: check a password's crack time (classical and
//! quantum-adjusted), generate from a dictionary, generate from song lyrics
//! (scraped or from a CSV), or generate a plain random character password.

use indicatif::{ProgressBar, ProgressStyle};
use passforge::{
    generate::PasswordGenerator,
    pool::{TokenPool, ASCII_LETTERS, DIGITS, PUNCTUATION},
    scrape::LyricsScraper,
    strength::{format_duration, StrengthClassifier, DEFAULT_QUANTUM_EXPONENT},
    types::{
        AcceptancePolicy, GeneratedPassword, GenerationPolicy, SelectionPolicy, SourceConfig,
    },
    LyricsCorpus, PassForgeError, PasswordAssembler, Result,
};
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = passforge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    if command == "--help" || command == "-h" || command == "help" {
        print_help();
        return Ok(());
    }

    let result = match command {
        "check" => run_check(&args[2..]),
        "generate" => run_generate(&args[2..]),
        "lyrics" => run_lyrics(&args[2..]).await,
        "random" => run_random(&args[2..]),
        other => Err(PassForgeError::cli(format!("unknown command '{}'", other))),
    };

    if let Err(e) = result {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    Ok(())
}

/// Evaluate a password: crack time, tier, quantum-adjusted estimate
fn run_check(args: &[String]) -> Result<()> {
    let password = match args.first() {
        Some(p) => p.clone(),
        None => inquire::Password::new("Enter your password:")
            .without_confirmation()
            .prompt()
            .map_err(|e| PassForgeError::cli(e.to_string()))?,
    };

    if password.is_empty() {
        return Err(PassForgeError::validation("please enter a password"));
    }

    let classifier = StrengthClassifier::new();
    let result = classifier.classify_with_quantum(&password, DEFAULT_QUANTUM_EXPONENT)?;

    println!("🔐 Passforge - password strength check");
    println!("═══════════════════════════════════════");
    println!();
    println!("Estimated time to crack: {}", result.duration_text);
    println!(
        "Estimated classical time to crack: {}",
        format_duration(result.crack_seconds)
    );
    if let Some(quantum) = result.quantum_crack_seconds {
        println!(
            "Estimated quantum time to crack (2^{} speedup): {}",
            DEFAULT_QUANTUM_EXPONENT,
            format_duration(quantum)
        );
    }
    println!();
    println!(
        "Password strength: {} of 5 ({})",
        result.tier.as_u8(),
        result.tier
    );
    println!("{}", result.tier.verdict());

    Ok(())
}

/// Dictionary-based generation (DictionarySafe flow)
fn run_generate(args: &[String]) -> Result<()> {
    let dictionary = flag_value(args, "--dictionary")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SourceConfig::default().dictionary_path));
    let low_entropy = has_flag(args, "--low-entropy");
    let seed = match flag_value(args, "--seed") {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            PassForgeError::validation(format!("seed must be an integer, got '{}'", raw))
        })?),
        None => None,
    };

    if seed.is_some() && !low_entropy {
        return Err(PassForgeError::cli("--seed requires --low-entropy"));
    }

    let selection = if low_entropy {
        println!("⚠️  Using the deterministic low-entropy selection policy.");
        println!("    This is NOT cryptographically secure; prefer the default policy.");
        SelectionPolicy::LowEntropy { seed }
    } else {
        SelectionPolicy::Secure
    };

    let words = TokenPool::from_file("dictionary", &dictionary)?;
    let generator = PasswordGenerator::new(
        PasswordAssembler::new(GenerationPolicy::default()),
        StrengthClassifier::new(),
        AcceptancePolicy::Any,
    );

    let generated = generator.generate(&words, &selection)?;
    print_generated("🔑 Dictionary password", &generated);
    Ok(())
}

/// Lyrics-based generation, optionally scraping first (LyricSafe flow)
async fn run_lyrics(args: &[String]) -> Result<()> {
    let url = flag_value(args, "--url");
    let csv = flag_value(args, "--csv").map(PathBuf::from);
    let out_dir = flag_value(args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let csv_path = match (url, csv) {
        (Some(url), _) => {
            let spinner = spinner("Scraping lyrics...");
            let scraper = LyricsScraper::new();
            let outcome = scraper.scrape_to_csv(&url, &out_dir).await;
            spinner.finish_and_clear();
            let outcome = outcome?;
            println!(
                "📄 Scraped {} song(s) into {}",
                outcome.rows,
                outcome.csv_path.display()
            );
            outcome.csv_path
        }
        (None, Some(path)) => path,
        (None, None) => {
            return Err(PassForgeError::cli("provide --url or --csv"));
        }
    };

    let corpus = LyricsCorpus::from_csv(&csv_path)?;
    if corpus.is_empty() {
        return Err(PassForgeError::validation(format!(
            "corpus {} has no rows",
            csv_path.display()
        )));
    }

    // Advisory gate: warn when the corpus shares no words with the system
    // dictionary, or when the dictionary itself is unavailable.
    match TokenPool::from_file("dictionary", Path::new(&SourceConfig::default().dictionary_path)) {
        Ok(dictionary) => {
            if !corpus.has_readable_words(&dictionary) {
                println!("⚠️  The corpus doesn't contain any human-readable content.");
            }
        }
        Err(e) => {
            println!("⚠️  Skipping readability check: {}", e);
        }
    }

    let words = corpus.word_pool();
    // Accept/reject gate on the raw engine score, not the display tier.
    let generator = PasswordGenerator::new(
        PasswordAssembler::new(GenerationPolicy::default()),
        StrengthClassifier::new(),
        AcceptancePolicy::MinimumScore(4),
    );

    let spin = spinner("Generating until the candidate scores 4/4...");
    let generated = generator.generate(&words, &SelectionPolicy::Secure);
    spin.finish_and_clear();

    let generated = generated?;
    print_generated("🎵 Lyrics password", &generated);
    Ok(())
}

/// Plain random character password (SecurePasswordGen flow)
fn run_random(args: &[String]) -> Result<()> {
    let length = match flag_value(args, "--length") {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            PassForgeError::validation(format!("length must be a positive integer, got '{}'", raw))
        })?,
        None => 15,
    };
    if length == 0 {
        return Err(PassForgeError::validation("length must be at least 1"));
    }

    let alphabet: String = format!("{}{}{}", ASCII_LETTERS, DIGITS, PUNCTUATION);
    let pool = TokenPool::from_chars("characters", &alphabet);

    let policy = GenerationPolicy {
        word_count: 0,
        min_length: 0,
        max_length: length,
        required_suffixes: vec![],
    };
    let assembler = PasswordAssembler::new(policy);
    let sources = [passforge::assemble::TokenSource {
        pool: &pool,
        selection: SelectionPolicy::Secure,
        count: length,
        kind: passforge::assemble::TokenKind::Character,
    }];
    let password = assembler.assemble_from_sources(&sources)?;

    let classifier = StrengthClassifier::new();
    let strength = classifier.classify(&password)?;

    println!("🔑 Your new random password has been generated:");
    println!("   {}", password);
    println!(
        "   Strength: {} of 5 ({}), cracks in {}",
        strength.tier.as_u8(),
        strength.tier,
        strength.duration_text
    );
    println!("   Date and time: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

fn print_generated(label: &str, generated: &GeneratedPassword) {
    println!("{}: {}", label, generated.password);
    println!(
        "   Strength: {} of 5 ({}), cracks in {}",
        generated.strength.tier.as_u8(),
        generated.strength.tier,
        generated.strength.duration_text
    );
    println!(
        "   Engine score: {}/4, attempts: {}",
        generated.strength.score, generated.attempts
    );
    println!(
        "   Generated at: {}",
        generated.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Value following a `--flag`, if present
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Print help information
fn print_help() {
    println!("🔐 Passforge - password generation and crack-time estimation");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    passforge <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    check [PASSWORD]      Estimate crack time (classical and quantum)");
    println!("    generate              Build a password from a word dictionary");
    println!("    lyrics                Build a password from song lyrics");
    println!("    random                Plain random character password");
    println!();
    println!("OPTIONS:");
    println!("    generate:");
    println!("        --dictionary PATH   Word list (default: /usr/share/dict/words)");
    println!("        --low-entropy       Use the deterministic Fibonacci policy (weak!)");
    println!("        --seed N            Seed for --low-entropy (default: current time)");
    println!("    lyrics:");
    println!("        --url URL           Scrape lyrics from this page first");
    println!("        --csv PATH          Use an existing corpus CSV");
    println!("        --out DIR           Where scraped CSVs are written (default: .)");
    println!("    random:");
    println!("        --length N          Password length (default: 15)");
    println!();
    println!("EXAMPLES:");
    println!("    passforge check 'hunter2'");
    println!("    passforge generate --dictionary /usr/share/dict/words");
    println!("    passforge lyrics --url https://genius.com/albums/some/album");
    println!("    passforge random --length 20");
}
