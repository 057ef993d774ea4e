use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use caliguess::{
    dataset,
    guess::Hint,
    session::{Guess, SubmitOutcome},
    web::{self, WebServerConfig},
    GameSession,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "California city guessing game")]
struct Cli {
    /// Path to the city dataset CSV
    #[arg(long, default_value = "data/california_cities.csv")]
    data: PathBuf,

    /// Seed for answer selection (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Serve the browser UI instead of playing in the terminal
    #[arg(long)]
    serve: bool,

    /// Bind address for the browser UI
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the browser UI
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = dataset::load_catalog(&cli.data)?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    if cli.serve {
        let config = WebServerConfig {
            catalog,
            seed,
            host: cli.host,
            port: cli.port,
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        return runtime.block_on(web::run(config));
    }

    play_terminal(GameSession::new(catalog, seed))
}

fn play_terminal(mut session: GameSession) -> Result<()> {
    println!(
        "Guess the secret California city ({} candidates).",
        session.catalog().len()
    );
    println!("Type a city name, 'new' for a fresh round, 'reveal' to peek, or 'quit' to leave.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "quit" | "exit" => break,
            "new" => {
                session.start_new_round();
                println!("New round started.");
                continue;
            }
            "reveal" => {
                println!("The answer is {}.", session.answer().name);
                continue;
            }
            _ => {}
        }

        match session.submit_guess(input) {
            Err(_) => println!("Round is over. Type 'new' to start another."),
            Ok(SubmitOutcome::Duplicate { name }) => {
                println!("You already guessed {name}. Try a different one!");
            }
            Ok(SubmitOutcome::UnknownCity { .. }) => {
                println!("Not a California City! Try again");
            }
            Ok(SubmitOutcome::Continue { .. }) => {
                if let Some(guess) = session.history().last() {
                    print_guess(guess);
                }
                println!("Try again!");
            }
            Ok(SubmitOutcome::Win { guess_count, .. }) => {
                if let Some(guess) = session.history().last() {
                    print_guess(guess);
                }
                let seconds = (Utc::now() - session.round_started()).num_seconds();
                println!("YAY! You guessed it in {guess_count} tries ({seconds}s).");
                println!("Type 'new' to play again.");
            }
        }
    }

    Ok(())
}

fn print_guess(guess: &Guess) {
    println!("City: {}", guess.city_name);
    println!(
        "Population: {}{}",
        format_count(guess.record.population_total),
        hint_suffix(guess.comparison.population)
    );
    println!(
        "Square Miles: {}{}",
        format_quantity(guess.record.area_total_sq_mi),
        hint_suffix(guess.comparison.area)
    );
    // The winning guess keeps its heading to itself.
    if !guess.comparison.is_correct {
        match (guess.comparison.distance_miles, guess.comparison.direction) {
            (Some(distance), Some(direction)) => println!(
                "You should head: {distance:.2} Miles {direction} {}",
                direction.arrow()
            ),
            _ => println!("You should head: unknown"),
        }
    }
}

fn hint_suffix(hint: Hint) -> &'static str {
    match hint {
        Hint::Higher => " ⬆ (Higher)",
        Hint::Lower => " ⬇ (Lower)",
        Hint::Equal => "",
        Hint::Unknown => " (unknown)",
    }
}

fn format_count(value: Option<u64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

fn format_quantity(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}
