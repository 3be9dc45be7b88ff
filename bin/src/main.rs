use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use wordle_entropy::details::WORD_LENGTH;
use wordle_entropy::*;

/// Suggests Wordle guesses by how much information their feedback is expected to reveal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[arg(short = 'f', long)]
    words_file: PathBuf,

    /// Path to a JSON object mapping words to how common they are.
    #[arg(long)]
    frequencies_file: Option<PathBuf>,

    /// Path to a cached ranking of first guesses. It is read if it exists and matches the words
    /// file, and written by the `precompute` command.
    #[arg(long)]
    starting_table: Option<PathBuf>,

    /// How many suggestions to show.
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// How many guesses a game allows.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// How to group the possible words by the feedback a guess could get.
    #[arg(long, value_enum, default_value_t = Strategy::Feedback)]
    strategy: Strategy,

    /// How much word frequency counts in the suggestions, from 0 (entropy only) to 1 (frequency
    /// only). Needs `--frequencies-file`.
    #[arg(long, default_value_t = 0.0)]
    frequency_weight: f64,

    /// Number of threads to rank guesses with. Defaults to one per CPU.
    #[arg(long)]
    threads: Option<usize>,

    /// Milliseconds to pause between prompts in the interactive game.
    #[arg(long, default_value_t = 0)]
    pause_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game interactively, entering the feedback for each guess. This is the default.
    Interactive,
    /// Rank every first guess and save the ranking to the `--starting-table` path.
    Precompute,
    /// Let the solver play a single game against the given word, or a random one.
    Single { word: Option<String> },
    /// Let the solver play against every word in the words file.
    Benchmark,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Feedback,
    LabelEnumeration,
}

impl From<Strategy> for PartitionStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Feedback => PartitionStrategy::Feedback,
            Strategy::LabelEnumeration => PartitionStrategy::LabelEnumeration,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    println!("File: {}", args.words_file.display());
    let lexicon = load_lexicon(&args.words_file)?;
    println!("There are {} possible words.", lexicon.len());

    let frequencies = match &args.frequencies_file {
        Some(path) => Some(load_frequencies(path, &lexicon)?),
        None => None,
    };

    match &args.command {
        None | Some(Command::Interactive) => {
            play_interactive_game(&args, lexicon, frequencies.as_ref())?
        }
        Some(Command::Precompute) => precompute(&args, &lexicon)?,
        Some(Command::Single { word }) => play_single_game(&args, word.as_deref(), lexicon)?,
        Some(Command::Benchmark) => run_benchmark(&args, lexicon)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let lexicon = Lexicon::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read words from {}", path.display()))?;
    if lexicon.is_empty() {
        bail!("{} contains no words", path.display());
    }
    Ok(lexicon)
}

fn load_frequencies(path: &Path, lexicon: &Lexicon) -> Result<FrequencyTable> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let weights: HashMap<String, f64> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse frequencies from {}", path.display()))?;
    let num_entries = weights.len();
    // Entries that aren't valid words can't be in the lexicon anyway.
    let frequencies = FrequencyTable::from_iterator(
        weights
            .into_iter()
            .filter(|(word, _)| word.trim().parse::<Word>().is_ok()),
    )?
    .restricted_to(lexicon);
    debug!(
        "kept {} of {} word frequencies",
        frequencies.len(),
        num_entries
    );
    Ok(frequencies)
}

/// Loads the cached starting table if there is a matching one, or else ranks the first guesses.
fn load_starting_table(args: &Args, lexicon: &Lexicon) -> Result<StartingTable> {
    let strategy = PartitionStrategy::from(args.strategy);
    if let Some(path) = &args.starting_table {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let starting_table: StartingTable = ron::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            if starting_table.matches(lexicon, strategy) {
                info!("using starting table from {}", path.display());
                return Ok(starting_table);
            }
            warn!(
                "{} was computed for other words or another strategy, recomputing",
                path.display()
            );
        }
    }
    compute_starting_table(lexicon, strategy)
}

fn compute_starting_table(lexicon: &Lexicon, strategy: PartitionStrategy) -> Result<StartingTable> {
    let progress = ProgressBar::new(lexicon.len() as u64).with_style(
        ProgressStyle::default_bar()
            .template("Ranking first guesses: [{elapsed} / {duration}] {wide_bar} {pos}/{len}")?,
    );
    let table =
        RankingTable::build_with_progress(lexicon, lexicon, strategy, || progress.inc(1))?;
    progress.finish_and_clear();
    Ok(StartingTable::from_table(lexicon, strategy, table))
}

fn new_solver(args: &Args, lexicon: Lexicon) -> Result<Solver> {
    let solver = Solver::new(lexicon)
        .with_strategy(args.strategy.into())
        .with_max_turns(args.max_turns);
    // A single word has nothing to rank.
    if solver.all_words().len() < 2 {
        return Ok(solver);
    }
    let starting_table = load_starting_table(args, solver.all_words())?;
    Ok(solver.with_starting_table(starting_table))
}

fn precompute(args: &Args, lexicon: &Lexicon) -> Result<()> {
    let path = args
        .starting_table
        .as_ref()
        .context("precompute needs a --starting-table path to write to")?;
    let starting_table = compute_starting_table(lexicon, args.strategy.into())?;
    let serialized = ron::ser::to_string_pretty(&starting_table, ron::ser::PrettyConfig::default())?;
    fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Wrote the ranking of {} first guesses to {}.",
        starting_table.table().len(),
        path.display()
    );
    Ok(())
}

fn run_benchmark(args: &Args, lexicon: Lexicon) -> Result<()> {
    let solver = new_solver(args, lexicon.clone())?;
    // Guessing only possible words removes at least one word per turn, so this always succeeds.
    let max_num_guesses = lexicon.len() as u32;
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let progress = ProgressBar::new(lexicon.len() as u64).with_style(
        ProgressStyle::default_bar().template("Playing: [{elapsed} / {duration}] {wide_bar} {pos}/{len}")?,
    );
    for word in lexicon.iter().progress_with(progress) {
        let solver = solver.clone().with_max_turns(max_num_guesses);
        match play_game_with_guesser(word, max_num_guesses, solver) {
            GameResult::Success(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            result => bail!("failed to solve {}: {:?}", word, result),
        }
    }
    println!("Solved {} words. Results:", lexicon.len());

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!("|{}|{}|", num_round, num_games_per_round[num_round]);
    }

    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
    let num_over_budget = num_guesses_per_game
        .iter()
        .filter(|num_guesses| **num_guesses > args.max_turns)
        .count();
    println!(
        "**Games needing more than {} guesses:** {}",
        args.max_turns, num_over_budget
    );
    Ok(())
}

fn play_single_game(args: &Args, word: Option<&str>, lexicon: Lexicon) -> Result<()> {
    let secret: Word = match word {
        Some(word) => word.parse()?,
        None => *lexicon
            .choose(&mut rand::thread_rng())
            .context("there are no words to choose from")?,
    };
    println!("Playing against \"{}\".", secret);
    let solver = new_solver(args, lexicon)?;
    match play_game_with_guesser(&secret, args.max_turns, solver) {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::UnknownWord => bail!("\"{}\" is not in the word list", secret),
        GameResult::GuesserError(err) => return Err(err).context("the solver gave up"),
    }
    Ok(())
}

fn play_interactive_game(
    args: &Args,
    lexicon: Lexicon,
    frequencies: Option<&FrequencyTable>,
) -> Result<()> {
    let mut solver = new_solver(args, lexicon)?;

    println!("Let's play Wordle!");
    pause(args);
    println!("Here are the best {} words to start with:", args.top);
    print_suggestions(&suggestions(args, &solver, frequencies)?);
    pause(args);

    loop {
        let guess = prompt_guess(args, &solver)?;
        pause(args);
        let pattern = prompt_feedback(args, &guess)?;

        let outcome = match solver.play_turn(&guess, &pattern) {
            Ok(outcome) => outcome,
            Err(WordleError::EmptyLexicon) => {
                println!(
                    "There are no words matching your criteria. Please verify your input and \
                     try again next time."
                );
                break;
            }
            Err(err) => return Err(err.into()),
        };
        match outcome {
            TurnOutcome::Solved { turns } => {
                println!("Well done, you finished the game in {} moves!", turns);
            }
            TurnOutcome::OutOfTurns => {
                println!("The number of turns has been exceeded. Try again next time.");
            }
            TurnOutcome::Determined(word) => {
                println!("Well done! You cut the dataset to 1 possible word(s)!");
                pause(args);
                println!("The word must be \"{}\".", word);
            }
            TurnOutcome::Narrowed { remaining } => {
                println!(
                    "Well done! You cut the dataset to {} possible word(s)!",
                    remaining
                );
                pause(args);
                println!("Please wait...");
                let suggestions = suggestions(args, &solver, frequencies)?;
                println!("Your new best choices are:");
                print_suggestions(&suggestions);
            }
        }
        if outcome.is_final() {
            break;
        }
        println!("You have {} turn(s) left.", solver.turns_remaining());
    }

    Ok(())
}

/// The best guesses for the current turn, blended with word frequency if requested.
fn suggestions(
    args: &Args,
    solver: &Solver,
    frequencies: Option<&FrequencyTable>,
) -> Result<RankingTable> {
    let rankings = solver.rankings()?;
    let rankings = match frequencies {
        Some(frequencies) if args.frequency_weight > 0.0 => {
            rankings.blend_with_frequency(frequencies, args.frequency_weight)
        }
        _ => rankings,
    };
    Ok(rankings.top(args.top))
}

fn print_suggestions(suggestions: &RankingTable) {
    println!("|Rank|Word |Score |");
    println!("|----|-----|------|");
    for (rank, entry) in suggestions.iter().enumerate() {
        println!("|{:>4}|{}|{:.4}|", rank + 1, entry.word, entry.score);
    }
}

fn prompt_guess(args: &Args, solver: &Solver) -> Result<Word> {
    loop {
        let input = prompt("Your choice: ")?;
        match input.parse::<Word>() {
            Ok(word) if solver.all_words().contains(&word) => return Ok(word),
            Ok(_) => println!("Please provide a valid word."),
            Err(err) => println!("{}. Please provide a valid word.", err),
        }
        pause(args);
    }
}

fn prompt_feedback(args: &Args, guess: &Word) -> Result<FeedbackPattern> {
    println!("What score did you get with the word \"{}\"?", guess);
    let mut labels = [FeedbackLabel::Grey; WORD_LENGTH];
    for (location, label) in labels.iter_mut().enumerate() {
        *label = loop {
            let input = prompt(&format!(
                "Colour for letter no.{} ({})? format:[gn,y,gy]: ",
                location + 1,
                guess.letter_at(location)
            ))?;
            match input.parse::<FeedbackLabel>() {
                Ok(label) => break label,
                Err(_) => println!(
                    "Please write either \"gn\" for green, \"y\" for yellow or \"gy\" for grey."
                ),
            }
            pause(args);
        };
    }
    Ok(FeedbackPattern::new(labels))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        bail!("input ended before the game finished");
    }
    Ok(buffer.trim().to_lowercase())
}

fn pause(args: &Args) {
    if args.pause_ms > 0 {
        thread::sleep(Duration::from_millis(args.pause_ms));
    }
}
