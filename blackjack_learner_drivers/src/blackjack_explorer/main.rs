use blackjack_learner::{Learner, Runner};
use blackjack_learner_drivers::{
    init_logger, load_config, new_game, yaml_report, DriverError, LogLevel,
    DEFAULT_CONFIG_PATH,
};
use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ReportFormat {
    Text,
    Yaml,
}

/// Learns a hit/stand preference for every situation by playing random hands.
#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of hands to explore, overriding the config. Negative means no limit
    #[arg(long, allow_negative_numbers = true)]
    hands: Option<i64>,

    /// Seed for both the deck and the exploration, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() {
    let args = CommandLineArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &CommandLineArgs) -> Result<(), DriverError> {
    init_logger(args.log_level)?;
    let mut config = load_config(&args.config)?.explorer;
    if let Some(hands) = args.hands {
        config.hands = hands;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    log::debug!("{:?}", config);

    let mut learner = match config.seed {
        Some(seed) => Learner::with_seed(seed),
        None => Learner::new(),
    };
    let mut runner = Runner::with_game(new_game(config.seed));
    learner.run_explorer(&mut runner, config.hand_limit())?;

    match args.format {
        ReportFormat::Text => {
            for key in learner.observed_keys() {
                if let Some(margin) = learner.action_with_margin(&key) {
                    println!("{}: {}", key, margin);
                }
            }
        }
        ReportFormat::Yaml => {
            print!("{}", yaml_report(&learner)?);
        }
    }
    Ok(())
}
