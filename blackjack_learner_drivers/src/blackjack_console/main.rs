mod console;

use std::io;

use blackjack_learner::{HandLimit, Runner};
use blackjack_learner_drivers::{
    init_logger, load_config, new_game, DriverError, LogLevel, DEFAULT_CONFIG_PATH,
};
use clap::Parser;

use self::console::ConsoleResponder;

/// Play blackjack against the dealer in the terminal.
#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
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
    let config = load_config(&args.config)?.console;

    let stdin = io::stdin();
    let mut responder = ConsoleResponder::new(stdin.lock(), io::stdout());
    let mut runner = Runner::with_game(new_game(config.seed));
    runner.run(&mut responder, HandLimit::Unbounded)?;
    Ok(())
}
