use advance::chooser::{ActionChooser, FirstChooser, MaterialChooser, RandomChooser};
use advance::error::ActionInvalid;
use advance::game::Match;
use advance::pieces::Side;
use advance::preset;
use advance::rules::Ruleset;
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::cmp::max;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ChooserKind {
    /// Pick uniformly at random.
    Random,
    /// Pick the first legal action.
    First,
    /// Pick the action with the best material balance.
    Material
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RulesKind {
    Standard,
    Classic
}

impl From<RulesKind> for Ruleset {
    fn from(value: RulesKind) -> Self {
        match value {
            RulesKind::Standard => preset::rules::STANDARD,
            RulesKind::Classic => preset::rules::CLASSIC
        }
    }
}

/// Play a single turn of Advance: read a board, move for one side and write the board back.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The side to move (white or black).
    side: Side,

    /// The board snapshot to read.
    input: PathBuf,

    /// Where to write the board after the move.
    output: PathBuf,

    /// How to choose between legal actions.
    #[arg(long, value_enum, default_value_t = ChooserKind::Random)]
    chooser: ChooserKind,

    /// Seed for the random chooser.
    #[arg(long)]
    seed: Option<u64>,

    /// Which ruleset to play by.
    #[arg(long, value_enum, default_value_t = RulesKind::Standard)]
    rules: RulesKind,

    /// Enable debug mode. This will increase the verbosity and detail of the logs.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Set the log level.
    ///
    /// If `debug` is enabled, the minimum log level will be set to `Debug`.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.debug {
        max(LevelFilter::Debug, cli.log_level)
    } else {
        cli.log_level
    };
    let mut config_builder = simplelog::ConfigBuilder::new();
    if cli.debug {
        config_builder.set_time_level(LevelFilter::Error);
        config_builder.set_target_level(LevelFilter::Error);
    } else {
        config_builder.set_time_level(LevelFilter::Off);
        config_builder.set_target_level(LevelFilter::Off);
    }
    if let Err(e) = TermLogger::init(log_level, config_builder.build(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Could not initialise logging: {e}");
    }
}

fn play(game: &mut Match, cli: &Cli) -> Result<(), ActionInvalid> {
    let mut chooser: Box<dyn ActionChooser> = match (cli.chooser, cli.seed) {
        (ChooserKind::Random, Some(seed)) => Box::new(RandomChooser::seeded(seed)),
        (ChooserKind::Random, None) => Box::new(RandomChooser::new()),
        (ChooserKind::First, _) => Box::new(FirstChooser),
        (ChooserKind::Material, _) => Box::new(MaterialChooser)
    };
    game.play_turn(cli.side, &mut chooser)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    debug!("Parsed arguments: {cli:?}");

    let snapshot = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            error!("Could not read {}: {e}", cli.input.display());
            return ExitCode::FAILURE
        }
    };
    let mut game = match Match::from_snapshot(cli.rules.into(), &snapshot) {
        Ok(g) => g,
        Err(e) => {
            error!("Could not load {}: {e}", cli.input.display());
            return ExitCode::FAILURE
        }
    };

    if let Err(e) = play(&mut game, &cli) {
        error!("Turn for {} failed: {e}", cli.side);
        return ExitCode::FAILURE
    }

    if let Err(e) = fs::write(&cli.output, game.to_display_str()) {
        error!("Could not write {}: {e}", cli.output.display());
        return ExitCode::FAILURE
    }
    info!("Wrote board to {}", cli.output.display());
    ExitCode::SUCCESS
}
