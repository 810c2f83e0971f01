use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use pirate_fleet::{
    config::messages, init_logging, CliPlayer, ComputerPlayer, PenaltyCounts, Rules, Session,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct GameOpts {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON file overriding fleet, penalty counts and scoring")]
    rules: Option<PathBuf>,
    #[arg(long, help = "Play without mines")]
    no_mines: bool,
    #[arg(long, help = "Play without sea monsters")]
    no_monsters: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer on this terminal.
    Play {
        #[command(flatten)]
        opts: GameOpts,
        #[arg(long, help = "Deploy a random fleet instead of the standard layout")]
        random_fleet: bool,
    },
    /// Let the computer play both sides and print the summary as JSON.
    Auto {
        #[command(flatten)]
        opts: GameOpts,
    },
}

fn load_rules(path: Option<&PathBuf>) -> anyhow::Result<Rules> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(Rules::default()),
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        eprintln!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn penalties(rules: &Rules, opts: &GameOpts) -> PenaltyCounts {
    let mut counts = PenaltyCounts::from_rules(rules);
    if opts.no_mines {
        counts.mines = 0;
    }
    if opts.no_monsters {
        counts.sea_monsters = 0;
    }
    counts
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { opts, random_fleet } => {
            let rules = load_rules(opts.rules.as_ref())?;
            let mut rng = make_rng(opts.seed);
            let human = CliPlayer::stdio();
            let human = if random_fleet {
                human.with_random_fleet()
            } else {
                human
            };
            let mut session = Session::new(rules, Box::new(human), Box::new(ComputerPlayer::new()))
                .with_penalties(penalties(&rules, &opts));
            loop {
                if let Err(e) = session.setup(&mut rng) {
                    println!("{}: {}", messages::UNABLE_TO_START_TITLE, e);
                    return Err(e.into());
                }
                while !session.engine().is_over() {
                    session.step(&mut rng)?;
                }
                info!("final summary: {:?}", session.summary());
                if !session.play_again() {
                    break;
                }
                session.reset();
            }
        }
        Commands::Auto { opts } => {
            let rules = load_rules(opts.rules.as_ref())?;
            let mut rng = make_rng(opts.seed);
            let mut session = Session::new(
                rules,
                Box::new(ComputerPlayer::new()),
                Box::new(ComputerPlayer::new()),
            )
            .with_penalties(penalties(&rules, &opts));
            let summary = session.run(&mut rng)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
