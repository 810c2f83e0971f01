use pirate_fleet::{ComputerPlayer, Rules, Session, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng = SmallRng::seed_from_u64(seed1 ^ seed2.rotate_left(32));
    let mut session = Session::new(
        Rules::default(),
        Box::new(ComputerPlayer::new()),
        Box::new(ComputerPlayer::new()),
    );
    let summary = session.run(&mut rng)?;

    let winner = summary.winner.map(|side| match side {
        Side::Human => "human",
        Side::Computer => "computer",
    });

    let result = json!({
        "seeds": [seed1, seed2],
        "human": summary.human,
        "computer": summary.computer,
        "moves": summary.moves,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
