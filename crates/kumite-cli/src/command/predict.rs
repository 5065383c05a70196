use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use kumite_bot::Bot;
use kumite_state::{GameSnapshot, PlayerId};

use crate::util::{Output, read_json_file};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Path to the model artifact
    #[arg(long)]
    model: PathBuf,
    /// Path to a game snapshot JSON file, or "-" for stdin
    #[arg(long, default_value = "-")]
    state: PathBuf,
    /// Which player to decide for
    #[arg(long)]
    player: PlayerId,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let PredictArg {
        model,
        state,
        player,
        output,
    } = arg;

    let snapshot = read_snapshot(state)?;
    let mut bot = Bot::from_artifact_path(model);

    // the exact per-frame inference path, including its fallback behavior
    let decision = bot.decide(Some(&snapshot), *player);
    if let kumite_bot::Decision::Degraded(_, reason) = &decision {
        eprintln!("Degraded decision: {reason}");
    }

    Output::save_json(decision.buttons(), output.clone())?;
    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<GameSnapshot> {
    if path == Path::new("-") {
        serde_json::from_reader(io::stdin().lock()).context("failed to parse snapshot from stdin")
    } else {
        read_json_file("snapshot", path)
    }
}
