use anyhow::{Context, Result};
use arena::autopilot;
use arena::{Checkpoint, ContentPack, Game, HeroClass, LogEvent, ProgressStore, RoomId};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClassArg {
    Mage,
    Swordsman,
}

impl From<ClassArg> for HeroClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Mage => HeroClass::Mage,
            ClassArg::Swordsman => HeroClass::Swordsman,
        }
    }
}

/// Plays the arena headlessly with the scripted autopilot and reports the result.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Upper bound on simulated frames
    #[arg(short, long, default_value_t = 20_000)]
    frames: u32,
    /// Milliseconds of session time per frame
    #[arg(long, default_value_t = 33)]
    frame_ms: u64,
    /// Start a fresh run as this class; ignored when resuming a checkpoint
    #[arg(short, long, value_enum, default_value_t = ClassArg::Swordsman)]
    class: ClassArg,
    /// Resume from this checkpoint document
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// Write the final checkpoint here
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug)]
struct Summary {
    frames: u32,
    finished: bool,
    room: RoomId,
    cleared: usize,
    defeated: usize,
    xp: u32,
    coins: u32,
    hp: u32,
    respawns: usize,
    snapshot_hash: u64,
}

fn load_checkpoint(path: &Path) -> Result<Checkpoint> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read checkpoint file: {}", path.display()))?;
    Checkpoint::from_json(&raw)
        .with_context(|| format!("Failed to decode checkpoint: {}", path.display()))
}

fn simulate(game: &mut Game, max_frames: u32, frame_ms: u64) -> Summary {
    let mut frames = 0;
    while frames < max_frames && !autopilot::is_finished(game) {
        for event in autopilot::next_inputs(game) {
            game.handle_input(event);
        }
        game.advance(frame_ms);
        frames += 1;
    }

    let progress = game.progress();
    Summary {
        frames,
        finished: autopilot::is_finished(game),
        room: game.room(),
        cleared: progress.cleared_rooms().len(),
        defeated: progress.defeated_enemies().len(),
        xp: progress.xp(),
        coins: progress.coins(),
        hp: progress.player_health(),
        respawns: game
            .log()
            .iter()
            .filter(|event| matches!(event, LogEvent::PlayerRespawned { .. }))
            .count(),
        snapshot_hash: game.snapshot_hash(),
    }
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let content = ContentPack::default();
    let mut game = match &args.checkpoint {
        Some(path) => Game::from_checkpoint(args.seed, &content, &load_checkpoint(path)?),
        None => {
            let mut game = Game::new(args.seed, &content);
            game.choose_hero_class(args.class.into());
            game
        }
    };

    let summary = simulate(&mut game, args.frames, args.frame_ms);
    if !summary.finished {
        log::warn!(
            "autopilot stopped after {} frames without reaching the last room",
            summary.frames
        );
    }

    if let Some(path) = &args.out {
        fs::write(path, game.checkpoint().to_json())
            .with_context(|| format!("Failed to write checkpoint: {}", path.display()))?;
    }

    println!("Simulation complete.");
    println!("Frames: {} ({} ms)", summary.frames, game.clock_ms());
    println!("Finished: {}", summary.finished);
    println!("Room: {}", summary.room.title());
    println!("Rooms cleared: {}", summary.cleared);
    println!("Enemies defeated: {}", summary.defeated);
    println!("XP/Coins: {}/{}", summary.xp, summary.coins);
    println!("HP: {}", summary.hp);
    println!("Respawns: {}", summary.respawns);
    println!("Snapshot Hash: 0x{:016x}", summary.snapshot_hash);

    Ok(())
}
