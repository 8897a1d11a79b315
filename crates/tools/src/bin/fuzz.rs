use anyhow::{Result, bail};
use arena::{
    ARENA_MAX, ARENA_MIN, Button, ContentPack, Direction, EnemyId, Game, HeroClass, InputEvent,
    Key, ProgressStore,
};
use clap::Parser;
use env_logger::{Builder, Env};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::collections::BTreeSet;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20_000)]
    frames: u32,
    /// Upper bound on session time per frame, in milliseconds
    #[arg(long, default_value_t = 120)]
    max_frame_ms: u64,
}

const KEYS: [Key; 13] = [
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::W,
    Key::A,
    Key::S,
    Key::D,
    Key::Space,
    Key::F,
    Key::E,
    Key::Enter,
    Key::Other,
];

const BUTTONS: [Button; 7] = [
    Button::Step(Direction::Up),
    Button::Step(Direction::Down),
    Button::Step(Direction::Left),
    Button::Step(Direction::Right),
    Button::Attack,
    Button::Door,
    Button::DismissPortfolio,
];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn random_input(rng: &mut ChaCha8Rng) -> InputEvent {
    match rng.next_u64() % 3 {
        0 => InputEvent::key_down(choose(rng, &KEYS)),
        1 => InputEvent::key_up(choose(rng, &KEYS)),
        _ => InputEvent::press(choose(rng, &BUTTONS)),
    }
}

fn check_invariants(game: &Game, seen_defeats: &mut BTreeSet<EnemyId>) -> Result<()> {
    let in_bounds = |v: f32| (ARENA_MIN..=ARENA_MAX).contains(&v);
    let player = game.player().pos;
    if !in_bounds(player.x) || !in_bounds(player.y) {
        bail!("player outside the arena at {player:?}");
    }

    let progress = game.progress();
    if progress.health().current() > progress.health().max() {
        bail!("player health above max");
    }
    if progress.player_health() == 0 && !game.session().is_respawning() {
        bail!("player down without a respawn");
    }
    let defeated = progress.defeated_enemies();
    if !seen_defeats.is_subset(defeated) {
        bail!("defeat record removed");
    }
    seen_defeats.clone_from(defeated);

    for enemy in game.enemies() {
        if !in_bounds(enemy.pos.x) || !in_bounds(enemy.pos.y) {
            bail!("{} outside the arena", enemy.id);
        }
        if defeated.contains(&enemy.id) && enemy.is_alive() {
            bail!("{} alive after defeat", enemy.id);
        }
    }

    let expected = defeated.len() as u32 + 2 * progress.cleared_rooms().len() as u32;
    if progress.xp() != expected || progress.coins() != expected {
        bail!("rewards {}/{} differ from {expected}", progress.xp(), progress.coins());
    }
    Ok(())
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} frames...", args.seed, args.frames);
    let content = ContentPack::default();
    let mut game = Game::new(args.seed, &content);
    let class = if args.seed % 2 == 0 { HeroClass::Mage } else { HeroClass::Swordsman };
    game.choose_hero_class(class);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut seen_defeats = BTreeSet::new();
    let mut rooms_seen = BTreeSet::new();

    for frame in 0..args.frames {
        for _ in 0..rng.next_u64() % 4 {
            game.handle_input(random_input(&mut rng));
        }
        game.advance(rng.next_u64() % (args.max_frame_ms + 1));
        rooms_seen.insert(game.room());

        if let Err(err) = check_invariants(&game, &mut seen_defeats) {
            bail!("frame {frame} (seed {}): {err}", args.seed);
        }
    }

    println!("Fuzz run complete.");
    println!("Clock: {} ms", game.clock_ms());
    println!("Rooms visited: {}", rooms_seen.len());
    println!("Enemies defeated: {}", seen_defeats.len());
    println!("Snapshot Hash: 0x{:016x}", game.snapshot_hash());
    Ok(())
}
