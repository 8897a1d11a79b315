//! Session seed selection. Room sessions derive their enemy jitter from it.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SEED_ENV_VAR: &str = "ARENA_SEED";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Env(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Env(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// `--seed` wins over the environment, which wins over a generated seed.
pub fn resolve_seed(
    args: &[String],
    env_value: Option<&str>,
    generated_seed: u64,
) -> Result<SeedChoice, String> {
    let mut selected_seed = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        let value = if argument == "--seed" {
            let Some(value) = args.get(index + 1) else {
                return Err("missing value for --seed".to_string());
            };
            index += 1;
            Some(value.as_str())
        } else {
            argument.strip_prefix("--seed=")
        };

        if let Some(value) = value {
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
        }
        index += 1;
    }

    if let Some(seed) = selected_seed {
        return Ok(SeedChoice::Cli(seed));
    }
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(SeedChoice::Env(parse_seed_value(value)?)),
        None => Ok(SeedChoice::Generated(generated_seed)),
    }
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
