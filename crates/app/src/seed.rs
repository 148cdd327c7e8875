use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
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

/// Options accepted on the game's command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    pub seed: SeedChoice,
    pub config_path: Option<PathBuf>,
}

/// Parses `--seed N`, `--seed=N`, `--config PATH` and `--config=PATH`.
/// Unknown arguments are ignored.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut selected_seed = None;
    let mut config_path = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();
        let (flag, inline_value) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if flag != "--seed" && flag != "--config" {
            index += 1;
            continue;
        }

        let value = match inline_value {
            Some(value) => value,
            None => {
                index += 1;
                let next = args.get(index).map(String::as_str);
                next.ok_or_else(|| format!("missing value for {flag}"))?
            }
        };
        index += 1;

        if flag == "--seed" {
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
        } else if config_path.is_some() {
            return Err("config provided more than once".to_string());
        } else {
            config_path = Some(PathBuf::from(value));
        }
    }

    let seed = match selected_seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    };
    Ok(LaunchArgs { seed, config_path })
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
