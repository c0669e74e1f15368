//! Skyhop headless runner
//!
//! Plays one run with a simple autopilot on a synthetic 60 Hz clock and logs
//! the result.
//!
//! Usage: `skyhop [settings.json] [frames] [--tier low|medium|high]
//! [--biome name] [--skin id] [--particles on|off]`

use std::path::PathBuf;
use std::time::Instant;

use skyhop::consts::{TICK_INTERVAL, TICK_RATE_HZ};
use skyhop::sim::{GameEvent, GamePhase, SimulationState};
use skyhop::{GameDriver, Progress, Settings, SkyhopError, WorldConfig};

const DEFAULT_FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Skyhop (headless) starting...");

    let (settings, frames) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut driver = match GameDriver::new(WorldConfig::default(), settings) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Invalid session: {}", e);
            std::process::exit(1);
        }
    };

    let mut progress = Progress::new();
    let mut now = Instant::now();
    // Display refresh slightly faster than the tick rate, so some frames skip
    let refresh = TICK_INTERVAL.mul_f32(0.8);
    let mut ticks = 0u32;

    for _ in 0..frames {
        if autopilot_wants_jump(driver.state(), driver.config()) {
            driver.request_jump(now);
        }
        if driver.state().phase == GamePhase::Playing {
            driver.request_shoot(now);
        }

        if driver.frame(now) {
            ticks += 1;
            progress.apply_all(driver.events());
            for event in driver.events() {
                if let GameEvent::ComboTriggered { combo } = event {
                    log::info!("Combo: {:?}", combo);
                }
            }
        }

        if let Some(fault) = driver.fault() {
            log::error!("{}", fault);
            break;
        }
        if driver.state().phase == GamePhase::GameOver {
            break;
        }
        now += refresh;
    }

    let hud = driver.hud();
    log::info!(
        "Finished after {} ticks ({:.1}s simulated): phase={:?}, score={}, coins={}",
        ticks,
        hud.tick as f32 / TICK_RATE_HZ as f32,
        hud.phase,
        hud.score,
        hud.coins
    );
    match progress.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode progress: {}", e),
    }
}

/// Positional settings path and frame count, then `--key value` overrides
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Settings, u32), SkyhopError> {
    let mut positional = Vec::new();
    let mut overrides = Vec::new();
    while let Some(arg) = args.next() {
        match arg.strip_prefix("--") {
            Some(key) => {
                let value = args
                    .next()
                    .ok_or_else(|| SkyhopError::InvalidConfig(format!("--{key} needs a value")))?;
                overrides.push((key.to_string(), value));
            }
            None => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let mut settings = match positional.next() {
        Some(path) => Settings::load_from(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    let frames = match positional.next() {
        Some(n) => n
            .parse()
            .map_err(|_| SkyhopError::InvalidConfig(format!("frame count '{n}' is not a number")))?,
        None => DEFAULT_FRAMES,
    };
    for (key, value) in &overrides {
        settings.set_option(key, value)?;
    }
    Ok((settings, frames))
}

/// Jump when falling below the centre of the next gap
fn autopilot_wants_jump(state: &SimulationState, config: &WorldConfig) -> bool {
    let avatar = &state.avatar;
    if state.phase == GamePhase::Ready {
        return true;
    }
    let target = state
        .obstacles
        .iter()
        .find(|o| o.x + config.pipe_width >= avatar.pos.x - avatar.radius)
        .map(|o| o.gap_top + o.gap_height * 0.6)
        .unwrap_or(config.floor_y() * 0.5);
    avatar.pos.y > target && avatar.vel.y > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyhop::PerformanceTier;
    use skyhop::biome::Biome;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_defaults_without_args() {
        let (settings, frames) = parse_args(args(&[])).unwrap();
        assert_eq!(frames, DEFAULT_FRAMES);
        assert_eq!(settings.tier, PerformanceTier::Medium);
    }

    #[test]
    fn test_overrides_apply() {
        let path = std::env::temp_dir().join("skyhop-cli-no-such-settings.json");
        let path = path.to_string_lossy().into_owned();
        let (settings, frames) =
            parse_args(args(&[path.as_str(), "120", "--tier", "high", "--biome", "arctic", "--skin", "feather"]))
                .unwrap();
        assert_eq!(frames, 120);
        assert_eq!(settings.tier, PerformanceTier::High);
        assert_eq!(settings.biome, Biome::Arctic);
        assert_eq!(settings.skin, "feather");
    }

    #[test]
    fn test_bad_args_are_errors() {
        assert!(parse_args(args(&["--tier"])).is_err());
        assert!(parse_args(args(&["--biome", "moon"])).is_err());
        let path = std::env::temp_dir().join("skyhop-cli-no-such-settings.json");
        let path = path.to_string_lossy().into_owned();
        assert!(parse_args(args(&[path.as_str(), "lots"])).is_err());
    }
}
