mod bot;
mod sauna;

use anyhow::{Context, ensure};
use avanto_bark::NullAudio;
use avanto_project::{CONFIG_FILE, default_config_toml, load_or_default};
use avanto_render_bridge::NullGraphics;
use avanto_runtime::{Game, RecordingHost};
use bot::Bot;
use sauna::SaunaStage;
use std::{env, fs, path::PathBuf};

const DEFAULT_FRAME_RATE: f32 = 60.0;
const DEFAULT_MAX_SECONDS: f32 = 180.0;

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn parse_seconds(args: &[String], flag: &str) -> anyhow::Result<Option<f32>> {
    parse_flag_value(args, flag)
        .map(|v| {
            v.parse::<f32>()
                .with_context(|| format!("{flag} expects a number, got `{v}`"))
        })
        .transpose()
}

fn current_dir_fallback() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let root = parse_flag_value(&args, "--path")
        .map(PathBuf::from)
        .unwrap_or_else(current_dir_fallback);
    let config_path = root.join(CONFIG_FILE);

    if args.iter().any(|a| a == "--init") && !config_path.exists() {
        fs::write(&config_path, default_config_toml())
            .with_context(|| format!("writing {}", config_path.display()))?;
        log::info!("wrote {}", config_path.display());
    }

    let config = load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let frame_rate = parse_seconds(&args, "--fps")?.unwrap_or(DEFAULT_FRAME_RATE);
    ensure!(frame_rate > 0.0, "--fps must be positive");
    let max_seconds = parse_seconds(&args, "--max-seconds")?.unwrap_or(DEFAULT_MAX_SECONDS);

    let mut bot = Bot::default();
    if let Some(at) = parse_seconds(&args, "--pause-at")? {
        bot = bot.with_pause_at(at);
    }

    let mut game = Game::new(
        &config,
        vec![Box::new(SaunaStage::new())],
        NullGraphics::new(),
        NullAudio::new(),
        RecordingHost::new(),
    );

    let frame_delta = 1.0 / frame_rate;
    let mut elapsed = 0.0f32;
    let mut fixed_ticks = 0u64;
    while !game.is_over() {
        if elapsed >= max_seconds {
            log::warn!("no result after {max_seconds:.0}s, shutting down");
            game.shutdown();
            break;
        }
        fixed_ticks += u64::from(game.step(frame_delta, bot.poll(frame_delta)));
        elapsed += frame_delta;
    }

    log::info!(
        "{} frames, {} fixed ticks, {:.1}s simulated, ended: {:?}",
        game.graphics().frames_presented(),
        fixed_ticks,
        elapsed,
        game.ended()
    );
    for actor in &game.session().actors {
        log::info!(
            "P{}: status {:.2}{}",
            actor.id.0 + 1,
            actor.status,
            if actor.eliminated { " (out)" } else { "" }
        );
    }
    Ok(())
}
