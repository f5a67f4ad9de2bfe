use std::{fs, path::Path};
use toml::{Table, Value};

mod error;

pub use error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "avanto.toml";
pub const MAX_PLAYERS: u8 = 4;
const MIXER_CHANNELS: i64 = 32;

/// Text shown on the pause screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinigameInfo {
    pub name: String,
    pub developer: String,
    pub description: String,
    pub instructions: String,
}

impl Default for MinigameInfo {
    fn default() -> Self {
        Self {
            name: "Avanto".to_string(),
            developer: "Flavio Zavan".to_string(),
            description: "Whatever description".to_string(),
            instructions: "Sauna: Hold Z to crouch\nWater: Blabla".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSection {
    pub info: MinigameInfo,
    pub players: u8,
    /// Fixed ticks per second.
    pub fixed_rate: u32,
    /// Most fixed ticks run in one frame; the rest of the backlog is dropped.
    pub max_catch_up: u32,
}

impl GameSection {
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.fixed_rate as f32
    }
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            info: MinigameInfo::default(),
            players: MAX_PLAYERS,
            fixed_rate: 30,
            max_catch_up: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioSection {
    pub first_sfx_channel: u8,
    pub sfx_channels: u8,
    pub paused_volume: f32,
}

impl Default for AudioSection {
    fn default() -> Self {
        Self {
            first_sfx_channel: 27,
            sfx_channels: 4,
            paused_volume: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleSection {
    pub max_sources: usize,
    pub seed: u64,
}

impl Default for ParticleSection {
    fn default() -> Self {
        Self {
            max_sources: 8,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameConfig {
    pub game: GameSection,
    pub audio: AudioSection,
    pub particles: ParticleSection,
}

pub fn default_config_toml() -> String {
    r#"[game]
name = "Avanto"
developer = "Flavio Zavan"
description = "Whatever description"
instructions = "Sauna: Hold Z to crouch\nWater: Blabla"
players = 4
fixed_rate = 30
max_catch_up = 5

[audio]
first_sfx_channel = 27
sfx_channels = 4
paused_volume = 0.2

[particles]
max_sources = 8
seed = 0
"#
    .to_string()
}

pub fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Defaults when `path` does not exist; any other failure is an error.
pub fn load_or_default(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        log::info!("{} not found, using defaults", path.display());
        return Ok(GameConfig::default());
    }
    load_config(path)
}

pub fn parse_config(contents: &str) -> Result<GameConfig> {
    let value: Value = contents.parse::<Value>()?;
    let game_table = value
        .get("game")
        .and_then(Value::as_table)
        .ok_or(ConfigError::MissingField("game"))?;
    let empty = Table::new();
    let audio_table = optional_table(&value, "audio")?.unwrap_or(&empty);
    let particle_table = optional_table(&value, "particles")?.unwrap_or(&empty);

    let defaults = GameConfig::default();

    let info = MinigameInfo {
        name: string_or(game_table, "name", "game.name", &defaults.game.info.name)?,
        developer: string_or(
            game_table,
            "developer",
            "game.developer",
            &defaults.game.info.developer,
        )?,
        description: string_or(
            game_table,
            "description",
            "game.description",
            &defaults.game.info.description,
        )?,
        instructions: string_or(
            game_table,
            "instructions",
            "game.instructions",
            &defaults.game.info.instructions,
        )?,
    };

    let players = int_or(game_table, "players", "game.players", defaults.game.players.into())?;
    if !(1..=i64::from(MAX_PLAYERS)).contains(&players) {
        return Err(ConfigError::InvalidField(
            "game.players",
            format!("must be between 1 and {MAX_PLAYERS}"),
        ));
    }

    let fixed_rate = int_or(
        game_table,
        "fixed_rate",
        "game.fixed_rate",
        defaults.game.fixed_rate.into(),
    )?;
    let fixed_rate = positive_u32("game.fixed_rate", fixed_rate)?;

    let max_catch_up = int_or(
        game_table,
        "max_catch_up",
        "game.max_catch_up",
        defaults.game.max_catch_up.into(),
    )?;
    let mut max_catch_up = positive_u32("game.max_catch_up", max_catch_up)?;
    if max_catch_up > fixed_rate {
        log::warn!("game.max_catch_up {max_catch_up} above fixed_rate, clamped to {fixed_rate}");
        max_catch_up = fixed_rate;
    }

    let first_sfx_channel = int_or(
        audio_table,
        "first_sfx_channel",
        "audio.first_sfx_channel",
        defaults.audio.first_sfx_channel.into(),
    )?;
    let sfx_channels = int_or(
        audio_table,
        "sfx_channels",
        "audio.sfx_channels",
        defaults.audio.sfx_channels.into(),
    )?;
    if sfx_channels <= 0 {
        return Err(ConfigError::InvalidField(
            "audio.sfx_channels",
            "must be greater than 0".to_string(),
        ));
    }
    if first_sfx_channel < 0 || first_sfx_channel + sfx_channels > MIXER_CHANNELS {
        return Err(ConfigError::InvalidField(
            "audio.first_sfx_channel",
            format!("effect channels must fit in 0..{MIXER_CHANNELS}"),
        ));
    }

    let paused_volume = float_or(
        audio_table,
        "paused_volume",
        "audio.paused_volume",
        defaults.audio.paused_volume.into(),
    )?;
    if !(0.0..=1.0).contains(&paused_volume) {
        return Err(ConfigError::InvalidField(
            "audio.paused_volume",
            "must be between 0 and 1".to_string(),
        ));
    }

    let max_sources = int_or(
        particle_table,
        "max_sources",
        "particles.max_sources",
        defaults.particles.max_sources as i64,
    )?;
    if max_sources <= 0 {
        return Err(ConfigError::InvalidField(
            "particles.max_sources",
            "must be greater than 0".to_string(),
        ));
    }

    let seed = int_or(particle_table, "seed", "particles.seed", 0)?;
    let seed = u64::try_from(seed).map_err(|_| {
        ConfigError::InvalidField("particles.seed", "must not be negative".to_string())
    })?;

    Ok(GameConfig {
        game: GameSection {
            info,
            players: players as u8,
            fixed_rate,
            max_catch_up,
        },
        audio: AudioSection {
            first_sfx_channel: first_sfx_channel as u8,
            sfx_channels: sfx_channels as u8,
            paused_volume: paused_volume as f32,
        },
        particles: ParticleSection {
            max_sources: max_sources as usize,
            seed,
        },
    })
}

fn optional_table<'a>(value: &'a Value, key: &'static str) -> Result<Option<&'a Table>> {
    match value.get(key) {
        None => Ok(None),
        Some(Value::Table(table)) => Ok(Some(table)),
        Some(_) => Err(ConfigError::InvalidField(key, "must be a table".to_string())),
    }
}

fn string_or(table: &Table, key: &str, field: &'static str, default: &str) -> Result<String> {
    match table.get(key) {
        None => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::InvalidField(field, "must be a string".to_string())),
    }
}

fn int_or(table: &Table, key: &str, field: &'static str, default: i64) -> Result<i64> {
    match table.get(key) {
        None => Ok(default),
        Some(Value::Integer(i)) => Ok(*i),
        Some(_) => Err(ConfigError::InvalidField(field, "must be an integer".to_string())),
    }
}

fn float_or(table: &Table, key: &str, field: &'static str, default: f64) -> Result<f64> {
    match table.get(key) {
        None => Ok(default),
        Some(Value::Float(f)) => Ok(*f),
        Some(Value::Integer(i)) => Ok(*i as f64),
        Some(_) => Err(ConfigError::InvalidField(field, "must be a number".to_string())),
    }
}

fn positive_u32(field: &'static str, raw: i64) -> Result<u32> {
    match u32::try_from(raw) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidField(
            field,
            "must be a positive integer".to_string(),
        )),
    }
}
