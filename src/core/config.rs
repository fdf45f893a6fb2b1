//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Only two settings have env vars: `SWIPEDECK_FILE` (deck file) and
//! `SWIPEDECK_THRESHOLD` (swipe threshold). Everything else comes from the
//! file or its default.
//!
//! Config lives at `~/.swipedeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::animation::SpringConfig;
use crate::core::deck::DeckSettings;
use crate::core::decision::DEFAULT_THRESHOLD;
use crate::core::gesture::RotationConfig;
use crate::core::stack::StackStyle;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub spring: SpringSection,
    #[serde(default)]
    pub stack: StackConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub deck_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SwipeConfig {
    pub threshold: Option<f64>,
    pub out_duration_ms: Option<u64>,
    pub max_rotation_deg: Option<f64>,
    pub rotation_span: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpringSection {
    pub stiffness: Option<f64>,
    pub damping: Option<f64>,
    pub mass: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StackConfig {
    pub offset_rows: Option<f64>,
    pub max_visible: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OUT_DURATION_MS: u64 = 250;
pub const DEFAULT_STACK_OFFSET_ROWS: f64 = 1.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub deck_file: Option<PathBuf>,
    pub settings: DeckSettings,
}

/// CLI flags that take part in resolution (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub deck_file: Option<PathBuf>,
    pub threshold: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.swipedeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".swipedeck").join("config.toml"))
}

/// Load config from `~/.swipedeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DeckConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating the default if absent.
pub fn load_config_from(path: &Path) -> Result<DeckConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DeckConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Swipedeck Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# deck_file = "~/cards.json"        # Or set SWIPEDECK_FILE, or pass --deck

# [swipe]
# threshold = 0.25                  # Or set SWIPEDECK_THRESHOLD, or pass --threshold
# out_duration_ms = 250             # Exit animation length
# max_rotation_deg = 120            # Tilt at the edge of the rotation range
# rotation_span = 1.5               # Rotation range, in viewport widths

# [spring]
# stiffness = 230.0
# damping = 22.0
# mass = 1.0

# [stack]
# offset_rows = 1                   # Vertical step between stacked cards
# max_visible = 3                   # Cards drawn beneath the top one
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DeckConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Deck file: CLI → env → config → none (sample deck)
    let deck_file = cli
        .deck_file
        .clone()
        .or_else(|| std::env::var("SWIPEDECK_FILE").ok().map(PathBuf::from))
        .or_else(|| config.general.deck_file.as_deref().map(expand_home));

    // Threshold: CLI → env → config → default
    let threshold = checked(
        "swipe.threshold",
        cli.threshold
            .or_else(|| env_threshold(std::env::var("SWIPEDECK_THRESHOLD").ok()))
            .or(config.swipe.threshold),
        DEFAULT_THRESHOLD,
        |t| t > 0.0 && t < 1.0,
    );

    let out_duration_ms = checked(
        "swipe.out_duration_ms",
        config.swipe.out_duration_ms,
        DEFAULT_OUT_DURATION_MS,
        |ms| ms > 0,
    );

    let rotation_defaults = RotationConfig::default();
    let rotation = RotationConfig {
        max_deg: checked(
            "swipe.max_rotation_deg",
            config.swipe.max_rotation_deg,
            rotation_defaults.max_deg,
            |d| d.is_finite() && d >= 0.0,
        ),
        span: checked(
            "swipe.rotation_span",
            config.swipe.rotation_span,
            rotation_defaults.span,
            |s| s.is_finite() && s > 0.0,
        ),
    };

    let spring_defaults = SpringConfig::default();
    let positive = |v: f64| v.is_finite() && v > 0.0;
    let spring = SpringConfig {
        stiffness: checked("spring.stiffness", config.spring.stiffness, spring_defaults.stiffness, positive),
        damping: checked("spring.damping", config.spring.damping, spring_defaults.damping, positive),
        mass: checked("spring.mass", config.spring.mass, spring_defaults.mass, positive),
        ..spring_defaults
    };
    let spring = if spring.is_stable() {
        spring
    } else {
        warn!(
            "Spring (stiffness {}, damping {}, mass {}) is too stiff to simulate, using defaults",
            spring.stiffness, spring.damping, spring.mass
        );
        spring_defaults
    };

    let style = StackStyle {
        offset_step: checked(
            "stack.offset_rows",
            config.stack.offset_rows,
            DEFAULT_STACK_OFFSET_ROWS,
            |r| r.is_finite() && r >= 0.0,
        ),
        max_visible: config.stack.max_visible,
        rotation,
    };

    ResolvedConfig {
        deck_file,
        settings: DeckSettings {
            threshold,
            out_duration: Duration::from_millis(out_duration_ms),
            spring,
            style,
        },
    }
}

/// Use `value` if present and valid, otherwise warn and fall back.
fn checked<T: Copy + fmt::Debug>(
    key: &str,
    value: Option<T>,
    default: T,
    valid: impl Fn(T) -> bool,
) -> T {
    match value {
        Some(v) if valid(v) => v,
        Some(v) => {
            warn!("Invalid {key} = {v:?}, using default {default:?}");
            default
        }
        None => default,
    }
}

/// Parses a threshold env var value. Unparseable values are ignored.
fn env_threshold(raw: Option<String>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(t) => Some(t),
        Err(_) => {
            warn!("Ignoring SWIPEDECK_THRESHOLD = {raw:?}: not a number");
            None
        }
    }
}

/// Expands a leading `~/` against the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = DeckConfig::default();
        assert!(config.general.deck_file.is_none());
        assert!(config.swipe.threshold.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = DeckConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.settings, DeckSettings::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = DeckConfig {
            swipe: SwipeConfig {
                threshold: Some(0.4),
                out_duration_ms: Some(500),
                max_rotation_deg: Some(30.0),
                rotation_span: Some(1.0),
            },
            stack: StackConfig {
                offset_rows: Some(2.0),
                max_visible: Some(3),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        let settings = resolved.settings;
        assert_eq!(settings.threshold, 0.4);
        assert_eq!(settings.out_duration, Duration::from_millis(500));
        assert_eq!(settings.style.rotation.max_deg, 30.0);
        assert_eq!(settings.style.offset_step, 2.0);
        assert_eq!(settings.style.max_visible, Some(3));
    }

    #[test]
    fn test_resolve_cli_threshold_wins() {
        let config = DeckConfig {
            swipe: SwipeConfig {
                threshold: Some(0.4),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            threshold: Some(0.1),
            ..Default::default()
        };
        assert_eq!(resolve(&config, &cli).settings.threshold, 0.1);
    }

    #[test]
    fn test_resolve_cli_deck_file_wins() {
        let config = DeckConfig {
            general: GeneralConfig {
                deck_file: Some("/from/config.json".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            deck_file: Some(PathBuf::from("/from/cli.json")),
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &cli).deck_file,
            Some(PathBuf::from("/from/cli.json"))
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DeckConfig {
            swipe: SwipeConfig {
                threshold: Some(1.5),
                out_duration_ms: Some(0),
                ..Default::default()
            },
            spring: SpringSection {
                stiffness: Some(-1.0),
                damping: Some(f64::NAN),
                mass: Some(2.0),
            },
            ..Default::default()
        };
        let settings = resolve(&config, &CliOverrides::default()).settings;
        let defaults = SpringConfig::default();
        assert_eq!(settings.threshold, DEFAULT_THRESHOLD);
        assert_eq!(settings.out_duration, Duration::from_millis(DEFAULT_OUT_DURATION_MS));
        assert_eq!(settings.spring.stiffness, defaults.stiffness);
        assert_eq!(settings.spring.damping, defaults.damping);
        assert_eq!(settings.spring.mass, 2.0);
    }

    #[test]
    fn test_unstable_spring_falls_back_to_defaults() {
        let config = DeckConfig {
            spring: SpringSection {
                stiffness: Some(1e7),
                damping: None,
                mass: None,
            },
            ..Default::default()
        };
        let settings = resolve(&config, &CliOverrides::default()).settings;
        assert_eq!(settings.spring, SpringConfig::default());
    }

    #[test]
    fn test_stiff_but_stable_spring_is_kept() {
        let config = DeckConfig {
            spring: SpringSection {
                stiffness: Some(2_000.0),
                damping: Some(60.0),
                mass: None,
            },
            ..Default::default()
        };
        let settings = resolve(&config, &CliOverrides::default()).settings;
        assert_eq!(settings.spring.stiffness, 2_000.0);
        assert_eq!(settings.spring.damping, 60.0);
    }

    #[test]
    fn test_env_threshold_parsing() {
        assert_eq!(env_threshold(None), None);
        assert_eq!(env_threshold(Some("0.3".to_string())), Some(0.3));
        assert_eq!(env_threshold(Some(" 0.1 ".to_string())), Some(0.1));
        assert_eq!(env_threshold(Some("lots".to_string())), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
deck_file = "/tmp/cards.json"

[swipe]
threshold = 0.3
out_duration_ms = 300

[spring]
stiffness = 180.0

[stack]
offset_rows = 2.0
max_visible = 4
"#;
        let config: DeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.deck_file.as_deref(), Some("/tmp/cards.json"));
        assert_eq!(config.swipe.threshold, Some(0.3));
        assert_eq!(config.swipe.out_duration_ms, Some(300));
        assert_eq!(config.spring.stiffness, Some(180.0));
        assert_eq!(config.stack.offset_rows, Some(2.0));
        assert_eq!(config.stack.max_visible, Some(4));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[swipe]
threshold = 0.35
"#;
        let config: DeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.swipe.threshold, Some(0.35));
        assert!(config.swipe.out_duration_ms.is_none());
        assert!(config.general.deck_file.is_none());
        assert!(config.stack.max_visible.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("swipedeck-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[swipe\nthreshold = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_config_generates_default() {
        let dir = std::env::temp_dir().join(format!("swipedeck-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.swipe.threshold.is_none());
        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.starts_with("# Swipedeck Configuration"));

        // The generated file is all comments, so it loads as defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.swipe.threshold.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path.json"), PathBuf::from("/abs/path.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/cards.json"), home.join("cards.json"));
        }
    }
}
