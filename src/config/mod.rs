// ABOUTME: Configuration management for visionhub
// Layered TOML files for notification timing, chat latency, wizard gating and UI tuning

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Toast timing and stacking
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Community chat widget
    #[serde(default)]
    pub chat: ChatConfig,

    /// Form wizard behavior
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Terminal UI tuning
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Time from creation until auto-dismiss starts (default: 5000ms)
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,

    /// Fade-out duration before removal (default: 300ms)
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Slide-in duration (default: 100ms)
    #[serde(default = "default_enter_ms")]
    pub enter_ms: u64,

    /// Maximum toasts on screen, oldest evicted first. 0 = unbounded.
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: default_lifetime_ms(),
            fade_ms: default_fade_ms(),
            enter_ms: default_enter_ms(),
            max_visible: default_max_visible(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Delay before the bot answers (default: 1000ms)
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Gate `next` on the full field validator instead of presence only
    #[serde(default)]
    pub enforce_format_on_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll / tick interval (default: 100ms)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Terminal width at which an open navigation menu closes (default: 100 columns)
    #[serde(default = "default_menu_breakpoint")]
    pub menu_breakpoint: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            menu_breakpoint: default_menu_breakpoint(),
        }
    }
}

fn default_lifetime_ms() -> u64 {
    5000
}

fn default_fade_ms() -> u64 {
    300
}

fn default_enter_ms() -> u64 {
    100
}

fn default_max_visible() -> usize {
    5
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_menu_breakpoint() -> u16 {
    100
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_with_override(None)
    }

    /// Load the default layers, then an explicit file on top. Unlike the
    /// default locations, an explicit file must exist.
    pub fn load_with_override(explicit: Option<&Path>) -> Result<Self> {
        let mut paths = Self::get_config_paths();
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            paths.push(path.to_path_buf());
        }
        Self::load_layers(&paths)
    }

    /// Merge the given files in order; later files win key by key. Missing
    /// files are skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = toml::Table::new();

        for path in paths {
            if !path.exists() {
                debug!("No config at {}", path.display());
                continue;
            }
            let layer = Self::load_table(path)?;
            merge_tables(&mut merged, layer);
            info!("Loaded config from {}", path.display());
        }

        toml::Value::Table(merged)
            .try_into()
            .context("Failed to apply merged config layers")
    }

    /// Raw keys of a single layer, checked against the config schema
    fn load_table(path: &Path) -> Result<toml::Table> {
        let content = Self::read(path)?;

        toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Configuration file paths, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. System config
        paths.push(PathBuf::from("/etc/visionhub/config.toml"));

        // 2. User config (~/.visionhub/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // 3. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".visionhub").join("config.toml"));
        }

        paths
    }

    /// Get user configuration directory
    fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".visionhub").join("config"))
    }
}


/// Overlay `layer` onto `base`. Nested tables merge recursively, any other
/// value present in `layer` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.notifications.lifetime_ms, 5000);
        assert_eq!(config.notifications.fade_ms, 300);
        assert_eq!(config.notifications.enter_ms, 100);
        assert_eq!(config.notifications.max_visible, 5);
        assert_eq!(config.chat.reply_delay_ms, 1000);
        assert!(!config.wizard.enforce_format_on_next);
        assert_eq!(config.ui.menu_breakpoint, 100);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "config.toml", "[chat]\nreply_delay_ms = 250\n");

        let config = AppConfig::load_layers(&[path]).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 250);
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn test_later_layers_win() {
        let temp_dir = TempDir::new().unwrap();
        let system = write(
            &temp_dir,
            "system.toml",
            "[notifications]\nlifetime_ms = 8000\nmax_visible = 3\n",
        );
        let user = write(&temp_dir, "user.toml", "[notifications]\nmax_visible = 0\n");
        let missing = temp_dir.path().join("absent.toml");

        let config = AppConfig::load_layers(&[system, missing, user]).unwrap();
        assert_eq!(config.notifications.lifetime_ms, 8000);
        assert_eq!(config.notifications.max_visible, 0);
    }

    #[test]
    fn test_later_layer_can_restore_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let system = write(
            &temp_dir,
            "system.toml",
            "[notifications]\nmax_visible = 3\n\n[wizard]\nenforce_format_on_next = true\n",
        );
        let explicit = write(
            &temp_dir,
            "explicit.toml",
            "[notifications]\nmax_visible = 5\n\n[wizard]\nenforce_format_on_next = false\n",
        );

        let config = AppConfig::load_layers(&[system, explicit]).unwrap();
        assert_eq!(config.notifications.max_visible, 5);
        assert!(!config.wizard.enforce_format_on_next);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "bad.toml", "[ui\ntick_rate_ms = ");
        let err = AppConfig::load_layers(&[path]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_wrong_type_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "typed.toml", "[ui]\ntick_rate_ms = \"fast\"\n");
        let err = AppConfig::load_layers(&[path]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_explicit_override_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(AppConfig::load_with_override(Some(&missing)).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.wizard.enforce_format_on_next = true;
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
