//! Host configuration
//!
//! Loaded from `~/.config/mx5kbleds/config.toml`; a missing file means
//! defaults. Colors are written as `[r, g, b]` arrays.

use std::fmt;
use std::path::{Path, PathBuf};

use mx5_keyleds::{RgbColor, StartupPalette, BRIGHTNESS_DEFAULT};
use mx5_wmi::{protocol, AcpiCallConfig};
use serde::{Deserialize, Serialize};

/// Message bus the daemon registers on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    #[default]
    Session,
    System,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("session"),
            Self::System => f.write_str("system"),
        }
    }
}

/// Palette applied when the daemon or shell starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_left")]
    pub left: [u8; 3],
    #[serde(default = "default_center")]
    pub center: [u8; 3],
    #[serde(default = "default_right")]
    pub right: [u8; 3],
    #[serde(default = "default_brightness")]
    pub brightness: u8,
}

fn default_true() -> bool {
    true
}

fn default_left() -> [u8; 3] {
    [255, 0, 0]
}

fn default_center() -> [u8; 3] {
    [0, 255, 0]
}

fn default_right() -> [u8; 3] {
    [0, 0, 255]
}

fn default_brightness() -> u8 {
    BRIGHTNESS_DEFAULT
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            left: default_left(),
            center: default_center(),
            right: default_right(),
            brightness: default_brightness(),
        }
    }
}

impl StartupConfig {
    pub fn palette(&self) -> StartupPalette {
        let rgb = |[r, g, b]: [u8; 3]| RgbColor::new(r, g, b);
        StartupPalette {
            left: rgb(self.left),
            center: rgb(self.center),
            right: rgb(self.right),
            brightness: self.brightness,
        }
    }
}

/// Complete host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// WMI interface GUID
    #[serde(default = "default_guid")]
    pub guid: String,
    /// ACPI method backing the WMI block
    #[serde(default = "default_method_path")]
    pub method_path: String,
    /// acpi_call control file
    #[serde(default = "default_acpi_call_path")]
    pub acpi_call_path: PathBuf,
    /// Directory listing WMI devices by GUID
    #[serde(default = "default_wmi_devices_dir")]
    pub wmi_devices_dir: PathBuf,
    #[serde(default)]
    pub bus: BusKind,
    #[serde(default)]
    pub startup: StartupConfig,
}

fn default_guid() -> String {
    protocol::MX5R2_GUID.to_string()
}

fn default_method_path() -> String {
    AcpiCallConfig::default().method_path
}

fn default_acpi_call_path() -> PathBuf {
    AcpiCallConfig::default().call_path
}

fn default_wmi_devices_dir() -> PathBuf {
    AcpiCallConfig::default().wmi_devices_dir
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            guid: default_guid(),
            method_path: default_method_path(),
            acpi_call_path: default_acpi_call_path(),
            wmi_devices_dir: default_wmi_devices_dir(),
            bus: BusKind::default(),
            startup: StartupConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(protocol::DRIVER_NAME)
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: DriverConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to a file that must not exist yet, unless `overwrite`
    pub fn create(&self, path: &Path, overwrite: bool) -> anyhow::Result<()> {
        if path.exists() && !overwrite {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        self.save(path)
    }

    /// Settings for the acpi_call backend
    pub fn acpi_config(&self) -> AcpiCallConfig {
        AcpiCallConfig {
            call_path: self.acpi_call_path.clone(),
            wmi_devices_dir: self.wmi_devices_dir.clone(),
            method_path: self.method_path.clone(),
        }
    }
}
