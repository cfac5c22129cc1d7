//! Host platform detection and platform-specific commands

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::cmd::{is_cmd_exist, run_cmd};
use crate::error::{Error, Result};

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Classify a `std::env::consts::OS` value.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            _ => Platform::Other,
        }
    }

    /// System name as `uname` reports it.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOs => "Darwin",
            Platform::Other => std::env::consts::OS,
        }
    }

    pub fn clear_command(&self) -> &'static str {
        match self {
            Platform::Windows => "cls",
            _ => "clear",
        }
    }

    pub fn file_manager(&self) -> &'static str {
        match self {
            Platform::Windows => "Explorer",
            Platform::MacOs => "Finder",
            _ => "file manager",
        }
    }
}

/// A value that may differ per platform.
///
/// Map keys are platform names (`Windows`, `Linux`, `Darwin`, matched without
/// regard to case) plus `*` for the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformValue<T> {
    Single(T),
    PerPlatform(HashMap<String, T>),
}

impl<T> PlatformValue<T> {
    pub fn per_platform<K: Into<String>>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        PlatformValue::PerPlatform(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Value for the running platform.
    pub fn resolve(&self) -> Option<&T> {
        self.resolve_for(Platform::current())
    }

    pub fn resolve_for(&self, platform: Platform) -> Option<&T> {
        match self {
            PlatformValue::Single(v) => Some(v),
            PlatformValue::PerPlatform(map) => map
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(platform.name()))
                .map(|(_, v)| v)
                .or_else(|| map.get("*")),
        }
    }
}

impl<T> From<T> for PlatformValue<T> {
    fn from(v: T) -> Self {
        PlatformValue::Single(v)
    }
}

/// A package manager known to [`install_package`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManager {
    pub name: &'static str,
    /// Executable that must be on `PATH`
    pub command: &'static str,
    /// Command line with `{}` standing for the package
    pub commandline: &'static str,
}

pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager { name: "scoop", command: "scoop", commandline: "scoop install {}" },
    PackageManager { name: "choco", command: "choco", commandline: "choco install {}" },
    PackageManager { name: "brew", command: "brew", commandline: "brew install {}" },
    PackageManager { name: "port", command: "port", commandline: "sudo port install {}" },
    PackageManager { name: "apt", command: "apt", commandline: "sudo apt install {}" },
    PackageManager { name: "snap", command: "snap", commandline: "sudo snap install {}" },
    PackageManager { name: "pip", command: "pip", commandline: "pip install --user {}" },
    PackageManager { name: "pip3", command: "pip3", commandline: "pip3 install --user {}" },
    PackageManager { name: "pipx", command: "pipx", commandline: "pipx install {}" },
    PackageManager { name: "npm", command: "npm", commandline: "npm install -g {}" },
    PackageManager { name: "cargo", command: "cargo", commandline: "cargo install {}" },
];

impl PackageManager {
    pub fn find(name: &str) -> Option<&'static PackageManager> {
        PACKAGE_MANAGERS.iter().find(|m| m.name == name)
    }

    pub fn install_command(&self, package: &str) -> String {
        self.commandline.replace("{}", package)
    }
}

/// scoop on Windows, apt on Linux, brew on macOS, cargo elsewhere.
pub fn default_manager() -> PlatformValue<String> {
    PlatformValue::per_platform([
        ("Windows", "scoop".to_string()),
        ("Linux", "apt".to_string()),
        ("Darwin", "brew".to_string()),
        ("*", "cargo".to_string()),
    ])
}

/// Resolve the manager and package for this platform and install it.
pub fn install_package(
    name: &PlatformValue<String>,
    manager: &PlatformValue<String>,
) -> Result<bool> {
    let platform = Platform::current();
    info!("platform: {}", platform.name());

    let package = match name.resolve_for(platform) {
        Some(p) if !p.is_empty() => p,
        _ => return Err(Error::EmptyPackageName),
    };
    let manager_name = manager.resolve_for(platform).cloned().unwrap_or_default();
    info!("package manager: {}", manager_name);
    info!("package name: {}", package);

    let manager = PackageManager::find(&manager_name)
        .ok_or_else(|| Error::UnsupportedManager(manager_name.clone()))?;
    if !is_cmd_exist(manager.command) {
        return Err(Error::CommandNotFound(manager.command.to_string()));
    }
    Ok(run_cmd(&manager.install_command(package)))
}

/// Clear the terminal.
pub fn clear_screen() -> Result<bool> {
    let cmd = Platform::current().clear_command();
    let status = if cfg!(windows) {
        Command::new("cmd").args(["/C", cmd]).status()?
    } else {
        Command::new(cmd).status()?
    };
    Ok(status.success())
}

/// Open `path` in Explorer, Finder or the desktop's file manager.
pub fn show_in_file_manager(path: &Path) -> Result<()> {
    let opener = match Platform::current() {
        Platform::Windows => "explorer",
        Platform::MacOs => "open",
        _ => "xdg-open",
    };
    info!("show in {}: {}", Platform::current().file_manager(), path.display());
    Command::new(opener).arg(path).spawn()?;
    Ok(())
}

/// Whether the process runs with administrator rights. Only answered on
/// Windows.
pub fn is_admin() -> Option<bool> {
    if Platform::current() != Platform::Windows {
        return None;
    }
    Command::new("net")
        .arg("session")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .ok()
        .map(|s| s.success())
}

/// Launch `program` with administrator rights through the UAC prompt.
///
/// Returns whether the elevated launch was started. Windows only.
pub fn runas_admin(program: &Path) -> Result<bool> {
    if Platform::current() != Platform::Windows {
        return Err(Error::Unsupported("runas_admin"));
    }
    if !program.is_file() {
        return Err(Error::SourceNotFound {
            path: program.to_path_buf(),
        });
    }
    info!("run as admin: {}", program.display());
    let script = format!(
        "Start-Process -FilePath '{}' -Verb RunAs",
        program.display().to_string().replace('\'', "''")
    );
    let status = Command::new("powershell")
        .args(["-NoProfile", "-Command", &script])
        .status()?;
    Ok(status.success())
}
