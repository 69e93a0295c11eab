use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
});

pub static PATH_LOCAL_SHARE: LazyLock<PathBuf> = LazyLock::new(|| PATH_HOME.join(".local/share"));

/// Data directory: $XDG_DATA_HOME/quicksave-pool or ~/.local/share/quicksave-pool
pub static PATH_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("quicksave-pool");
    }
    PATH_LOCAL_SHARE.join("quicksave-pool")
});

pub static PATH_SETTINGS: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("settings.json"));

pub static PATH_SAVES: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("saves"));
