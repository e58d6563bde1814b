use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/radio/ (XDG standard)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("radio")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("radio")
    }
}

pub fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/radio/
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("radio")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("radio")
    }
}

#[cfg(unix)]
pub fn mpv_binary_name() -> &'static str {
    "mpv"
}

#[cfg(windows)]
pub fn mpv_binary_name() -> &'static str {
    "mpv.exe"
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|p| p.exists())
}

/// Find the mpv binary: `MPV_PATH`, beside the current exe, then PATH.
pub fn find_mpv_binary() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("MPV_PATH").map(PathBuf::from) {
        if p.exists() {
            return Some(p);
        }
    }

    let exe_name = mpv_binary_name();
    if let Ok(current_exe) = std::env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            let local_mpv = dir.join(exe_name);
            if local_mpv.exists() {
                return Some(local_mpv);
            }
        }
    }

    find_on_path(exe_name)
}
