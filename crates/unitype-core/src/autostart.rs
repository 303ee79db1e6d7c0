// Unitype Autostart
// Registers the binary to start with the desktop session

use std::path::{Path, PathBuf};

/// File name of the autostart entry
pub const DESKTOP_FILE_NAME: &str = "unitype.desktop";

/// Errors that can occur while installing the autostart entry
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Executable path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),
}

/// `$XDG_CONFIG_HOME/autostart`, usually `~/.config/autostart`
pub fn autostart_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("autostart"))
}

/// Quote an Exec argument using Desktop Entry quoting rules if it needs it
fn quote_exec_arg(arg: &str) -> String {
    const RESERVED: &[char] = &[
        ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
        ')', '`',
    ];
    if !arg.contains(RESERVED) {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Contents of the autostart entry that launches `exec`
pub fn desktop_entry(exec: &Path) -> Result<String, InstallError> {
    let exec_str = exec
        .to_str()
        .ok_or_else(|| InstallError::NonUtf8Path(exec.to_path_buf()))?;

    // Literal % must be doubled in Exec values
    let exec_value = quote_exec_arg(exec_str).replace('%', "%%");

    Ok(format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Unitype\n\
         Comment=Type Unicode characters with Ctrl+Shift+U\n\
         Exec={}\n\
         Terminal=false\n\
         NoDisplay=true\n\
         X-GNOME-Autostart-enabled=true\n",
        exec_value
    ))
}

/// Write the autostart entry for `exec` into `dir`, replacing any previous
/// one. Returns the path written.
pub fn install_in(dir: &Path, exec: &Path) -> Result<PathBuf, InstallError> {
    let entry = desktop_entry(exec)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(DESKTOP_FILE_NAME);
    std::fs::write(&path, entry)?;
    Ok(path)
}

/// Register the running executable to start at login
pub fn install() -> Result<PathBuf, InstallError> {
    let dir = autostart_dir().ok_or(InstallError::NoConfigDir)?;
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let path = install_in(&dir, &exe)?;
    log::info!("installed autostart entry {}", path.display());
    Ok(path)
}
