use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const APPLICATION_DIR: &str = "daysplit";

/// Directory for logs and other application data. Uses `dir` when given, otherwise
/// $XDG_STATE_HOME/daysplit or $HOME/.local/state/daysplit (%APPDATA%\daysplit on Windows).
pub fn application_path(dir: Option<&Path>) -> Result<PathBuf> {
    let path = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_path()?,
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

fn default_path() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let mut path = PathBuf::from(
            env::var("APPDATA").context("APPDATA should be present on Windows")?,
        );
        path.push(APPLICATION_DIR);
        Ok(path)
    }
    #[cfg(not(windows))]
    {
        let mut path = env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                env::var("HOME").map(|home| {
                    let mut path = PathBuf::from(home);
                    path.push(".local/state");
                    path
                })
            })
            .context("Couldn't find neither XDG_STATE_HOME nor HOME")?;
        path.push(APPLICATION_DIR);
        Ok(path)
    }
}
