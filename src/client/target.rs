use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::client::{ClientError, DesktopTarget};

/// [`DesktopTarget`] that shells out to a wallpaper setter (`feh`, `swww`, `osascript`, ...).
///
/// `{path}` and `{display}` in `args` are substituted per call. Without configured displays
/// a single `"default"` display is assumed.
#[derive(Clone, Debug)]
pub struct CommandTarget {
    program: String,
    args: Vec<String>,
    displays: Vec<String>,
}

impl CommandTarget {
    pub fn new(program: impl Into<String>, args: Vec<String>, displays: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            displays,
        }
    }

    fn expand_args(&self, display: &str, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace("{path}", &path).replace("{display}", display))
            .collect()
    }
}

#[async_trait]
impl DesktopTarget for CommandTarget {
    fn displays(&self) -> Vec<String> {
        if self.displays.is_empty() {
            vec!["default".to_string()]
        } else {
            self.displays.clone()
        }
    }

    async fn set_background(&self, display: &str, path: &Path) -> Result<(), ClientError> {
        let output = Command::new(&self.program)
            .args(self.expand_args(display, path))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ClientError::Apply {
                display: display.to_string(),
                message: format!("spawn '{}': {e}", self.program),
            })?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ClientError::Apply {
            display: display.to_string(),
            message: format!("'{}' exited with {}: {}", self.program, output.status, stderr.trim()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/target.rs"]
mod tests;
