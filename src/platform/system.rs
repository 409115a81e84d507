// src/platform/system.rs

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info, warn};

use super::Platform;
use crate::errors::{DeployError, Result};

/// [`Platform`] backed by the running operating system.
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    /// Arguments to forward to an elevated relaunch (without the program name).
    args: Vec<String>,
}

impl SystemPlatform {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Platform that forwards this process' own command-line arguments.
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1).collect())
    }
}

/// Run a short query command and return its trimmed stdout on success.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        Ok(out) => {
            debug!(program, exit_code = out.status.code(), "query command failed");
            None
        }
        Err(e) => {
            debug!(program, error = %e, "query command could not be launched");
            None
        }
    }
}

/// Map the exit status of an awaited elevated run to the relaunch result.
///
/// A sudo that exits unsuccessfully (refused password, no sudoers entry, or a
/// failing elevated run) is an elevation error.
#[cfg_attr(windows, allow(dead_code))]
fn relaunch_status(exe: &Path, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    warn!(exe = ?exe, exit_code = status.code(), "elevated run did not succeed");
    Err(DeployError::Elevation(match status.code() {
        Some(code) => format!("elevated run of {:?} exited with code {code}", exe),
        None => format!("elevated run of {:?} was terminated by a signal", exe),
    }))
}

/// PowerShell single-quoted literal.
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

impl Platform for SystemPlatform {
    fn query_machine_model(&self) -> Option<String> {
        if cfg!(windows) {
            capture(
                "powershell.exe",
                &["(Get-CimInstance -ClassName Win32_ComputerSystem).Model"],
            )
        } else {
            std::fs::read_to_string("/sys/class/dmi/id/product_name")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }
    }

    fn is_elevated(&self) -> bool {
        if cfg!(windows) {
            // `net session` needs administrator rights.
            Command::new("net")
                .arg("session")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|s| s.success())
                .unwrap_or(false)
        } else {
            capture("id", &["-u"]).as_deref() == Some("0")
        }
    }

    fn relaunch_elevated(&self) -> Result<()> {
        let exe = std::env::current_exe()?;
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let mut cmd = if cfg!(windows) {
            let mut script = format!(
                "Start-Process -Verb RunAs -FilePath {} -WorkingDirectory {}",
                ps_quote(&exe.to_string_lossy()),
                ps_quote(&cwd.to_string_lossy()),
            );
            if !self.args.is_empty() {
                let quoted: Vec<String> = self.args.iter().map(|a| ps_quote(a)).collect();
                script.push_str(&format!(" -ArgumentList {}", quoted.join(",")));
            }
            let mut c = Command::new("powershell.exe");
            c.arg("-NoProfile").arg("-Command").arg(script);
            c
        } else {
            let mut c = Command::new("sudo");
            c.arg("--").arg(&exe).args(&self.args).current_dir(&cwd);
            c
        };

        info!(exe = ?exe, "requesting elevation");
        let launch_error = |e: std::io::Error| {
            warn!(error = %e, "elevation request failed");
            DeployError::Elevation(format!("could not relaunch {:?} elevated: {e}", exe))
        };

        if cfg!(windows) {
            // UAC starts the elevated instance detached from this console.
            cmd.spawn().map_err(launch_error)?;
            Ok(())
        } else {
            // sudo shares the terminal; hand it over until the elevated run ends.
            let status = cmd.status().map_err(launch_error)?;
            relaunch_status(&exe, status)
        }
    }
}
