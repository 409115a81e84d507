// src/handlers/mod.rs

//! Extension → handler registry.
//!
//! Every task file is handled according to its lower-cased extension. The
//! mapping is a fixed table; an extension missing from it has no handler and
//! the file is skipped.
//!
//! - [`action`] describes the process a handler launches.
//! - [`invoke`] runs a handler through an [`crate::exec::ActionBackend`] and
//!   applies the [`crate::types::ErrorPolicy`].

pub mod action;
pub mod invoke;

use std::fmt;
use std::path::Path;

use crate::config::HandlerSection;

pub use action::Action;
pub use invoke::{HandlerOutcome, invoke};

/// One variant per recognized task file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Msi,
    Reg,
    Lnk,
    Xml,
    Bat,
    Exe,
    Ps1,
}

/// The registry: extension (lower-case, no dot) → handler.
const REGISTRY: &[(&str, HandlerKind)] = &[
    ("bat", HandlerKind::Bat),
    ("exe", HandlerKind::Exe),
    ("lnk", HandlerKind::Lnk),
    ("msi", HandlerKind::Msi),
    ("ps1", HandlerKind::Ps1),
    ("reg", HandlerKind::Reg),
    ("xml", HandlerKind::Xml),
];

impl HandlerKind {
    /// Look up the handler for `extension`.
    ///
    /// The lookup is exact; callers pass the already lower-cased extension
    /// returned by [`task_extension`].
    pub fn from_extension(extension: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, kind)| *kind)
    }

    pub fn all() -> impl Iterator<Item = HandlerKind> {
        REGISTRY.iter().map(|(_, kind)| *kind)
    }

    pub fn extension(self) -> &'static str {
        match self {
            HandlerKind::Msi => "msi",
            HandlerKind::Reg => "reg",
            HandlerKind::Lnk => "lnk",
            HandlerKind::Xml => "xml",
            HandlerKind::Bat => "bat",
            HandlerKind::Exe => "exe",
            HandlerKind::Ps1 => "ps1",
        }
    }

    /// Human-readable description, shown in `--help`.
    pub fn description(self) -> &'static str {
        match self {
            HandlerKind::Msi => {
                "Executes MSI installer silently and waits until finished. Cancels restarts."
            }
            HandlerKind::Reg => "Applies registry patch.",
            HandlerKind::Lnk => "Executes shortcut and waits for process to exit.",
            HandlerKind::Xml => {
                "For XML files beginning with the Wi-Fi prefix (\"Wi-Fi-\"), registers the \
                 wireless profile. Ignores other XML files."
            }
            HandlerKind::Bat => "Runs batch script and waits until exit.",
            HandlerKind::Exe => "Runs executable and waits until exit.",
            HandlerKind::Ps1 => "Runs PowerShell script and waits until exit.",
        }
    }

    /// Describe the action for the task file at `path`.
    ///
    /// Returns `None` when the handler filters the file out by content
    /// (currently only non-profile `xml` files). That is a no-op, not a
    /// failure.
    pub fn resolve(self, path: &Path, settings: &HandlerSection) -> Option<Action> {
        let action = match self {
            HandlerKind::Msi => Action::new("msiexec")
                .arg("/i")
                .arg(path)
                .arg("/passive")
                .arg("/qr")
                .arg("/norestart")
                .in_dir_of(path),
            HandlerKind::Reg => Action::new("reg").arg("import").arg(path).in_dir_of(path),
            HandlerKind::Lnk => Action::new("cmd")
                .arg("/C")
                .arg("start")
                .arg("")
                .arg("/WAIT")
                .arg(path),
            HandlerKind::Xml => {
                let name = crate::fs::entry_name(path);
                if !name.starts_with(&settings.wifi_profile_prefix) {
                    return None;
                }
                let mut filename = std::ffi::OsString::from("filename=\"");
                filename.push(path);
                filename.push("\"");
                Action::new("netsh")
                    .arg("wlan")
                    .arg("add")
                    .arg("profile")
                    .arg(filename)
            }
            HandlerKind::Bat | HandlerKind::Exe => Action::new(path).in_dir_of(path),
            HandlerKind::Ps1 => Action::new(&settings.powershell).arg("-File").arg(path),
        };
        Some(action)
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Lower-cased extension of a task file name, without the dot.
///
/// Leading dots belong to the name (`.hidden` has no extension); a trailing
/// dot yields an empty extension.
pub fn task_extension(file_name: &str) -> String {
    file_name
        .trim_start_matches('.')
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Text for the `--help` epilogue listing every recognized file type.
pub fn recognized_types_help() -> String {
    let mut out = String::from("The following filetypes are recognized:\n\n");
    for kind in HandlerKind::all() {
        out.push_str(&format!("{}: {}\n\n", kind.extension(), kind.description()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings() -> HandlerSection {
        HandlerSection::default()
    }

    #[test]
    fn every_registered_extension_round_trips() {
        for kind in HandlerKind::all() {
            assert_eq!(HandlerKind::from_extension(kind.extension()), Some(kind));
        }
    }

    #[test]
    fn unknown_extensions_have_no_handler() {
        assert_eq!(HandlerKind::from_extension("txt"), None);
        assert_eq!(HandlerKind::from_extension(""), None);
        assert_eq!(HandlerKind::from_extension("MSI"), None);
    }

    #[test]
    fn extension_is_lower_cased_and_last_only() {
        assert_eq!(task_extension("Setup.MSI"), "msi");
        assert_eq!(task_extension("archive.tar.gz"), "gz");
        assert_eq!(task_extension("README"), "");
        assert_eq!(task_extension(".profile"), "");
        assert_eq!(task_extension("..hidden.reg"), "reg");
        assert_eq!(task_extension("trailing."), "");
    }

    #[test]
    fn installer_runs_in_its_own_directory() {
        let path = PathBuf::from("/deploy/All/1-apps/app.msi");
        let action = HandlerKind::Msi.resolve(&path, &settings()).unwrap();

        assert_eq!(action.program, PathBuf::from("msiexec"));
        assert_eq!(action.args[0], "/i");
        assert_eq!(action.args[1], path.as_os_str());
        assert_eq!(action.args[4], "/norestart");
        assert_eq!(action.working_dir, Some(PathBuf::from("/deploy/All/1-apps")));
    }

    #[test]
    fn scripts_and_executables_launch_the_file_itself() {
        let path = PathBuf::from("/deploy/All/2-tools/run.bat");
        let action = HandlerKind::Bat.resolve(&path, &settings()).unwrap();
        assert_eq!(action.program, path);
        assert!(action.args.is_empty());
        assert!(action.working_dir.is_some());

        let path = PathBuf::from("/deploy/All/2-tools/tool.exe");
        let action = HandlerKind::Exe.resolve(&path, &settings()).unwrap();
        assert_eq!(action.program, path);
    }

    #[test]
    fn powershell_uses_configured_interpreter_without_working_dir() {
        let mut s = settings();
        s.powershell = "pwsh".into();
        let path = PathBuf::from("/deploy/All/3-cfg/setup.ps1");
        let action = HandlerKind::Ps1.resolve(&path, &s).unwrap();

        assert_eq!(action.program, PathBuf::from("pwsh"));
        assert_eq!(action.args, vec!["-File".into(), path.into_os_string()]);
        assert_eq!(action.working_dir, None);
    }

    #[test]
    fn xml_only_registers_prefixed_profiles() {
        let wifi = PathBuf::from("/deploy/All/4-net/Wi-Fi-Home.xml");
        let notes = PathBuf::from("/deploy/All/4-net/Notes.xml");

        let action = HandlerKind::Xml.resolve(&wifi, &settings()).unwrap();
        assert_eq!(action.program, PathBuf::from("netsh"));
        assert_eq!(
            action.args.last().unwrap(),
            "filename=\"/deploy/All/4-net/Wi-Fi-Home.xml\""
        );
        assert_eq!(action.working_dir, None);

        assert_eq!(HandlerKind::Xml.resolve(&notes, &settings()), None);
    }

    #[test]
    fn help_lists_every_type() {
        let help = recognized_types_help();
        for kind in HandlerKind::all() {
            assert!(help.contains(&format!("{kind}: ")));
        }
    }
}
