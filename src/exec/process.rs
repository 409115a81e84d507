// src/exec/process.rs

//! Individual action process runner.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, Instrument};

use crate::handlers::Action;

/// Launch the process described by `action`, log its output line by line and
/// wait for it to exit.
///
/// There is no timeout: a process that never exits blocks the run.
pub async fn run_process(action: &Action) -> io::Result<i32> {
    let mut cmd = Command::new(&action.program);
    cmd.args(&action.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &action.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn()?;
    debug!(pid = child.id(), "process started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain stderr concurrently so neither pipe can fill up and stall the child.
    let stderr_task =
        stderr.map(|stderr| tokio::spawn(log_output(stderr, "stderr").in_current_span()));

    if let Some(stdout) = stdout {
        log_output(stdout, "stdout").await;
    }

    let status = child.wait().await?;

    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    let code = status.code().unwrap_or(-1);
    debug!(exit_code = code, success = status.success(), "process exited");
    Ok(code)
}

/// Log every line read from `pipe` until EOF.
///
/// Lines are raw bytes (console code pages are not UTF-8) decoded lossily. A
/// read error ends the logging, never the process.
async fn log_output<R>(pipe: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']);
                info!(stream, "subprocess output: {}", line);
            }
            Err(e) => {
                debug!(stream, error = %e, "stopped reading subprocess output");
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_exit_code() {
        let ok = Action::new("sh").arg("-c").arg("echo hi; echo err >&2");
        assert_eq!(run_process(&ok).await.unwrap(), 0);

        let failing = Action::new("sh").arg("-c").arg("exit 3");
        assert_eq!(run_process(&failing).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn runs_in_working_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut action = Action::new("sh").arg("-c").arg("test -f marker");
        std::fs::write(tmp.path().join("marker"), b"").unwrap();
        action.working_dir = Some(tmp.path().to_path_buf());

        assert_eq!(run_process(&action).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn undecodable_output_does_not_cut_the_process_short() {
        let tmp = tempfile::tempdir().unwrap();
        let mut action = Action::new("sh").arg("-c").arg(
            "printf 'Gr\\374\\337e\\n'; printf '\\377\\n' >&2; sleep 0.2; touch done; exit 4",
        );
        action.working_dir = Some(tmp.path().to_path_buf());

        assert_eq!(run_process(&action).await.unwrap(), 4);
        assert!(tmp.path().join("done").exists());
    }

    #[tokio::test]
    async fn missing_program_is_launch_error() {
        let action = Action::new("/definitely/not/a/real/program");
        assert!(run_process(&action).await.is_err());
    }
}
