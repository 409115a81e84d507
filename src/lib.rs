// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod handlers;
pub mod logging;
pub mod order;
pub mod platform;
pub mod types;

use std::path::PathBuf;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::resolve_config;
use crate::engine::{Dispatcher, GateDecision, RunContext};
use crate::errors::Result;
use crate::exec::RealActionBackend;
use crate::fs::RealFileSystem;
use crate::platform::SystemPlatform;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - gating (virtual-machine check, elevation)
/// - logging setup
/// - pool assembly and sequential task dispatch
///
/// Task failures never make this return an error; only problems before the
/// run starts do.
pub async fn run(args: CliArgs) -> Result<()> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let fs = RealFileSystem;
    let platform = SystemPlatform::from_env();

    let cfg = resolve_config(&fs, &root, args.config.as_deref())?;
    let ctx = RunContext::from_args(&args);
    let dispatcher = Dispatcher::new(&fs, &platform, &cfg, &ctx, &root);

    match dispatcher.gate()? {
        GateDecision::Proceed => {}
        GateDecision::VirtualMachine => {
            // The requested log file was just removed; report on stderr only.
            logging::init_logging(args.log_level, None)?;
            info!("virtual machine detected, skipping deployment");
            return Ok(());
        }
        GateDecision::Relaunched => return Ok(()),
    }

    logging::init_logging(args.log_level, ctx.log_file.as_deref())?;

    let mut backend = RealActionBackend::new();
    dispatcher.dispatch(&mut backend).await;

    Ok(())
}
