// src/engine/mod.rs

//! Ordered task-discovery-and-dispatch engine.
//!
//! - [`context`]: per-run flags and memoized machine facts.
//! - [`pool`]: which task directories run, in which order.
//! - [`processor`]: the files of one task directory, in order, each
//!   dispatched to its handler with failures contained per file.
//! - [`gate`]: virtual-machine and elevation checks before a run.
//! - [`dispatch`]: ties the above together for one run.

pub mod context;
pub mod dispatch;
pub mod gate;
pub mod pool;
pub mod processor;

pub use context::RunContext;
pub use dispatch::{Dispatcher, RunReport};
pub use gate::GateDecision;
pub use pool::{PoolAssembler, TaskDirectory, TaskPool};
pub use processor::{DirectoryReport, TaskDirProcessor, TaskItem, TaskRecord, TaskStatus};
