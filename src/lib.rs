//! Deterministic operating-system simulation for the U-Engine ecosystem.
//!
//! Replays two classic OS problems in discrete cycles:
//! - **CPU scheduling**: a process set is run on a single CPU under one of
//!   five policies (FIFO, SJF, SRT, Round Robin, Priority), producing a
//!   [`models::Schedule`] and per-process waiting/turnaround times.
//! - **Resource synchronization**: timed resource requests are replayed
//!   under a mutex or counting-semaphore discipline, producing a
//!   [`models::Timeline`] of accesses, waits, and hand-offs.
//!
//! Every run is a pure function of its input: identical input yields an
//! identical result, and each run owns the entities it mutates.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Resource`, `Action`,
//!   `Schedule`, `Timeline`
//! - **`validation`**: Input integrity checks (identifiers, numeric ranges,
//!   resource and process references)
//! - **`scheduler`**: Scheduling policies, the `Scheduler` driver, KPIs
//! - **`sync`**: Mutex and Semaphore disciplines, the `Synchronizer` driver
//! - **`loader`**: Line-oriented text record parsing
//! - **`workload`**: Seeded random workload generation
//! - **`error`**: `SimError` (validation or simulation failure)
//!
//! # Logging
//!
//! Diagnostics go through the `log` facade: run summaries at `debug`,
//! per-decision detail at `trace`, rejected input at `warn`. The crate
//! never installs a logger.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5-6
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2

pub mod error;
pub mod guard;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod sync;
pub mod validation;
pub mod workload;

pub use error::{SimError, SimResult, SimulationError, SimulationErrorKind};
