//! # Reactant
//!
//! Host for a simulated reactor: drives its fluid tanks once per tick and
//! publishes tank snapshots to observers whenever the tanks decide a change
//! is worth sending.
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    clippy::unwrap_used
)]
#![allow(
    clippy::single_call_fn,
    clippy::multiple_inherent_impl,
    clippy::shadow_unrelated,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]

pub mod config;
pub mod host;
pub mod logger;

pub use config::{CONFIG_PATH, ConfigError, ReactorConfig};
pub use host::{ReactorHost, TankUpdate, observe};
