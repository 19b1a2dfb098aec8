//! sr-kernel: mission rate kernel for skyrate.
//!
//! Evaluates specific energy rate, altitude rate, ground speed and their
//! maximum-thrust counterparts for a fixed-size batch of flight states, with
//! the full analytic Jacobian w.r.t. every input.
//!
//! Contains:
//! - config (serde schema, YAML/JSON loaders, validation)
//! - mission (the wired block graph)
//! - state / outputs / jacobian (per-call data)
//! - check (central-difference derivative verification)

pub mod check;
pub mod config;
pub mod error;
pub mod jacobian;
pub mod mission;
pub mod outputs;
pub mod state;

pub use check::{CheckOptions, CheckReport, PartialCheck, check_partials, numerical_jacobian};
pub use config::{
    ConfigError, KernelConfig, from_json_str, from_yaml_str, load_json, load_yaml, save_json,
    save_yaml,
};
pub use error::{KernelError, KernelResult};
pub use jacobian::Jacobian;
pub use mission::MissionEom;
pub use outputs::{RATE_OUTPUT_NAMES, RateOutputs};
pub use state::{FlightState, INPUT_NAMES};
