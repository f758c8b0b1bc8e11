//! Device control for the wired mod platform.
//!
//! This crate owns everything that touches the running robot:
//! - the engine command channel used to select a safe behavior,
//! - service control over the platform's systemd units,
//! - the lifecycle controller that quiesces and resumes the platform
//!   around filesystem mutations,
//! - the stock backpack asset restore sequence.

pub mod assets;
pub mod channel;
pub mod error;
pub mod lifecycle;
pub mod services;

pub use channel::{BehaviorCommand, CommandChannel};
pub use error::{DeviceError, Result};
pub use lifecycle::{behaviors, units, DeviceLifecycle, LifecycleTiming};
pub use services::{ServiceController, SubmitStatus, Systemctl};
