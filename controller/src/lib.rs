#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod cli;

pub use self::cli::Args;
pub use infra_controller_control_plane as control_plane;
pub use infra_controller_core as model;
pub use infra_controller_endpoint as endpoint;
pub use infra_controller_manifests as manifests;
