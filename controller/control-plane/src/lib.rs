#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod config;
pub mod descriptor;
mod error;
pub mod kubeconfig;
mod reconcile;
pub mod secrets;
pub mod static_pod;

pub use self::{
    config::{ControlPlaneConfig, Images},
    descriptor::control_plane_pod,
    error::Error,
    kubeconfig::Component,
    reconcile::{ControlPlane, Hypervisors},
    secrets::{SecretBundle, SecretsDir},
};
