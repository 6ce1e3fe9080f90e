//! Constructive-solid-geometry model of the BEAVRS PWR benchmark core.
//!
//! The crate builds an in-memory model (materials, surfaces, cells, lattices,
//! run parameters) in [`builders`] and renders it into solver input documents
//! in [`render`].

pub mod builders;
pub mod common;
pub mod control;
pub mod domain;
pub mod model;
pub mod render;

pub use builders::{ReactorModel, build_beavrs_model};
pub use common::config::{ModelConfig, load_model_config};
pub use domain::{BuildError, BuildErrorCategory, BuildResult};
