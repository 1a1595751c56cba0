//! Shared test utilities for the overlay-render workspace.
//!
//! This crate provides standardised fixtures to avoid duplicating bundle
//! setup across crate test suites. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`bundle`]: [`BundleBuilder`](bundle::BundleBuilder) for manifests with
//!   encoded overlay files
//! - [`engine`]: engines that record their input or fail on demand

pub mod bundle;
pub mod engine;

/// A generated manifest holding one ConfigMap named `generated`.
pub const GENERATED_CONFIG_MAP: &str =
    "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: generated\ndata:\n  key: value\n";

/// A standalone Service named `other`.
pub const OTHER_SERVICE: &str =
    "apiVersion: v1\nkind: Service\nmetadata:\n  name: other\nspec:\n  ports:\n  - port: 80\n";
