//! Kubernetes client for kubelens
//!
//! This crate provides the upstream cluster access layer: the [`ClusterOps`]
//! seam the dispatcher calls through, and [`KubeClient`], a kube-backed
//! implementation constructed once at startup from kubeconfig.

mod client;
mod ops;

pub use client::{ConnectOptions, KubeClient};
pub use ops::ClusterOps;

// Re-export types that are used in our public API
pub use kubelens_types::{ClusterContext, ClusterMetadata};
