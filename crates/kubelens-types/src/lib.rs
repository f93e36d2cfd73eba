//! Shared types for kubelens
//!
//! This crate contains the projection records sent over the wire and the
//! cluster connection metadata shared across kubelens crates. Each
//! projection is a fixed subset of the upstream resource object; fields the
//! upstream object does not carry project as null rather than failing the
//! call.

use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Cluster Connection Metadata
// ============================================================================

/// Connection descriptor extracted from kubeconfig at startup.
///
/// Immutable after construction; the dispatcher carries it by value so
/// concurrent invocations share no mutable state.
#[derive(Clone, Debug, Default)]
pub struct ClusterContext {
    pub context_name: Option<String>,
    pub cluster_name: Option<String>,
    pub server: Option<String>,
}

/// API server metadata fetched in a single upstream call.
#[derive(Clone, Debug, Default)]
pub struct ClusterMetadata {
    pub major: String,
    pub minor: String,
    pub git_version: String,
    pub platform: String,
    pub api_versions: Vec<String>,
}

/// Combined cluster information for `get_cluster_info`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub context: Option<String>,
    pub cluster: ClusterDescriptor,
    pub version: VersionSummary,
    pub api_versions: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDescriptor {
    pub name: Option<String>,
    pub server: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub major: String,
    pub minor: String,
    pub git_version: String,
    pub platform: String,
}

// ============================================================================
// Pod Projections
// ============================================================================

/// Pod summary for list operations.
///
/// Exactly these six fields, always present; absent upstream values
/// serialize as null.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub status: Option<String>,
    pub ip: Option<String>,
    pub node: Option<String>,
    pub creation_timestamp: Option<String>,
}

/// Pod detail for describe operations.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodDetail {
    pub name: String,
    pub namespace: String,
    pub status: Option<String>,
    pub ip: Option<String>,
    pub node: Option<String>,
    pub creation_timestamp: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub containers: Vec<ContainerSummary>,
}

/// Per-container state within a pod.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub name: String,
    pub image: Option<String>,
    pub ready: bool,
    pub restart_count: i32,
}

// ============================================================================
// Service Projections
// ============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub cluster_ip: Option<String>,
    pub ports: Vec<ServicePortSummary>,
    pub creation_timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub cluster_ip: Option<String>,
    pub ports: Vec<ServicePortSummary>,
    pub selector: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub creation_timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePortSummary {
    pub port: i32,
    pub protocol: Option<String>,
    pub node_port: Option<i32>,
}

// ============================================================================
// Deployment Projections
// ============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
    pub creation_timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDetail {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
    pub labels: BTreeMap<String, String>,
    pub selector: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub creation_timestamp: Option<String>,
}

// ============================================================================
// Node Projections
// ============================================================================

/// Node summary for list operations.
///
/// `status` is derived from the node's Ready condition and `roles` from the
/// `node-role.kubernetes.io/` label prefix; neither exists verbatim on the
/// upstream object.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub name: String,
    pub status: String,
    pub roles: Vec<String>,
    pub kubelet_version: Option<String>,
    pub creation_timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub name: String,
    pub status: String,
    pub roles: Vec<String>,
    pub kubelet_version: Option<String>,
    pub os_image: Option<String>,
    pub architecture: Option<String>,
    pub container_runtime: Option<String>,
    pub addresses: Vec<NodeAddress>,
    pub capacity: NodeCapacity,
    pub labels: BTreeMap<String, String>,
    pub creation_timestamp: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub address_type: String,
    pub address: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCapacity {
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub pods: Option<String>,
}

// ============================================================================
// Namespace & ConfigMap Projections
// ============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    pub name: String,
    pub status: Option<String>,
    pub creation_timestamp: Option<String>,
}

/// ConfigMap summary for list operations.
///
/// Carries only the key set, never the values.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapSummary {
    pub name: String,
    pub namespace: String,
    pub data_keys: Vec<String>,
    pub creation_timestamp: Option<String>,
}

/// ConfigMap detail for an explicit single-object describe.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapDetail {
    pub name: String,
    pub namespace: String,
    pub data: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub creation_timestamp: Option<String>,
}
