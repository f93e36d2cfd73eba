//! Projections from raw upstream objects into stable wire records.
//!
//! Extraction is tolerant by contract: a field the upstream object lacks
//! projects as null, never an error. Only the absence of the whole object is
//! a failure, and that surfaces upstream as a rejected describe call.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Node, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

use kubelens_types::{
    ClusterContext, ClusterDescriptor, ClusterInfo, ClusterMetadata, ConfigMapDetail,
    ConfigMapSummary, ContainerSummary, DeploymentDetail, DeploymentSummary, NamespaceSummary,
    NodeAddress, NodeCapacity, NodeDetail, NodeSummary, PodDetail, PodSummary, ServiceDetail,
    ServicePortSummary, ServiceSummary, VersionSummary,
};

/// Label prefix marking node roles, e.g. `node-role.kubernetes.io/control-plane`.
const NODE_ROLE_PREFIX: &str = "node-role.kubernetes.io/";

fn timestamp(meta: &ObjectMeta) -> Option<String> {
    meta.creation_timestamp
        .as_ref()
        .map(|Time(at)| at.to_rfc3339())
}

fn labels(meta: &ObjectMeta) -> std::collections::BTreeMap<String, String> {
    meta.labels.clone().unwrap_or_default()
}

pub fn cluster_info(context: &ClusterContext, metadata: ClusterMetadata) -> ClusterInfo {
    ClusterInfo {
        context: context.context_name.clone(),
        cluster: ClusterDescriptor {
            name: context.cluster_name.clone(),
            server: context.server.clone(),
        },
        version: VersionSummary {
            major: metadata.major,
            minor: metadata.minor,
            git_version: metadata.git_version,
            platform: metadata.platform,
        },
        api_versions: metadata.api_versions,
    }
}

// ============================================================================
// Pods
// ============================================================================

pub fn pod_summary(pod: &Pod) -> PodSummary {
    PodSummary {
        name: pod.metadata.name.clone().unwrap_or_default(),
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        status: pod.status.as_ref().and_then(|s| s.phase.clone()),
        ip: pod.status.as_ref().and_then(|s| s.pod_ip.clone()),
        node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
        creation_timestamp: timestamp(&pod.metadata),
    }
}

pub fn pod_detail(pod: &Pod) -> PodDetail {
    let summary = pod_summary(pod);
    let containers = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| {
            statuses
                .iter()
                .map(|cs| ContainerSummary {
                    name: cs.name.clone(),
                    image: Some(cs.image.clone()),
                    ready: cs.ready,
                    restart_count: cs.restart_count,
                })
                .collect()
        })
        .unwrap_or_default();

    PodDetail {
        name: summary.name,
        namespace: summary.namespace,
        status: summary.status,
        ip: summary.ip,
        node: summary.node,
        creation_timestamp: summary.creation_timestamp,
        labels: labels(&pod.metadata),
        containers,
    }
}

// ============================================================================
// Services
// ============================================================================

fn service_ports(service: &Service) -> Vec<ServicePortSummary> {
    service
        .spec
        .as_ref()
        .and_then(|s| s.ports.as_ref())
        .map(|ports| {
            ports
                .iter()
                .map(|p| ServicePortSummary {
                    port: p.port,
                    protocol: p.protocol.clone(),
                    node_port: p.node_port,
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn service_summary(service: &Service) -> ServiceSummary {
    ServiceSummary {
        name: service.metadata.name.clone().unwrap_or_default(),
        namespace: service.metadata.namespace.clone().unwrap_or_default(),
        service_type: service.spec.as_ref().and_then(|s| s.type_.clone()),
        cluster_ip: service.spec.as_ref().and_then(|s| s.cluster_ip.clone()),
        ports: service_ports(service),
        creation_timestamp: timestamp(&service.metadata),
    }
}

pub fn service_detail(service: &Service) -> ServiceDetail {
    let summary = service_summary(service);

    ServiceDetail {
        name: summary.name,
        namespace: summary.namespace,
        service_type: summary.service_type,
        cluster_ip: summary.cluster_ip,
        ports: summary.ports,
        selector: service
            .spec
            .as_ref()
            .and_then(|s| s.selector.clone())
            .unwrap_or_default(),
        labels: labels(&service.metadata),
        creation_timestamp: summary.creation_timestamp,
    }
}

// ============================================================================
// Deployments
// ============================================================================

pub fn deployment_summary(deployment: &Deployment) -> DeploymentSummary {
    DeploymentSummary {
        name: deployment.metadata.name.clone().unwrap_or_default(),
        namespace: deployment.metadata.namespace.clone().unwrap_or_default(),
        replicas: deployment
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(0),
        ready_replicas: deployment
            .status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0),
        available_replicas: deployment
            .status
            .as_ref()
            .and_then(|s| s.available_replicas)
            .unwrap_or(0),
        creation_timestamp: timestamp(&deployment.metadata),
    }
}

pub fn deployment_detail(deployment: &Deployment) -> DeploymentDetail {
    let summary = deployment_summary(deployment);
    let images = deployment
        .spec
        .as_ref()
        .and_then(|s| s.template.spec.as_ref())
        .map(|pod_spec| {
            pod_spec
                .containers
                .iter()
                .filter_map(|c| c.image.clone())
                .collect()
        })
        .unwrap_or_default();

    DeploymentDetail {
        name: summary.name,
        namespace: summary.namespace,
        replicas: summary.replicas,
        ready_replicas: summary.ready_replicas,
        available_replicas: summary.available_replicas,
        labels: labels(&deployment.metadata),
        selector: deployment
            .spec
            .as_ref()
            .and_then(|s| s.selector.match_labels.clone())
            .unwrap_or_default(),
        images,
        creation_timestamp: summary.creation_timestamp,
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Derive readiness from the node's condition list. Anything other than a
/// Ready condition with status "True" (including no conditions at all) is
/// NotReady.
fn node_readiness(node: &Node) -> String {
    let ready = node
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .is_some_and(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        });

    if ready { "Ready" } else { "NotReady" }.to_string()
}

/// Role names from `node-role.kubernetes.io/` labels, prefix stripped.
fn node_roles(node: &Node) -> Vec<String> {
    node.metadata
        .labels
        .as_ref()
        .map(|labels| {
            labels
                .keys()
                .filter_map(|key| key.strip_prefix(NODE_ROLE_PREFIX))
                .filter(|role| !role.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn node_summary(node: &Node) -> NodeSummary {
    NodeSummary {
        name: node.metadata.name.clone().unwrap_or_default(),
        status: node_readiness(node),
        roles: node_roles(node),
        kubelet_version: node
            .status
            .as_ref()
            .and_then(|s| s.node_info.as_ref())
            .map(|info| info.kubelet_version.clone()),
        creation_timestamp: timestamp(&node.metadata),
    }
}

pub fn node_detail(node: &Node) -> NodeDetail {
    let summary = node_summary(node);
    let info = node.status.as_ref().and_then(|s| s.node_info.as_ref());
    let addresses = node
        .status
        .as_ref()
        .and_then(|s| s.addresses.as_ref())
        .map(|addresses| {
            addresses
                .iter()
                .map(|a| NodeAddress {
                    address_type: a.type_.clone(),
                    address: a.address.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    let capacity = node
        .status
        .as_ref()
        .and_then(|s| s.capacity.as_ref())
        .map(|capacity| NodeCapacity {
            cpu: capacity.get("cpu").map(|q| q.0.clone()),
            memory: capacity.get("memory").map(|q| q.0.clone()),
            pods: capacity.get("pods").map(|q| q.0.clone()),
        })
        .unwrap_or_default();

    NodeDetail {
        name: summary.name,
        status: summary.status,
        roles: summary.roles,
        kubelet_version: summary.kubelet_version,
        os_image: info.map(|i| i.os_image.clone()),
        architecture: info.map(|i| i.architecture.clone()),
        container_runtime: info.map(|i| i.container_runtime_version.clone()),
        addresses,
        capacity,
        labels: labels(&node.metadata),
        creation_timestamp: summary.creation_timestamp,
    }
}

// ============================================================================
// Namespaces & ConfigMaps
// ============================================================================

pub fn namespace_summary(namespace: &Namespace) -> NamespaceSummary {
    NamespaceSummary {
        name: namespace.metadata.name.clone().unwrap_or_default(),
        status: namespace.status.as_ref().and_then(|s| s.phase.clone()),
        creation_timestamp: timestamp(&namespace.metadata),
    }
}

/// Key set only; values never leave the cluster through a listing.
pub fn configmap_summary(configmap: &ConfigMap) -> ConfigMapSummary {
    ConfigMapSummary {
        name: configmap.metadata.name.clone().unwrap_or_default(),
        namespace: configmap.metadata.namespace.clone().unwrap_or_default(),
        data_keys: configmap
            .data
            .as_ref()
            .map(|data| data.keys().cloned().collect())
            .unwrap_or_default(),
        creation_timestamp: timestamp(&configmap.metadata),
    }
}

pub fn configmap_detail(configmap: &ConfigMap) -> ConfigMapDetail {
    ConfigMapDetail {
        name: configmap.metadata.name.clone().unwrap_or_default(),
        namespace: configmap.metadata.namespace.clone().unwrap_or_default(),
        data: configmap.data.clone().unwrap_or_default(),
        labels: labels(&configmap.metadata),
        creation_timestamp: timestamp(&configmap.metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{NodeCondition, NodeStatus, PodSpec, PodStatus};
    use std::collections::BTreeMap;

    fn node_with_conditions(conditions: Option<Vec<NodeCondition>>) -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some("worker-1".to_string()),
                ..Default::default()
            },
            status: Some(NodeStatus {
                conditions,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn ready_condition(status: &str) -> NodeCondition {
        NodeCondition {
            type_: "Ready".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn pod_summary_projects_exactly_six_fields() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: Some(PodSpec {
                node_name: Some("worker-1".to_string()),
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                pod_ip: Some("10.0.0.12".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(pod_summary(&pod)).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["creationTimestamp", "ip", "name", "namespace", "node", "status"]
        );
        assert_eq!(value["status"], "Running");
        assert_eq!(value["ip"], "10.0.0.12");
        assert_eq!(value["node"], "worker-1");
    }

    #[test]
    fn creation_timestamps_project_as_rfc3339() {
        use chrono::{TimeZone, Utc};

        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                creation_timestamp: Some(Time(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            pod_summary(&pod).creation_timestamp.as_deref(),
            Some("2024-05-01T12:00:00+00:00")
        );
    }

    #[test]
    fn pod_summary_tolerates_a_bare_object() {
        let value = serde_json::to_value(pod_summary(&Pod::default())).unwrap();

        assert_eq!(value["name"], "");
        assert_eq!(value["status"], serde_json::Value::Null);
        assert_eq!(value["creationTimestamp"], serde_json::Value::Null);
    }

    #[test]
    fn node_with_true_ready_condition_is_ready() {
        let node = node_with_conditions(Some(vec![ready_condition("True")]));
        assert_eq!(node_summary(&node).status, "Ready");
    }

    #[test]
    fn node_with_false_or_absent_ready_condition_is_not_ready() {
        let false_ready = node_with_conditions(Some(vec![ready_condition("False")]));
        assert_eq!(node_summary(&false_ready).status, "NotReady");

        let no_conditions = node_with_conditions(None);
        assert_eq!(node_summary(&no_conditions).status, "NotReady");

        let unrelated = node_with_conditions(Some(vec![NodeCondition {
            type_: "DiskPressure".to_string(),
            status: "True".to_string(),
            ..Default::default()
        }]));
        assert_eq!(node_summary(&unrelated).status, "NotReady");
    }

    #[test]
    fn node_roles_strip_the_role_label_prefix() {
        let mut labels = BTreeMap::new();
        labels.insert(
            "node-role.kubernetes.io/control-plane".to_string(),
            String::new(),
        );
        labels.insert("kubernetes.io/hostname".to_string(), "worker-1".to_string());

        let node = Node {
            metadata: ObjectMeta {
                name: Some("worker-1".to_string()),
                labels: Some(labels),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(node_summary(&node).roles, vec!["control-plane"]);
    }

    #[test]
    fn configmap_summary_carries_keys_but_never_values() {
        let mut data = BTreeMap::new();
        data.insert("config.yaml".to_string(), "secret: hunter2".to_string());
        data.insert("feature-flags".to_string(), "beta=true".to_string());

        let configmap = ConfigMap {
            metadata: ObjectMeta {
                name: Some("app-config".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };

        let value = serde_json::to_value(configmap_summary(&configmap)).unwrap();
        assert_eq!(value["dataKeys"], serde_json::json!(["config.yaml", "feature-flags"]));
        assert!(!value.to_string().contains("hunter2"));
    }

    #[test]
    fn empty_configmap_projects_an_empty_key_set() {
        let summary = configmap_summary(&ConfigMap::default());
        assert!(summary.data_keys.is_empty());
    }
}
