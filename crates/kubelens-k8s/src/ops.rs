//! The upstream collaborator seam.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Node, Pod, Service};

use kubelens_types::ClusterMetadata;

/// Read-only cluster operations, one method per resource-operation pair.
///
/// Every method maps to a single upstream read; no write-capable call is
/// part of this interface. Errors come back as raw [`kube::Error`] — the
/// dispatch layer classifies them, this seam stays a thin pass-through.
#[async_trait]
pub trait ClusterOps: Send + Sync {
    /// Fetch API server version and core group-version metadata.
    async fn cluster_metadata(&self) -> Result<ClusterMetadata, kube::Error>;

    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Pod>, kube::Error>;

    async fn get_pod(&self, name: &str, namespace: &str) -> Result<Pod, kube::Error>;

    /// Fetch pod logs as raw text. `tail_lines` of `None` means the full log.
    async fn pod_logs(
        &self,
        name: &str,
        namespace: &str,
        container: Option<&str>,
        tail_lines: Option<i64>,
    ) -> Result<String, kube::Error>;

    async fn list_services(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Service>, kube::Error>;

    async fn get_service(&self, name: &str, namespace: &str) -> Result<Service, kube::Error>;

    async fn list_deployments(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Deployment>, kube::Error>;

    async fn get_deployment(&self, name: &str, namespace: &str)
    -> Result<Deployment, kube::Error>;

    async fn list_configmaps(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<ConfigMap>, kube::Error>;

    async fn get_configmap(&self, name: &str, namespace: &str)
    -> Result<ConfigMap, kube::Error>;

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, kube::Error>;

    async fn list_nodes(&self, label_selector: Option<&str>) -> Result<Vec<Node>, kube::Error>;

    async fn get_node(&self, name: &str) -> Result<Node, kube::Error>;
}
