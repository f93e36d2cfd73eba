//! Kube-backed implementation of the cluster access layer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Node, Pod, Service};
use kube::Api;
use kube::api::{ListParams, LogParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::info;

use kubelens_types::{ClusterContext, ClusterMetadata};

use crate::ops::ClusterOps;

/// Connection settings consumed once at startup.
#[derive(Clone, Debug, Default)]
pub struct ConnectOptions {
    /// Explicit kubeconfig path; falls back to the standard lookup.
    pub kubeconfig: Option<PathBuf>,
    /// Context name; falls back to the kubeconfig's current context.
    pub context: Option<String>,
}

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
    context: ClusterContext,
}

impl KubeClient {
    /// Create a new KubeClient by loading the kubeconfig and selecting a context.
    pub async fn connect(options: ConnectOptions) -> Result<Self> {
        let kubeconfig = match &options.kubeconfig {
            Some(path) => Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig at {}", path.display()))?,
            None => Kubeconfig::read().context("Failed to read kubeconfig. Is kubectl configured?")?,
        };

        let context_name = options
            .context
            .clone()
            .or_else(|| kubeconfig.current_context.clone());
        let context = describe_context(&kubeconfig, context_name.as_deref());

        let config = kube::Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: context_name.clone(),
                ..Default::default()
            },
        )
        .await
        .with_context(|| {
            format!(
                "Failed to create config for context: {}",
                context_name.as_deref().unwrap_or("<current>")
            )
        })?;

        let client = kube::Client::try_from(config).with_context(|| {
            format!(
                "Failed to create client for context: {}",
                context_name.as_deref().unwrap_or("<current>")
            )
        })?;

        info!(
            context = context.context_name.as_deref().unwrap_or("<current>"),
            server = context.server.as_deref().unwrap_or("<unknown>"),
            "Connected to cluster"
        );

        Ok(Self { client, context })
    }

    /// The connection descriptor extracted from kubeconfig.
    pub fn context(&self) -> &ClusterContext {
        &self.context
    }

    fn list_params(label_selector: Option<&str>) -> ListParams {
        match label_selector {
            Some(labels) => ListParams::default().labels(labels),
            None => ListParams::default(),
        }
    }
}

/// Extract the connection descriptor for a context from kubeconfig.
fn describe_context(kubeconfig: &Kubeconfig, name: Option<&str>) -> ClusterContext {
    let named = name.and_then(|n| kubeconfig.contexts.iter().find(|c| c.name == n));
    let cluster_name = named
        .and_then(|c| c.context.as_ref())
        .map(|c| c.cluster.clone());
    let server = cluster_name
        .as_ref()
        .and_then(|cluster| kubeconfig.clusters.iter().find(|c| &c.name == cluster))
        .and_then(|c| c.cluster.as_ref())
        .and_then(|c| c.server.clone());

    ClusterContext {
        context_name: name.map(String::from),
        cluster_name,
        server,
    }
}

#[async_trait]
impl ClusterOps for KubeClient {
    async fn cluster_metadata(&self) -> Result<ClusterMetadata, kube::Error> {
        let version = self.client.apiserver_version().await?;
        let core = self.client.list_core_api_versions().await?;

        Ok(ClusterMetadata {
            major: version.major,
            minor: version.minor,
            git_version: version.git_version,
            platform: version.platform,
            api_versions: core.versions,
        })
    }

    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Pod>, kube::Error> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods.list(&Self::list_params(label_selector)).await?;
        Ok(list.items)
    }

    async fn get_pod(&self, name: &str, namespace: &str) -> Result<Pod, kube::Error> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        pods.get(name).await
    }

    async fn pod_logs(
        &self,
        name: &str,
        namespace: &str,
        container: Option<&str>,
        tail_lines: Option<i64>,
    ) -> Result<String, kube::Error> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            container: container.map(String::from),
            tail_lines,
            ..Default::default()
        };
        pods.logs(name, &params).await
    }

    async fn list_services(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Service>, kube::Error> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let list = services.list(&Self::list_params(label_selector)).await?;
        Ok(list.items)
    }

    async fn get_service(&self, name: &str, namespace: &str) -> Result<Service, kube::Error> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        services.get(name).await
    }

    async fn list_deployments(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Deployment>, kube::Error> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = deployments.list(&Self::list_params(label_selector)).await?;
        Ok(list.items)
    }

    async fn get_deployment(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Deployment, kube::Error> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        deployments.get(name).await
    }

    async fn list_configmaps(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<ConfigMap>, kube::Error> {
        let configmaps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let list = configmaps.list(&Self::list_params(label_selector)).await?;
        Ok(list.items)
    }

    async fn get_configmap(&self, name: &str, namespace: &str) -> Result<ConfigMap, kube::Error> {
        let configmaps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        configmaps.get(name).await
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, kube::Error> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn list_nodes(&self, label_selector: Option<&str>) -> Result<Vec<Node>, kube::Error> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&Self::list_params(label_selector)).await?;
        Ok(list.items)
    }

    async fn get_node(&self, name: &str) -> Result<Node, kube::Error> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        nodes.get(name).await
    }
}
