//! Tool dispatch.
//!
//! Each invocation passes linearly through typed decode, a single upstream
//! call, projection, and the wire envelope; a failure at any step
//! short-circuits to the envelope. At most one upstream attempt per
//! invocation, no retries, no state carried between calls.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use kubelens_k8s::ClusterOps;
use kubelens_types::ClusterContext;

use crate::command::ToolCommand;
use crate::error::ToolError;
use crate::project;

/// Result payload before enveloping.
#[derive(Clone, Debug)]
pub enum ToolOutput {
    /// JSON projection, serialized into the text content entry.
    Json(Value),
    /// Raw text passed through unmodified (pod logs).
    Text(String),
}

/// Uniform envelope returned for every invocation.
///
/// Exactly one of success payload or failure message; `is_error` marks
/// which. Failures carry the sanitized message as the sole content entry.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ContentItem>,
    pub is_error: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ToolResponse {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ContentItem {
                kind: "text".to_string(),
                text,
            }],
            is_error,
        }
    }

    pub fn success(output: ToolOutput) -> Self {
        let text = match output {
            ToolOutput::Json(value) => serde_json::to_string_pretty(&value).unwrap_or_default(),
            ToolOutput::Text(text) => text,
        };
        Self::text(text, false)
    }

    pub fn failure(message: String) -> Self {
        Self::text(message, true)
    }
}

/// Executes exactly one catalog operation per invocation.
///
/// Holds only the shared upstream handle and the immutable connection
/// descriptor, so concurrent invocations need no locks and resolve
/// independently.
pub struct Dispatcher<C> {
    ops: Arc<C>,
    context: ClusterContext,
}

impl<C: ClusterOps> Dispatcher<C> {
    pub fn new(ops: Arc<C>, context: ClusterContext) -> Self {
        Self { ops, context }
    }

    /// Run one invocation and wrap the outcome in the uniform envelope.
    ///
    /// Diagnostic detail stays in the log; only the sanitized message goes
    /// on the wire.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> ToolResponse {
        debug!(tool = %name, "Invoking tool");

        match self.run(name, arguments).await {
            Ok(output) => ToolResponse::success(output),
            Err(err) => {
                if err.is_caller_error() {
                    debug!(tool = %name, error = %err, "Invocation rejected before upstream call");
                } else {
                    warn!(tool = %name, error = %err, "Invocation failed");
                }
                ToolResponse::failure(err.to_string())
            }
        }
    }

    async fn run(&self, name: &str, arguments: &Value) -> Result<ToolOutput, ToolError> {
        let command = ToolCommand::decode(name, arguments)?;

        match command {
            ToolCommand::ClusterInfo => {
                let metadata = self
                    .ops
                    .cluster_metadata()
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&project::cluster_info(&self.context, metadata))
            }
            ToolCommand::ListPods {
                namespace,
                label_selector,
            } => {
                let pods = self
                    .ops
                    .list_pods(&namespace, label_selector.as_deref())
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&pods.iter().map(project::pod_summary).collect::<Vec<_>>())
            }
            ToolCommand::DescribePod { name, namespace } => {
                let pod = self
                    .ops
                    .get_pod(&name, &namespace)
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&project::pod_detail(&pod))
            }
            ToolCommand::PodLogs {
                name,
                namespace,
                container,
                tail_lines,
            } => {
                let logs = self
                    .ops
                    .pod_logs(&name, &namespace, container.as_deref(), tail_lines)
                    .await
                    .map_err(ToolError::upstream)?;
                Ok(ToolOutput::Text(logs))
            }
            ToolCommand::ListServices {
                namespace,
                label_selector,
            } => {
                let services = self
                    .ops
                    .list_services(&namespace, label_selector.as_deref())
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(
                    &services
                        .iter()
                        .map(project::service_summary)
                        .collect::<Vec<_>>(),
                )
            }
            ToolCommand::DescribeService { name, namespace } => {
                let service = self
                    .ops
                    .get_service(&name, &namespace)
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&project::service_detail(&service))
            }
            ToolCommand::ListDeployments {
                namespace,
                label_selector,
            } => {
                let deployments = self
                    .ops
                    .list_deployments(&namespace, label_selector.as_deref())
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(
                    &deployments
                        .iter()
                        .map(project::deployment_summary)
                        .collect::<Vec<_>>(),
                )
            }
            ToolCommand::DescribeDeployment { name, namespace } => {
                let deployment = self
                    .ops
                    .get_deployment(&name, &namespace)
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&project::deployment_detail(&deployment))
            }
            ToolCommand::ListConfigMaps {
                namespace,
                label_selector,
            } => {
                let configmaps = self
                    .ops
                    .list_configmaps(&namespace, label_selector.as_deref())
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(
                    &configmaps
                        .iter()
                        .map(project::configmap_summary)
                        .collect::<Vec<_>>(),
                )
            }
            ToolCommand::DescribeConfigMap { name, namespace } => {
                let configmap = self
                    .ops
                    .get_configmap(&name, &namespace)
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&project::configmap_detail(&configmap))
            }
            ToolCommand::ListNamespaces => {
                let namespaces = self
                    .ops
                    .list_namespaces()
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(
                    &namespaces
                        .iter()
                        .map(project::namespace_summary)
                        .collect::<Vec<_>>(),
                )
            }
            ToolCommand::ListNodes { label_selector } => {
                let nodes = self
                    .ops
                    .list_nodes(label_selector.as_deref())
                    .await
                    .map_err(ToolError::upstream)?;
                json_output(&nodes.iter().map(project::node_summary).collect::<Vec<_>>())
            }
            ToolCommand::DescribeNode { name } => {
                let node = self.ops.get_node(&name).await.map_err(ToolError::upstream)?;
                json_output(&project::node_detail(&node))
            }
        }
    }
}

fn json_output<T: Serialize>(value: &T) -> Result<ToolOutput, ToolError> {
    // Serializing our own projection types cannot fail.
    Ok(ToolOutput::Json(
        serde_json::to_value(value).unwrap_or_default(),
    ))
}
