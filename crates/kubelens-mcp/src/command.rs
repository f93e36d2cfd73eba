//! Typed command decode.
//!
//! A single validating step turns the opaque (tool name, argument bag) pair
//! into a closed command variant with defaults applied, so nothing
//! downstream probes untyped fields. Decode failures are caller errors and
//! happen before any upstream I/O.

use serde_json::Value;

use crate::error::ToolError;

/// Namespace used when the caller omits one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// One decoded invocation, one variant per catalog operation.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolCommand {
    ClusterInfo,
    ListPods {
        namespace: String,
        label_selector: Option<String>,
    },
    DescribePod {
        name: String,
        namespace: String,
    },
    PodLogs {
        name: String,
        namespace: String,
        container: Option<String>,
        tail_lines: Option<i64>,
    },
    ListServices {
        namespace: String,
        label_selector: Option<String>,
    },
    DescribeService {
        name: String,
        namespace: String,
    },
    ListDeployments {
        namespace: String,
        label_selector: Option<String>,
    },
    DescribeDeployment {
        name: String,
        namespace: String,
    },
    ListConfigMaps {
        namespace: String,
        label_selector: Option<String>,
    },
    DescribeConfigMap {
        name: String,
        namespace: String,
    },
    ListNamespaces,
    ListNodes {
        label_selector: Option<String>,
    },
    DescribeNode {
        name: String,
    },
}

impl ToolCommand {
    /// Decode and validate one invocation.
    pub fn decode(name: &str, args: &Value) -> Result<Self, ToolError> {
        let command = match name {
            "get_cluster_info" => Self::ClusterInfo,
            "list_pods" => Self::ListPods {
                namespace: namespace_or_default(args)?,
                label_selector: optional_string(args, "labelSelector")?,
            },
            "describe_pod" => Self::DescribePod {
                name: required_string(args, "name")?,
                namespace: namespace_or_default(args)?,
            },
            "get_pod_logs" => Self::PodLogs {
                name: required_string(args, "name")?,
                namespace: namespace_or_default(args)?,
                container: optional_string(args, "container")?,
                tail_lines: optional_integer(args, "tailLines")?,
            },
            "list_services" => Self::ListServices {
                namespace: namespace_or_default(args)?,
                label_selector: optional_string(args, "labelSelector")?,
            },
            "describe_service" => Self::DescribeService {
                name: required_string(args, "name")?,
                namespace: namespace_or_default(args)?,
            },
            "list_deployments" => Self::ListDeployments {
                namespace: namespace_or_default(args)?,
                label_selector: optional_string(args, "labelSelector")?,
            },
            "describe_deployment" => Self::DescribeDeployment {
                name: required_string(args, "name")?,
                namespace: namespace_or_default(args)?,
            },
            "list_configmaps" => Self::ListConfigMaps {
                namespace: namespace_or_default(args)?,
                label_selector: optional_string(args, "labelSelector")?,
            },
            "describe_configmap" => Self::DescribeConfigMap {
                name: required_string(args, "name")?,
                namespace: namespace_or_default(args)?,
            },
            "list_namespaces" => Self::ListNamespaces,
            "list_nodes" => Self::ListNodes {
                label_selector: optional_string(args, "labelSelector")?,
            },
            "describe_node" => Self::DescribeNode {
                name: required_string(args, "name")?,
            },
            other => return Err(ToolError::UnknownTool(other.to_string())),
        };

        Ok(command)
    }
}

fn required_string(args: &Value, field: &'static str) -> Result<String, ToolError> {
    match args.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ToolError::MissingArgument(field)),
        Some(_) => Err(ToolError::InvalidArgument {
            field,
            expected: "a string",
        }),
    }
}

fn optional_string(args: &Value, field: &'static str) -> Result<Option<String>, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::InvalidArgument {
            field,
            expected: "a string",
        }),
    }
}

fn optional_integer(args: &Value, field: &'static str) -> Result<Option<i64>, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or(ToolError::InvalidArgument {
            field,
            expected: "an integer",
        }),
    }
}

fn namespace_or_default(args: &Value) -> Result<String, ToolError> {
    Ok(optional_string(args, "namespace")?.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_catalog_name_decodes() {
        let args = json!({ "name": "thing" });
        for tool in crate::catalog::all() {
            ToolCommand::decode(tool.name, &args)
                .unwrap_or_else(|e| panic!("{} failed to decode: {e}", tool.name));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = ToolCommand::decode("drain_node", &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: drain_node");
    }

    #[test]
    fn list_namespace_defaults_when_omitted() {
        let command = ToolCommand::decode("list_pods", &json!({})).unwrap();
        assert_eq!(
            command,
            ToolCommand::ListPods {
                namespace: "default".to_string(),
                label_selector: None,
            }
        );
    }

    #[test]
    fn explicit_arguments_pass_through() {
        let command = ToolCommand::decode(
            "list_pods",
            &json!({ "namespace": "kube-system", "labelSelector": "app=dns" }),
        )
        .unwrap();
        assert_eq!(
            command,
            ToolCommand::ListPods {
                namespace: "kube-system".to_string(),
                label_selector: Some("app=dns".to_string()),
            }
        );
    }

    #[test]
    fn describe_without_name_is_a_caller_error() {
        for tool in [
            "describe_pod",
            "describe_service",
            "describe_deployment",
            "describe_configmap",
            "describe_node",
            "get_pod_logs",
        ] {
            let err = ToolCommand::decode(tool, &json!({})).unwrap_err();
            assert_eq!(err.to_string(), "name is required", "{tool}");
            assert!(err.is_caller_error());
        }
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let err = ToolCommand::decode("describe_pod", &json!({ "name": "" })).unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn pod_logs_decodes_all_optionals() {
        let command = ToolCommand::decode(
            "get_pod_logs",
            &json!({ "name": "web-0", "container": "sidecar", "tailLines": 50 }),
        )
        .unwrap();
        assert_eq!(
            command,
            ToolCommand::PodLogs {
                name: "web-0".to_string(),
                namespace: "default".to_string(),
                container: Some("sidecar".to_string()),
                tail_lines: Some(50),
            }
        );
    }

    #[test]
    fn wrongly_typed_tail_lines_is_a_caller_error() {
        let err = ToolCommand::decode(
            "get_pod_logs",
            &json!({ "name": "web-0", "tailLines": "fifty" }),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "tailLines must be an integer");
    }
}
