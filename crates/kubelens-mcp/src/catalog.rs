//! Static tool catalog.
//!
//! Declares, for each of the 13 operations, its name, description, and
//! input contract, and serves the catalog in wire form for `tools/list`.
//! Pure data: constructed once, deterministic order, lookup by exact
//! case-sensitive name.

use serde_json::{Map, Value, json};

/// Argument value kind, used for schema generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

/// One recognized input field of an operation.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Static descriptor for one invocable operation.
#[derive(Clone, Copy, Debug)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

const NAMESPACE: FieldSpec = FieldSpec {
    name: "namespace",
    required: false,
    kind: FieldKind::String,
    description: "Namespace to query (defaults to \"default\")",
};

const LABEL_SELECTOR: FieldSpec = FieldSpec {
    name: "labelSelector",
    required: false,
    kind: FieldKind::String,
    description: "Label selector restricting the listing, e.g. \"app=web\"",
};

const fn name_field(description: &'static str) -> FieldSpec {
    FieldSpec {
        name: "name",
        required: true,
        kind: FieldKind::String,
        description,
    }
}

/// All operations in catalog order.
pub const CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "get_cluster_info",
        description: "Get the current context, cluster connection details, and API server metadata",
        fields: &[],
    },
    ToolSpec {
        name: "list_pods",
        description: "List pods in a namespace",
        fields: &[NAMESPACE, LABEL_SELECTOR],
    },
    ToolSpec {
        name: "describe_pod",
        description: "Describe a single pod",
        fields: &[name_field("Pod name"), NAMESPACE],
    },
    ToolSpec {
        name: "get_pod_logs",
        description: "Fetch logs from a pod as raw text",
        fields: &[
            name_field("Pod name"),
            NAMESPACE,
            FieldSpec {
                name: "container",
                required: false,
                kind: FieldKind::String,
                description: "Container name (defaults to the pod's only container)",
            },
            FieldSpec {
                name: "tailLines",
                required: false,
                kind: FieldKind::Integer,
                description: "Number of trailing lines to return (defaults to the full log)",
            },
        ],
    },
    ToolSpec {
        name: "list_services",
        description: "List services in a namespace",
        fields: &[NAMESPACE, LABEL_SELECTOR],
    },
    ToolSpec {
        name: "describe_service",
        description: "Describe a single service",
        fields: &[name_field("Service name"), NAMESPACE],
    },
    ToolSpec {
        name: "list_deployments",
        description: "List deployments in a namespace",
        fields: &[NAMESPACE, LABEL_SELECTOR],
    },
    ToolSpec {
        name: "describe_deployment",
        description: "Describe a single deployment",
        fields: &[name_field("Deployment name"), NAMESPACE],
    },
    ToolSpec {
        name: "list_configmaps",
        description: "List configmaps in a namespace (keys only, never values)",
        fields: &[NAMESPACE, LABEL_SELECTOR],
    },
    ToolSpec {
        name: "describe_configmap",
        description: "Describe a single configmap",
        fields: &[name_field("ConfigMap name"), NAMESPACE],
    },
    ToolSpec {
        name: "list_namespaces",
        description: "List all namespaces in the cluster",
        fields: &[],
    },
    ToolSpec {
        name: "list_nodes",
        description: "List cluster nodes with readiness and roles",
        fields: &[LABEL_SELECTOR],
    },
    ToolSpec {
        name: "describe_node",
        description: "Describe a single cluster node",
        fields: &[name_field("Node name")],
    },
];

/// All tool descriptors in declaration order.
pub fn all() -> &'static [ToolSpec] {
    CATALOG
}

/// Look up a descriptor by exact name. Case-sensitive, no fuzzy matching.
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|tool| tool.name == name)
}

impl ToolSpec {
    /// JSON Schema describing the tool's input object.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.fields {
            let kind = match field.kind {
                FieldKind::String => "string",
                FieldKind::Integer => "integer",
            };
            properties.insert(
                field.name.to_string(),
                json!({ "type": kind, "description": field.description }),
            );
            if field.required {
                required.push(Value::String(field.name.to_string()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Wire form served by `tools/list`.
    pub fn to_wire(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_fields(name: &str) -> Vec<&'static str> {
        find(name)
            .unwrap_or_else(|| panic!("missing tool {name}"))
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    #[test]
    fn catalog_has_all_thirteen_operations() {
        assert_eq!(all().len(), 13);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert!(find("list_pods").is_some());
        assert!(find("List_Pods").is_none());
        assert!(find("list_pod").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn required_fields_match_the_input_contract() {
        for tool in [
            "get_cluster_info",
            "list_pods",
            "list_services",
            "list_deployments",
            "list_configmaps",
            "list_namespaces",
            "list_nodes",
        ] {
            assert_eq!(required_fields(tool), Vec::<&str>::new(), "{tool}");
        }
        for tool in [
            "describe_pod",
            "describe_service",
            "describe_deployment",
            "describe_configmap",
            "describe_node",
            "get_pod_logs",
        ] {
            assert_eq!(required_fields(tool), vec!["name"], "{tool}");
        }
    }

    #[test]
    fn optional_fields_match_the_input_contract() {
        let optional = |name: &str| -> Vec<&'static str> {
            find(name)
                .unwrap()
                .fields
                .iter()
                .filter(|f| !f.required)
                .map(|f| f.name)
                .collect()
        };

        assert_eq!(optional("list_pods"), vec!["namespace", "labelSelector"]);
        assert_eq!(optional("describe_pod"), vec!["namespace"]);
        assert_eq!(
            optional("get_pod_logs"),
            vec!["namespace", "container", "tailLines"]
        );
        assert_eq!(optional("list_nodes"), vec!["labelSelector"]);
        assert_eq!(optional("describe_node"), Vec::<&str>::new());
    }

    #[test]
    fn wire_form_is_json_schema_shaped() {
        let wire = find("get_pod_logs").unwrap().to_wire();

        assert_eq!(wire["name"], "get_pod_logs");
        assert_eq!(wire["inputSchema"]["type"], "object");
        assert_eq!(wire["inputSchema"]["properties"]["tailLines"]["type"], "integer");
        assert_eq!(wire["inputSchema"]["required"], json!(["name"]));
    }
}
