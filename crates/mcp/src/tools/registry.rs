// Tool trait, access tiers and the name -> (schema, handler) registry

use crate::protocol::{CallToolResult, JsonRpcError, ToolAnnotations, ToolSchema};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments that already passed schema validation
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;

    /// Get the tool's tier (drives the annotations shown to the host)
    fn tier(&self) -> ToolTier {
        ToolTier::Tier0
    }
}

/// Tool access tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToolTier {
    /// Read-only operations
    Tier0,
    /// Writes that add or change data
    Tier1,
    /// Operations that remove data
    Tier2,
}

impl ToolTier {
    pub fn annotations(self) -> ToolAnnotations {
        let (read_only, destructive) = match self {
            ToolTier::Tier0 => (true, None),
            ToolTier::Tier1 => (false, Some(false)),
            ToolTier::Tier2 => (false, Some(true)),
        };
        ToolAnnotations {
            read_only_hint: Some(read_only),
            destructive_hint: destructive,
            idempotent_hint: None,
            open_world_hint: Some(true),
        }
    }
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    validator: jsonschema::Validator,
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    order: Vec<String>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish_non_exhaustive()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool, compiling its input schema.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let schema = tool.schema();
        let validator = jsonschema::validator_for(&schema.input_schema)
            .map_err(|e| anyhow!("Invalid input schema for tool {}: {}", schema.name, e))?;

        if !self.tools.contains_key(&schema.name) {
            self.order.push(schema.name.clone());
        }
        self.tools
            .insert(schema.name, RegisteredTool { tool, validator });
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|entry| entry.tool.clone())
    }

    /// List all tool schemas in registration order
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|entry| {
                let mut schema = entry.tool.schema();
                if schema.annotations.is_none() {
                    schema.annotations = Some(entry.tool.tier().annotations());
                }
                schema
            })
            .collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check arguments against the tool's input schema.
    pub fn validate(&self, name: &str, arguments: &Value) -> Result<(), JsonRpcError> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", name)))?;
        validate_with(&entry.validator, name, arguments)
    }

    /// Validate and run a tool.
    ///
    /// Unknown tools and invalid arguments fail as protocol errors before the
    /// handler runs; handler failures come back as an `isError` result.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult, JsonRpcError> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", name)))?;

        let arguments = arguments.unwrap_or_else(|| Value::Object(Default::default()));
        validate_with(&entry.validator, name, &arguments)?;

        debug!(tool = name, "Executing tool");
        match entry.tool.execute(arguments).await {
            Ok(result) => Ok(result),
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(tool = name, error = %message, "Tool execution failed");
                Ok(CallToolResult::error(message))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_with(
    validator: &jsonschema::Validator,
    name: &str,
    arguments: &Value,
) -> Result<(), JsonRpcError> {
    let violations: Vec<Value> = validator
        .iter_errors(arguments)
        .map(|e| {
            serde_json::json!({
                "message": e.to_string(),
                "instancePath": e.instance_path().to_string(),
            })
        })
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    let summary = violations
        .iter()
        .filter_map(|v| v.get("message").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("; ");
    Err(
        JsonRpcError::invalid_params(format!("Invalid arguments for tool {}: {}", name, summary))
            .with_data(serde_json::json!({ "violations": violations })),
    )
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    serde_json::json!({
        "type": "integer",
        "description": description
    })
}

/// Integer that may not be negative
pub fn json_schema_count(description: &str) -> Value {
    serde_json::json!({
        "type": "integer",
        "minimum": 0,
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}
