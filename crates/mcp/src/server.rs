// MCP server: newline-delimited JSON-RPC over stdio

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    DEFAULT_PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead, FramedWrite};
use tracing::{debug, info};

pub const SERVER_NAME: &str = "raindrop-mcp";

/// Errors that stop the transport loop.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame error: {0}")]
    Codec(#[from] AnyDelimiterCodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), ServerError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one JSON message per line from `reader`, answering on `writer`.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        // Frames stay raw bytes so invalid UTF-8 is answered, not fatal
        let mut frames = FramedRead::new(reader, line_codec());
        let mut sink = FramedWrite::new(writer, line_codec());

        while let Some(frame) = frames.next().await {
            let frame = frame?;
            if frame.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            if let Some(response) = self.handle_frame(&frame).await {
                sink.send(serde_json::to_string(&response)?).await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one line of text. Returns the reply, if any.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        self.handle_frame(line.as_bytes()).await
    }

    /// Handle one raw frame. Returns the reply, if any.
    pub async fn handle_frame(&self, frame: &[u8]) -> Option<Value> {
        let message: Value = match serde_json::from_slice(frame) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Unparseable frame");
                return to_value(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        match message {
            Value::Array(batch) if batch.is_empty() => to_value(JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::invalid_request(),
            )),
            Value::Array(batch) => {
                let mut replies = Vec::new();
                for message in batch {
                    if let Some(reply) = self.handle_message(message).await {
                        replies.push(reply);
                    }
                }
                (!replies.is_empty()).then_some(Value::Array(replies))
            }
            message => self.handle_message(message).await,
        }
    }

    async fn handle_message(&self, message: Value) -> Option<Value> {
        // Replies from the host to server-initiated requests; none are sent.
        if message.get("method").is_none()
            && (message.get("result").is_some() || message.get("error").is_some())
        {
            return None;
        }

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await.and_then(to_value),
            Err(_) => to_value(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        }
    }

    /// Dispatch a request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        debug!(method = %request.method, "Request received");
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: Option<InitializeParams> =
            params.and_then(|p| serde_json::from_value(p).ok());

        if let Some(client) = params.as_ref().and_then(|p| p.client_info.as_ref()) {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: params
                .map(|p| p.protocol_version)
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: self.registry.list_schemas(),
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))
            })?;

        let result = self.registry.call(&params.name, params.arguments).await?;
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

fn line_codec() -> AnyDelimiterCodec {
    AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec())
}

fn to_value(response: JsonRpcResponse) -> Option<Value> {
    serde_json::to_value(response).ok()
}
