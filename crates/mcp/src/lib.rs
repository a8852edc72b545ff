// MCP (Model Context Protocol) server for Raindrop.io
// Exposes bookmark and collection operations as tools over stdio

pub mod protocol;
pub mod sanitize;
pub mod server;
pub mod tools;

pub use server::{McpServer, ServerError};
pub use tools::build_registry;
