//! Wire types for the file tool protocol
//!
//! Requests name a tool and carry a typed argument object; every response,
//! success or failure, is a text payload wrapped in a uniform envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single request frame: optional correlation id plus the tool invocation.
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub request: ToolRequest,
}

/// Tool invocations sent by clients
#[derive(Debug, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum ToolRequest {
    ListFiles {
        #[serde(default)]
        directory: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ReadFile { file_path: String },
    #[serde(rename_all = "camelCase")]
    WriteFile { file_path: String, content: String },
    #[serde(rename_all = "camelCase")]
    CreateDirectory { directory_path: String },
    #[serde(rename_all = "camelCase")]
    DeleteItem {
        item_path: String,
        #[serde(default = "default_recursive")]
        recursive: bool,
    },
    #[serde(rename_all = "camelCase")]
    SearchFiles {
        #[serde(default)]
        directory: Option<String>,
        #[serde(default)]
        filename: Option<String>,
        #[serde(default)]
        extension: Option<String>,
        #[serde(default)]
        content_search: Option<String>,
        #[serde(default = "default_recursive")]
        recursive: bool,
    },
}

fn default_recursive() -> bool {
    true
}

/// Response envelope: `{"content": [{"type": "text", "text": ...}]}`
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: Vec<TextContent>,
}

#[derive(Debug, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

impl ToolResponse {
    pub fn text(id: Option<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            content: vec![TextContent {
                content_type: "text",
                text: text.into(),
            }],
        }
    }
}

/// Stat-derived metadata for one directory entry.
///
/// `path` is relative to the storage root; timestamps are unix milliseconds.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub is_directory: bool,
    pub created: Option<u64>,
    pub modified: u64,
}

/// Failure taxonomy for file operations.
///
/// Operations return these internally; the transport flattens them into the
/// text envelope, so the Display text is exactly what clients see.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Access denied: '{path}' resolves outside the storage root")]
    AccessDenied { path: String },
    #[error("Not found: {path}")]
    NotFound { path: String },
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },
    #[error("Not a file: {path}")]
    NotAFile { path: String },
    #[error("Directory not empty: {path} (pass recursive=true to delete its contents)")]
    DirectoryNotEmpty { path: String },
    #[error("Cannot read binary file as text: {path} ({media_type})")]
    BinaryFile { path: String, media_type: String },
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl FsError {
    pub fn io(e: std::io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_arguments() {
        let frame = r#"{"id":"7","tool":"read_file","arguments":{"filePath":"notes/a.txt"}}"#;
        let call: ToolCall = serde_json::from_str(frame).unwrap();
        assert_eq!(call.id.as_deref(), Some("7"));
        match call.request {
            ToolRequest::ReadFile { file_path } => assert_eq!(file_path, "notes/a.txt"),
            other => panic!("expected read_file, got: {:?}", other),
        }
    }

    #[test]
    fn delete_and_search_default_to_recursive() {
        let frame = r#"{"tool":"delete_item","arguments":{"itemPath":"old"}}"#;
        let call: ToolCall = serde_json::from_str(frame).unwrap();
        match call.request {
            ToolRequest::DeleteItem { recursive, .. } => assert!(recursive),
            other => panic!("expected delete_item, got: {:?}", other),
        }

        let frame = r#"{"tool":"search_files","arguments":{"filename":"report"}}"#;
        let call: ToolCall = serde_json::from_str(frame).unwrap();
        match call.request {
            ToolRequest::SearchFiles {
                filename,
                recursive,
                directory,
                ..
            } => {
                assert_eq!(filename.as_deref(), Some("report"));
                assert!(recursive);
                assert!(directory.is_none());
            }
            other => panic!("expected search_files, got: {:?}", other),
        }
    }

    #[test]
    fn envelope_serializes_to_text_content() {
        let response = ToolResponse::text(Some("9".into()), "File created: a.txt");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "9");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "File created: a.txt");
    }
}
