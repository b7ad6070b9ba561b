//! WebSocket transport for the file tools
//!
//! One task per connection; each text frame is a tool call and gets exactly
//! one envelope back. Operation failures are flattened into the same
//! success-shaped envelope as text, so a filesystem fault never aborts the
//! connection.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};

use crate::filesystem::operations::{CreateOutcome, DeleteOutcome, WriteOutcome};
use crate::filesystem::search::SearchCriteria;
use crate::filesystem::FileSystemService;
use crate::format;
use crate::protocol::{EntryMetadata, FsError, ToolCall, ToolRequest, ToolResponse};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8931;

/// Start the server (blocking until Ctrl+C).
pub async fn run(port: u16, service: Arc<FileSystemService>) -> std::io::Result<()> {
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!(
        "File server on port {} (root: {})",
        port,
        service.config().root.display()
    );
    if let Ok(ip) = local_ip_address::local_ip() {
        tracing::info!("Reachable at ws://{}:{}", ip, port);
    }

    loop {
        tokio::select! {
            result = listener.accept() => {
                if let Ok((stream, addr)) = result {
                    let service = service.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, service).await {
                            tracing::warn!("Connection {} closed with error: {}", addr, e);
                        }
                    });
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down (Ctrl+C)");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    service: Arc<FileSystemService>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws = accept_async(stream).await?;
    tracing::info!("Client connected: {}", addr);
    let (mut tx, mut rx) = ws.split();

    while let Some(msg) = rx.next().await {
        match msg? {
            Message::Text(text) => {
                let response = match serde_json::from_str::<ToolCall>(&text) {
                    Ok(call) => handle_request(&service, call).await,
                    Err(e) => {
                        ToolResponse::text(None, format!("Error: unrecognized request: {}", e))
                    }
                };
                tx.send(Message::Text(serde_json::to_string(&response)?))
                    .await?;
            }
            Message::Ping(data) => tx.send(Message::Pong(data)).await?,
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!("Client disconnected: {}", addr);
    Ok(())
}

/// Run one tool call and wrap the outcome, success or failure, in an envelope.
pub async fn handle_request(service: &FileSystemService, call: ToolCall) -> ToolResponse {
    let ToolCall { id, request } = call;
    let text = match dispatch(service, request).await {
        Ok(text) => text,
        Err(e) => format!("Error: {}", e),
    };
    ToolResponse::text(id, text)
}

async fn dispatch(service: &FileSystemService, request: ToolRequest) -> Result<String, FsError> {
    match request {
        ToolRequest::ListFiles { directory } => {
            let entries = service
                .catalog()
                .list_directory(directory.as_deref())
                .await?;
            Ok(render_listing(directory.as_deref(), &entries))
        }
        ToolRequest::ReadFile { file_path } => {
            let (content, media_type) = service.ops().read_file(&file_path).await?;
            Ok(format!(
                "File: {}\nType: {}\n\n{}",
                file_path, media_type, content
            ))
        }
        ToolRequest::WriteFile { file_path, content } => {
            Ok(match service.ops().write_file(&file_path, &content).await? {
                WriteOutcome::Created => format!("File created: {}", file_path),
                WriteOutcome::Updated => format!("File updated: {}", file_path),
            })
        }
        ToolRequest::CreateDirectory { directory_path } => {
            Ok(match service.ops().create_directory(&directory_path).await? {
                CreateOutcome::Created => format!("Directory created: {}", directory_path),
                CreateOutcome::AlreadyExists => {
                    format!("Directory already exists: {}", directory_path)
                }
            })
        }
        ToolRequest::DeleteItem {
            item_path,
            recursive,
        } => {
            Ok(match service.ops().delete_item(&item_path, recursive).await? {
                DeleteOutcome::File => format!("File deleted: {}", item_path),
                DeleteOutcome::Directory => format!("Directory deleted: {}", item_path),
            })
        }
        ToolRequest::SearchFiles {
            directory,
            filename,
            extension,
            content_search,
            recursive,
        } => {
            let criteria = SearchCriteria {
                directory,
                filename,
                extension,
                content: content_search,
                recursive,
            };
            let matches = service.search().search(&criteria).await?;
            Ok(render_matches(&matches))
        }
    }
}

fn render_listing(directory: Option<&str>, entries: &[EntryMetadata]) -> String {
    if entries.is_empty() {
        return format!("No files found in '{}'", directory.unwrap_or("."));
    }

    let mut out = format!("Found {} item(s):\n", entries.len());
    for entry in entries {
        let tag = if entry.is_directory { "[DIR]" } else { "[FILE]" };
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n  Path: {}\n  Size: {}\n  Created: {}\n  Modified: {}\n",
            tag,
            entry.name,
            entry.path,
            format::format_size(entry.size),
            format::format_optional_timestamp(entry.created),
            format::format_timestamp(entry.modified),
        ));
    }
    out
}

fn render_matches(matches: &[EntryMetadata]) -> String {
    if matches.is_empty() {
        return "No matching files found".to_string();
    }

    let mut out = format!("Found {} matching file(s):\n", matches.len());
    for entry in matches {
        out.push('\n');
        out.push_str(&format!(
            "{}\n  Path: {}\n  Size: {}\n  Modified: {}\n",
            entry.name,
            entry.path,
            format::format_size(entry.size),
            format::format_timestamp(entry.modified),
        ));
    }
    out
}
