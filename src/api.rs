// Copyright (c) 2025 - Cowboy AI, Inc.
//! Request/Reply Surface
//!
//! Maps JSON requests onto [`HostInventoryService`] operations and their
//! results onto `{status, body}` replies with HTTP-equivalent status codes.
//!
//! # Request Shape
//!
//! ```json
//! {
//!   "identity": {"account_number": "000501"},
//!   "operation": "tag_operation",
//!   "host_ids": ["01934f4a-1000-7000-8000-000000001000"],
//!   "tag_op": {"operation": "apply", "tag": "prod"}
//! }
//! ```
//!
//! # Status Codes
//!
//! | Outcome | Status |
//! |---|---|
//! | host created | 201 |
//! | success | 200 |
//! | account mismatch, invalid tag operation, unparseable request | 400 |
//! | store failure | 500 |
//! | unimplemented operation | 501 |

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{FactMap, HostId, HostInput, Identity, TagOperationRequest};
use crate::errors::InventoryResult;
use crate::nats::NatsClient;
use crate::service::{HostInventoryService, HostListFilter, ServiceError};

/// Operation and its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum InventoryOperation {
    UpsertHost {
        host: HostInput,
    },
    ListHosts {
        #[serde(default)]
        tag: Vec<String>,
        #[serde(default)]
        display_name: Option<String>,
    },
    GetHostsById {
        ids: Vec<HostId>,
    },
    DeleteHost {
        id: HostId,
    },
    MergeFacts {
        host_ids: Vec<HostId>,
        namespace: String,
        facts: FactMap,
    },
    ReplaceFacts {
        host_ids: Vec<HostId>,
        namespace: String,
        facts: FactMap,
    },
    TagOperation {
        host_ids: Vec<HostId>,
        #[serde(default)]
        tag_op: TagOperationRequest,
    },
}

/// Request envelope: caller identity plus operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRequest {
    pub identity: Identity,
    #[serde(flatten)]
    pub operation: InventoryOperation,
}

/// Reply envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReply {
    pub status: u16,
    pub body: Value,
}

impl InventoryReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn ok() -> Self {
        Self::new(200, Value::Null)
    }

    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self::new(status, body),
            Err(e) => Self::message(500, format!("Failed to encode reply: {}", e)),
        }
    }

    fn message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }

    fn from_error(err: ServiceError) -> Self {
        if let ServiceError::Store(e) = &err {
            error!("Store failure: {}", e);
        }
        Self::message(err.status_code(), err.to_string())
    }
}

/// Run one request against the service
pub async fn dispatch<S>(service: &S, request: InventoryRequest) -> InventoryReply
where
    S: HostInventoryService + ?Sized,
{
    let identity = &request.identity;

    let result = match request.operation {
        InventoryOperation::UpsertHost { host } => service
            .upsert_host(identity, host)
            .await
            .map(|outcome| InventoryReply::json(outcome.status_code(), outcome.host())),
        InventoryOperation::ListHosts { tag, display_name } => {
            let filter = HostListFilter { tag, display_name };
            service
                .list_hosts(identity, &filter)
                .await
                .map(|list| InventoryReply::json(200, &list))
        }
        InventoryOperation::GetHostsById { ids } => service
            .get_hosts_by_id(identity, &ids)
            .await
            .map(|list| InventoryReply::json(200, &list)),
        InventoryOperation::DeleteHost { id } => service
            .delete_host(identity, id)
            .await
            .map(|_| InventoryReply::ok()),
        InventoryOperation::MergeFacts {
            host_ids,
            namespace,
            facts,
        } => service
            .merge_facts(identity, &host_ids, &namespace, &facts)
            .await
            .map(|_| InventoryReply::ok()),
        InventoryOperation::ReplaceFacts {
            host_ids,
            namespace,
            facts,
        } => service
            .replace_facts(identity, &host_ids, &namespace, &facts)
            .await
            .map(|_| InventoryReply::ok()),
        InventoryOperation::TagOperation { host_ids, tag_op } => service
            .handle_tag_operation(identity, &host_ids, &tag_op)
            .await
            .map(|_| InventoryReply::ok()),
    };

    result.unwrap_or_else(InventoryReply::from_error)
}

/// Decode a raw payload and dispatch it
pub async fn handle_payload<S>(service: &S, payload: &[u8]) -> InventoryReply
where
    S: HostInventoryService + ?Sized,
{
    match serde_json::from_slice::<InventoryRequest>(payload) {
        Ok(request) => dispatch(service, request).await,
        Err(e) => {
            debug!("Rejected request payload: {}", e);
            InventoryReply::message(400, format!("Invalid request body: {}", e))
        }
    }
}

/// Serve requests on `subject` until the subscription ends
///
/// Requests are handled one at a time, in arrival order.
pub async fn run_responder<S>(
    client: NatsClient,
    subject: &str,
    service: Arc<S>,
) -> InventoryResult<()>
where
    S: HostInventoryService + ?Sized + 'static,
{
    let mut subscriber = client.subscribe(subject).await?;
    info!(subject, "Inventory responder ready");

    while let Some(message) = subscriber.next().await {
        let reply = handle_payload(service.as_ref(), &message.payload).await;

        let Some(reply_subject) = message.reply else {
            warn!(subject = %message.subject, "Dropping reply for request without reply subject");
            continue;
        };

        let payload = match serde_json::to_vec(&reply) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to encode reply: {}", e);
                continue;
            }
        };

        if let Err(e) = client.publish_bytes(reply_subject.to_string(), payload).await {
            error!("Failed to send reply: {}", e);
        }
    }

    info!(subject, "Inventory responder stopped");
    Ok(())
}
