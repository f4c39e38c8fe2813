// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Inventory Service Layer
//!
//! Reconciles incoming host documents with stored hosts and applies fact and
//! tag mutations. Every operation:
//! 1. Checks the caller's account
//! 2. Re-fetches the affected hosts from the store
//! 3. Applies the domain change with an explicit timestamp
//! 4. Commits once (insert, or one batch save)
//! 5. Publishes a change event
//!
//! # Reconciliation
//!
//! ```text
//! candidate ──► first stored host in account whose canonical facts
//!               contain or are contained by the candidate's
//!                   │
//!          none ────┴──── found
//!           │               │
//!        insert          update (merge fields)
//!         201               200
//! ```
//!
//! Only the first overlapping host is updated. Other hosts that would also
//! overlap are left alone.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    AccountNumber, FactMap, Host, HostId, HostInput, Identity, TagOperation, TagOperationError,
    TagOperationRequest,
};
use crate::errors::InventoryError;
use crate::events::{HostChange, HostEvent};
use crate::publisher::HostEventPublisher;
use crate::store::{HostQuery, HostStore};

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Payload account differs from the authenticated account
    #[error(
        "The account number associated with the user does not match the account number \
         associated with the host"
    )]
    AuthMismatch {
        caller: AccountNumber,
        host: AccountNumber,
    },

    /// Malformed tag operation; the cause is available as the error source
    #[error("Invalid request")]
    InvalidRequest(#[from] TagOperationError),

    /// Declared operation without an implementation
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// Store failure, propagated unchanged
    #[error("Store error: {0}")]
    Store(#[from] InventoryError),
}

impl ServiceError {
    /// HTTP-equivalent status code
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::AuthMismatch { .. } | ServiceError::InvalidRequest(_) => 400,
            ServiceError::NotImplemented(_) => 501,
            ServiceError::Store(_) => 500,
        }
    }
}

/// Outcome of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertResult {
    Created(Host),
    Updated(Host),
}

impl UpsertResult {
    pub fn status_code(&self) -> u16 {
        match self {
            UpsertResult::Created(_) => 201,
            UpsertResult::Updated(_) => 200,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, UpsertResult::Created(_))
    }

    pub fn host(&self) -> &Host {
        match self {
            UpsertResult::Created(host) | UpsertResult::Updated(host) => host,
        }
    }

    pub fn into_host(self) -> Host {
        match self {
            UpsertResult::Created(host) | UpsertResult::Updated(host) => host,
        }
    }
}

/// `{count, results}` envelope returned by host queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostList {
    pub count: usize,
    pub results: Vec<Host>,
}

impl From<Vec<Host>> for HostList {
    fn from(results: Vec<Host>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Filters for `list_hosts`, applied in priority order: tag, then display name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostListFilter {
    #[serde(default)]
    pub tag: Vec<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl HostListFilter {
    pub fn by_tags<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            tag: tags.into_iter().map(Into::into).collect(),
            display_name: None,
        }
    }

    pub fn by_display_name(display_name: impl Into<String>) -> Self {
        Self {
            tag: Vec::new(),
            display_name: Some(display_name.into()),
        }
    }
}

/// Host inventory service trait
///
/// Every operation is scoped to the account of the supplied identity.
#[async_trait]
pub trait HostInventoryService: Send + Sync {
    /// Create a host, or update the first stored host whose canonical facts overlap
    ///
    /// # Errors
    /// - `AuthMismatch` if `host.account` is not the caller's account
    async fn upsert_host(&self, identity: &Identity, host: HostInput)
        -> ServiceResult<UpsertResult>;

    /// List the caller's hosts, optionally filtered by tags (AND) or display name
    async fn list_hosts(
        &self,
        identity: &Identity,
        filter: &HostListFilter,
    ) -> ServiceResult<HostList>;

    /// Hosts with the given ids in the caller's account
    async fn get_hosts_by_id(&self, identity: &Identity, ids: &[HostId])
        -> ServiceResult<HostList>;

    /// Declared but not implemented; always `NotImplemented`
    async fn delete_host(&self, identity: &Identity, id: HostId) -> ServiceResult<()>;

    /// Merge facts into `namespace` on hosts that already have it
    async fn merge_facts(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        namespace: &str,
        facts: &FactMap,
    ) -> ServiceResult<()>;

    /// Replace `namespace` wholesale on hosts that already have it
    async fn replace_facts(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        namespace: &str,
        facts: &FactMap,
    ) -> ServiceResult<()>;

    /// Validate and run an `{operation, tag}` request
    ///
    /// # Errors
    /// - `InvalidRequest` for a missing field, unknown operation or invalid tag
    async fn handle_tag_operation(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        request: &TagOperationRequest,
    ) -> ServiceResult<()>;
}

/// Inventory service over a [`HostStore`] and a [`HostEventPublisher`]
pub struct InventoryService<S, P> {
    store: S,
    publisher: P,
}

impl<S: HostStore, P: HostEventPublisher> InventoryService<S, P> {
    pub fn new(store: S, publisher: P) -> Self {
        Self { store, publisher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hosts in `account` carrying every tag in `tags`
    pub async fn find_hosts_by_tag<T: AsRef<str> + Sync>(
        &self,
        account: &AccountNumber,
        tags: &[T],
    ) -> ServiceResult<Vec<Host>> {
        let tags: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
        debug!(%account, ?tags, "find_hosts_by_tag");

        let query = HostQuery::for_account(account).with_tags(&tags);
        let found = self.store.find(&query).await?;
        debug!(found = found.len(), "find_hosts_by_tag result");
        Ok(found)
    }

    /// Hosts in `account` whose display name contains `display_name`
    pub async fn find_hosts_by_display_name(
        &self,
        account: &AccountNumber,
        display_name: &str,
    ) -> ServiceResult<Vec<Host>> {
        debug!(%account, display_name, "find_hosts_by_display_name");

        let query = HostQuery::for_account(account).with_display_name_containing(display_name);
        let found = self.store.find(&query).await?;
        debug!(found = found.len(), "find_hosts_by_display_name result");
        Ok(found)
    }

    async fn apply_tag_to_hosts(
        &self,
        account: &AccountNumber,
        host_ids: &[HostId],
        tag: &str,
    ) -> ServiceResult<()> {
        let now = Utc::now();
        let query = HostQuery::for_account(account).with_ids(host_ids);

        let mut changed = Vec::new();
        for mut host in self.store.find(&query).await? {
            if host.tags.add(tag) {
                host.modified_on = now;
                changed.push(host);
            }
        }

        let changed_ids = ids_of(&changed);
        self.store.save(changed).await?;

        if !changed_ids.is_empty() {
            self.notify(
                account,
                HostChange::TagApplied {
                    host_ids: changed_ids,
                    tag: tag.to_string(),
                },
            )
            .await;
        }
        Ok(())
    }

    async fn remove_tag_from_hosts(
        &self,
        account: &AccountNumber,
        host_ids: &[HostId],
        tag: &str,
    ) -> ServiceResult<()> {
        let now = Utc::now();
        let query = HostQuery::for_account(account)
            .with_ids(host_ids)
            .with_tags(&[tag]);

        let mut changed = Vec::new();
        for mut host in self.store.find(&query).await? {
            host.tags.remove(tag);
            host.modified_on = now;
            changed.push(host);
        }

        let changed_ids = ids_of(&changed);
        self.store.save(changed).await?;

        if !changed_ids.is_empty() {
            self.notify(
                account,
                HostChange::TagRemoved {
                    host_ids: changed_ids,
                    tag: tag.to_string(),
                },
            )
            .await;
        }
        Ok(())
    }

    /// Load hosts in the caller's account that already carry `namespace`
    async fn hosts_with_namespace(
        &self,
        account: &AccountNumber,
        host_ids: &[HostId],
        namespace: &str,
    ) -> ServiceResult<Vec<Host>> {
        let query = HostQuery::for_account(account)
            .with_ids(host_ids)
            .with_namespace(namespace);
        let hosts = self.store.find(&query).await?;
        debug!(hosts_to_update = hosts.len(), namespace, "Selected hosts for fact update");
        Ok(hosts)
    }

    /// Publish a change; the write is already committed, so failures are only logged
    async fn notify(&self, account: &AccountNumber, change: HostChange) {
        let event = HostEvent::new(account.clone(), Utc::now(), change);
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(
                event_id = %event.event_id,
                operation = %event.operation(),
                "Failed to publish host event: {}",
                e
            );
        }
    }
}

fn ids_of(hosts: &[Host]) -> Vec<HostId> {
    hosts.iter().map(|h| h.id).collect()
}

#[async_trait]
impl<S: HostStore, P: HostEventPublisher> HostInventoryService for InventoryService<S, P> {
    async fn upsert_host(
        &self,
        identity: &Identity,
        host: HostInput,
    ) -> ServiceResult<UpsertResult> {
        debug!(
            account = %host.account,
            canonical_facts = host.canonical_facts.len(),
            "upsert_host"
        );

        if !identity.owns(&host.account) {
            return Err(ServiceError::AuthMismatch {
                caller: identity.account_number.clone(),
                host: host.account,
            });
        }

        let query = HostQuery::for_account(&host.account).overlapping(&host.canonical_facts);
        let now = Utc::now();

        match self.store.find_first(&query).await? {
            None => {
                debug!("Creating a new host");
                let created = Host::from_input(HostId::generate(), host, now);
                self.store.insert(created.clone()).await?;

                info!(host_id = %created.id, account = %created.account, "Host created");
                self.notify(
                    &created.account,
                    HostChange::Created {
                        host: created.clone(),
                    },
                )
                .await;

                Ok(UpsertResult::Created(created))
            }
            Some(mut found) => {
                debug!(host_id = %found.id, "Updating an existing host");
                found.update(&host, now);
                self.store.save(vec![found.clone()]).await?;

                info!(host_id = %found.id, account = %found.account, "Host updated");
                self.notify(
                    &found.account,
                    HostChange::Updated {
                        host: found.clone(),
                    },
                )
                .await;

                Ok(UpsertResult::Updated(found))
            }
        }
    }

    async fn list_hosts(
        &self,
        identity: &Identity,
        filter: &HostListFilter,
    ) -> ServiceResult<HostList> {
        debug!(tag = ?filter.tag, display_name = ?filter.display_name, "list_hosts");
        let account = &identity.account_number;

        let hosts = if !filter.tag.is_empty() {
            self.find_hosts_by_tag(account, &filter.tag).await?
        } else if let Some(display_name) = &filter.display_name {
            self.find_hosts_by_display_name(account, display_name).await?
        } else {
            self.store.find(&HostQuery::for_account(account)).await?
        };

        Ok(HostList::from(hosts))
    }

    async fn get_hosts_by_id(
        &self,
        identity: &Identity,
        ids: &[HostId],
    ) -> ServiceResult<HostList> {
        debug!(?ids, "get_hosts_by_id");

        let query = HostQuery::for_account(&identity.account_number).with_ids(ids);
        Ok(HostList::from(self.store.find(&query).await?))
    }

    async fn delete_host(&self, _identity: &Identity, id: HostId) -> ServiceResult<()> {
        debug!(host_id = %id, "delete_host");
        Err(ServiceError::NotImplemented("delete_host"))
    }

    async fn merge_facts(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        namespace: &str,
        facts: &FactMap,
    ) -> ServiceResult<()> {
        debug!(?host_ids, namespace, ?facts, "merge_facts");
        let account = &identity.account_number;
        let now = Utc::now();

        let mut hosts = self.hosts_with_namespace(account, host_ids, namespace).await?;
        for host in &mut hosts {
            host.facts.merge_in_namespace(namespace, facts);
            host.modified_on = now;
        }

        let changed_ids = ids_of(&hosts);
        self.store.save(hosts).await?;

        if !changed_ids.is_empty() {
            self.notify(
                account,
                HostChange::FactsMerged {
                    host_ids: changed_ids,
                    namespace: namespace.to_string(),
                },
            )
            .await;
        }
        Ok(())
    }

    async fn replace_facts(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        namespace: &str,
        facts: &FactMap,
    ) -> ServiceResult<()> {
        debug!(?host_ids, namespace, ?facts, "replace_facts");
        let account = &identity.account_number;
        let now = Utc::now();

        let mut hosts = self.hosts_with_namespace(account, host_ids, namespace).await?;
        for host in &mut hosts {
            host.facts.replace_namespace(namespace, facts.clone());
            host.modified_on = now;
        }

        let changed_ids = ids_of(&hosts);
        self.store.save(hosts).await?;

        if !changed_ids.is_empty() {
            self.notify(
                account,
                HostChange::FactsReplaced {
                    host_ids: changed_ids,
                    namespace: namespace.to_string(),
                },
            )
            .await;
        }
        Ok(())
    }

    async fn handle_tag_operation(
        &self,
        identity: &Identity,
        host_ids: &[HostId],
        request: &TagOperationRequest,
    ) -> ServiceResult<()> {
        debug!(?host_ids, ?request, "handle_tag_operation");

        let (operation, tag) = request.validate()?;
        let account = &identity.account_number;

        match operation {
            TagOperation::Apply => self.apply_tag_to_hosts(account, host_ids, &tag).await,
            TagOperation::Remove => self.remove_tag_from_hosts(account, host_ids, &tag).await,
        }
    }
}
