// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Host Reconciliation
//!
//! Drives the service over the in-memory store with generated sightings and
//! checks the store-level outcomes: how many hosts exist, which tags they
//! carry, and which account they belong to.

use cim_host_inventory::domain::TagOperationRequest;
use cim_host_inventory::service::{HostInventoryService, HostListFilter};
use proptest::prelude::*;

use crate::fixtures::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Small pool of identifiers so generated sightings collide often
fn sighting() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    prop::collection::btree_map(
        prop_oneof![Just("insights_id"), Just("bios_uuid"), Just("fqdn")],
        "[ab]",
        1..3,
    )
    .prop_map(|map| map.into_iter().collect())
}

fn sighting_sequence() -> impl Strategy<Value = Vec<Vec<(&'static str, String)>>> {
    prop::collection::vec(sighting(), 1..12)
}

fn as_pairs<'a>(sighting: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    sighting.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Re-sending a sighting never creates a host
    ///
    /// The second upsert of the same canonical facts always overlaps the
    /// first, so the host count is unchanged and the id is reused.
    #[test]
    fn prop_repeated_sighting_is_update(sightings in sighting_sequence()) {
        tokio_test::block_on(async {
            let (service, _) = service();

            for facts in &sightings {
                let pairs = as_pairs(facts);
                let first = service
                    .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &pairs))
                    .await
                    .unwrap();
                let before = service.store().len().await;

                let again = service
                    .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &pairs))
                    .await
                    .unwrap();

                prop_assert!(!again.is_created());
                prop_assert_eq!(again.host().id, first.host().id);
                prop_assert_eq!(service.store().len().await, before);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: Hosts never exceed sightings, and every upserted host matches
    /// its sighting afterwards
    #[test]
    fn prop_upserted_host_contains_sighting(sightings in sighting_sequence()) {
        tokio_test::block_on(async {
            let (service, _) = service();

            for facts in &sightings {
                let candidate = canonical(&as_pairs(facts));
                let outcome = service
                    .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &as_pairs(facts)))
                    .await
                    .unwrap();

                prop_assert!(outcome.host().canonical_facts.contains(&candidate));
            }

            prop_assert!(service.store().len().await <= sightings.len());
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: Accounts never share hosts
    #[test]
    fn prop_accounts_are_isolated(
        first in sighting_sequence(),
        second in sighting_sequence(),
    ) {
        tokio_test::block_on(async {
            let (service, _) = service();

            for facts in &first {
                service
                    .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &as_pairs(facts)))
                    .await
                    .unwrap();
            }
            for facts in &second {
                service
                    .upsert_host(&identity(ACCOUNT_2), host_input(ACCOUNT_2, &as_pairs(facts)))
                    .await
                    .unwrap();
            }

            let mine = service
                .list_hosts(&identity(ACCOUNT_1), &HostListFilter::default())
                .await
                .unwrap();
            let theirs = service
                .list_hosts(&identity(ACCOUNT_2), &HostListFilter::default())
                .await
                .unwrap();

            prop_assert!(mine.results.iter().all(|h| h.account == account(ACCOUNT_1)));
            prop_assert!(theirs.results.iter().all(|h| h.account == account(ACCOUNT_2)));
            prop_assert_eq!(mine.count + theirs.count, service.store().len().await);
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: Applying a tag any number of times leaves exactly one copy
    #[test]
    fn prop_tag_apply_is_idempotent(times in 1usize..5, tag in "[a-z]{1,10}") {
        tokio_test::block_on(async {
            let (service, _) = service();
            let host = service
                .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &[("insights_id", "a")]))
                .await
                .unwrap();
            let request = TagOperationRequest::new("apply", &tag);

            for _ in 0..times {
                service
                    .handle_tag_operation(&identity(ACCOUNT_1), &[host.host().id], &request)
                    .await
                    .unwrap();
            }

            let list = service
                .get_hosts_by_id(&identity(ACCOUNT_1), &[host.host().id])
                .await
                .unwrap();
            prop_assert_eq!(list.results[0].tags.len(), 1);
            prop_assert!(list.results[0].tags.contains(&tag));
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: Apply then remove restores the original tag set
    #[test]
    fn prop_apply_then_remove_restores_tags(
        existing in prop::collection::btree_set("[a-m]{1,4}", 0..4),
        tag in "[n-z]{1,4}",
    ) {
        tokio_test::block_on(async {
            let (service, _) = service();
            let existing: Vec<&str> = existing.iter().map(String::as_str).collect();
            let host = service
                .upsert_host(
                    &identity(ACCOUNT_1),
                    host_input(ACCOUNT_1, &[("insights_id", "a")]).with_tags(tags(&existing)),
                )
                .await
                .unwrap();
            let id = host.host().id;

            for operation in ["apply", "remove"] {
                service
                    .handle_tag_operation(
                        &identity(ACCOUNT_1),
                        &[id],
                        &TagOperationRequest::new(operation, &tag),
                    )
                    .await
                    .unwrap();
            }

            let list = service.get_hosts_by_id(&identity(ACCOUNT_1), &[id]).await.unwrap();
            prop_assert_eq!(&list.results[0].tags, &tags(&existing));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
