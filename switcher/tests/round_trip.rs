//! Repeated toggles and re-application against in-memory collaborators

mod common;

use std::collections::BTreeSet;

use common::{SwitcherBuilder, TestFixtures, TestSwitcher};
use shared::{GroupId, MarkerId, OrganizationId, RequestId};
use switcher::core::{decide, Applicator, MemberStateReader};
use switcher::{ApplyOutcome, ToggleRequest};

fn request_from(group: GroupId) -> ToggleRequest {
    ToggleRequest::new(TestFixtures::person(), group)
}

async fn stored(switcher: &TestSwitcher, group: &GroupId) -> Option<BTreeSet<MarkerId>> {
    switcher
        .membership
        .markers_of(group, &TestFixtures::person())
        .await
}

#[tokio::test]
async fn test_toggling_twice_restores_original_markers() {
    let switcher = SwitcherBuilder::new()
        .with_markers(&TestFixtures::group_1(), &["g1-duty", "member"])
        .with_markers(&TestFixtures::group_2(), &["g2-duty"])
        .build();

    let first = switcher
        .toggle(request_from(TestFixtures::group_1()))
        .await
        .unwrap();
    assert!(first.decision.going_on_leave);
    assert_eq!(
        stored(&switcher, &TestFixtures::group_1()).await,
        Some(TestFixtures::markers(&["g1-leave", "member"]))
    );
    assert_eq!(
        stored(&switcher, &TestFixtures::group_2()).await,
        Some(TestFixtures::markers(&["g2-leave"]))
    );

    let second = switcher
        .toggle(request_from(TestFixtures::group_2()))
        .await
        .unwrap();
    assert!(!second.decision.going_on_leave);
    assert_eq!(
        stored(&switcher, &TestFixtures::group_1()).await,
        Some(TestFixtures::markers(&["g1-duty", "member"]))
    );
    assert_eq!(
        stored(&switcher, &TestFixtures::group_2()).await,
        Some(TestFixtures::markers(&["g2-duty"]))
    );
    // Two groups, two toggles: never re-read while applying
    assert_eq!(switcher.membership.read_count(), 4);
    assert_eq!(switcher.membership.write_count(), 4);
}

#[tokio::test]
async fn test_conflict_collapses_then_toggles_normally() {
    let switcher = SwitcherBuilder::new()
        .with_markers(&TestFixtures::group_1(), &["g1-duty", "g1-leave"])
        .build();

    let first = switcher
        .toggle(request_from(TestFixtures::group_1()))
        .await
        .unwrap();
    assert!(first.decision.had_conflict);
    assert_eq!(
        stored(&switcher, &TestFixtures::group_1()).await,
        Some(TestFixtures::markers(&["g1-duty"]))
    );

    let second = switcher
        .toggle(request_from(TestFixtures::group_1()))
        .await
        .unwrap();
    assert!(!second.decision.had_conflict);
    assert!(second.decision.going_on_leave);
    assert_eq!(
        stored(&switcher, &TestFixtures::group_1()).await,
        Some(TestFixtures::markers(&["g1-leave"]))
    );

    let third = switcher
        .toggle(request_from(TestFixtures::group_1()))
        .await
        .unwrap();
    assert!(!third.decision.going_on_leave);
    assert_eq!(
        stored(&switcher, &TestFixtures::group_1()).await,
        Some(TestFixtures::markers(&["g1-duty"]))
    );
}

#[tokio::test]
async fn test_reapplying_a_decision_writes_nothing() {
    let switcher = SwitcherBuilder::new()
        .with_markers(&TestFixtures::group_1(), &["g1-duty", "g1-leave"])
        .with_markers(&TestFixtures::group_2(), &["g2-leave"])
        .build();
    let organization = OrganizationId::new("org");
    let reader = MemberStateReader::new(&switcher.directory, &switcher.membership, &switcher.catalog);
    let applicator = Applicator::new(&switcher.membership);

    let before = reader
        .classify(RequestId::new(), &TestFixtures::person(), &organization)
        .await;
    let decision = decide(&before).unwrap();
    let results = applicator
        .apply_all(RequestId::new(), &before, &decision)
        .await;
    assert!(results.iter().all(|r| r.outcome == ApplyOutcome::Applied));
    let writes = switcher.membership.write_count();

    // State now matches the decision, so every group is a keep
    let after = reader
        .classify(RequestId::new(), &TestFixtures::person(), &organization)
        .await;
    let results = applicator
        .apply_all(RequestId::new(), &after, &decision)
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.outcome == ApplyOutcome::Unchanged));
    assert_eq!(switcher.membership.write_count(), writes);
}
