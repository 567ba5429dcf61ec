//! Status reconciliation
//!
//! Turns the classifications of one person into an organization-wide
//! decision, then into one action per touched category. Everything here is
//! pure.

use std::collections::BTreeSet;

use shared::{CategoryPair, MarkerId};

use crate::error::{SwitcherError, SwitcherResult};
use crate::types::{
    ActionKind, ActionRecord, Classifications, Decision, GroupSnapshot, MemberClassification,
};

/// Derive the toggle direction from any sequence of classifications
///
/// Returns `None` when no category holds either marker. Any mix of on-leave
/// and off-leave evidence, including a single conflicting category, resolves
/// to going off-leave.
pub fn decide_from<I>(classifications: I) -> Option<Decision>
where
    I: IntoIterator<Item = MemberClassification>,
{
    let (any_on_leave, any_off_leave) = classifications
        .into_iter()
        .fold((false, false), |(on, off), classification| {
            (
                on || classification.shows_on_leave(),
                off || classification.shows_off_leave(),
            )
        });

    if !any_on_leave && !any_off_leave {
        return None;
    }

    let had_conflict = any_on_leave && any_off_leave;
    Some(Decision {
        going_on_leave: any_off_leave && !had_conflict,
        had_conflict,
    })
}

/// Decide for one person, rejecting requests with nothing to switch
pub fn decide(classifications: &Classifications) -> SwitcherResult<Decision> {
    decide_from(classifications.iter()).ok_or_else(|| SwitcherError::NoApplicableState {
        person: classifications.person.clone(),
    })
}

/// Action for one category, or `None` when the person holds neither marker
pub fn action_for(
    classification: MemberClassification,
    pair: &CategoryPair,
    going_on_leave: bool,
) -> Option<(ActionKind, Vec<MarkerId>)> {
    let desired = pair.desired(going_on_leave).clone();
    let undesired = pair.undesired(going_on_leave).clone();

    match (
        classification.has_desired(going_on_leave),
        classification.has_undesired(going_on_leave),
    ) {
        (true, true) => Some((ActionKind::Merge, vec![undesired, desired])),
        (true, false) => Some((ActionKind::Keep, vec![desired])),
        (false, true) => Some((ActionKind::Switch, vec![undesired, desired])),
        (false, false) => None,
    }
}

/// Actions for every touched category, in group then category order
pub fn compute_actions(classifications: &Classifications, decision: &Decision) -> Vec<ActionRecord> {
    classifications
        .groups
        .iter()
        .flat_map(|snapshot| {
            snapshot.categories.iter().filter_map(move |state| {
                action_for(state.classification, &state.pair, decision.going_on_leave).map(
                    |(kind, markers)| ActionRecord {
                        group: snapshot.group.clone(),
                        group_name: snapshot.group_name.clone(),
                        kind,
                        markers,
                    },
                )
            })
        })
        .collect()
}

/// Full marker set the person should hold in this group after the toggle
///
/// Untracked markers and untouched categories are carried over unchanged.
pub fn desired_markers(snapshot: &GroupSnapshot, decision: &Decision) -> BTreeSet<MarkerId> {
    let mut markers = snapshot.markers.clone();
    for state in &snapshot.categories {
        if state.classification == MemberClassification::Neither {
            continue;
        }
        markers.remove(state.pair.undesired(decision.going_on_leave));
        markers.insert(state.pair.desired(decision.going_on_leave).clone());
    }
    markers
}
