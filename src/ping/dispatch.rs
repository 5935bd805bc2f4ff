//! Groups ping decisions by integration type.

use super::model::{Integration, PingDecision};

/// Decisions routed to one integration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchGroup<'a> {
    kind: String,
    pings: Vec<&'a PingDecision>,
    routed: Vec<&'a PingDecision>,
}

impl<'a> DispatchGroup<'a> {
    /// Integration type of the group.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Decisions that should be pinged now, in input order.
    #[must_use]
    pub fn pings(&self) -> &[&'a PingDecision] {
        &self.pings
    }

    /// Every decision carrying this integration type, due or not.
    ///
    /// Channels use this to report waiting and disabled reviewers alongside
    /// the ones being pinged.
    #[must_use]
    pub fn routed(&self) -> &[&'a PingDecision] {
        &self.routed
    }

    /// The integration entry of the first due decision, which carries the
    /// parameters used for the whole group.
    #[must_use]
    pub fn integration(&self) -> Option<&'a Integration> {
        self.pings
            .iter()
            .find_map(|decision| decision.integration(&self.kind))
    }

    /// Template override from the group's integration parameters.
    #[must_use]
    pub fn template(&self) -> Option<&'a str> {
        self.integration().and_then(Integration::template)
    }

    /// Returns a parameter of the group's integration.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&'a str> {
        self.integration()
            .and_then(|integration| integration.parameter(key))
    }
}

/// Groups in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchPlan<'a> {
    groups: Vec<DispatchGroup<'a>>,
}

impl<'a> DispatchPlan<'a> {
    /// Groups in the order their type was first seen.
    #[must_use]
    pub fn groups(&self) -> &[DispatchGroup<'a>] {
        &self.groups
    }

    /// Looks up the group for an integration type.
    #[must_use]
    pub fn group(&self, kind: &str) -> Option<&DispatchGroup<'a>> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    /// Whether no decision needs dispatching.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Fans due decisions out to one group per integration type.
///
/// Only decisions with `should_ping` set create groups. A decision listing
/// the same type twice appears in that group once.
#[must_use]
pub fn group_by_integration(decisions: &[PingDecision]) -> DispatchPlan<'_> {
    let mut groups: Vec<DispatchGroup<'_>> = Vec::new();

    for decision in decisions.iter().filter(|decision| decision.should_ping) {
        for integration in &decision.integrations {
            let position = groups
                .iter()
                .position(|group| group.kind == integration.kind);
            let group = match position {
                Some(index) => groups.get_mut(index),
                None => {
                    groups.push(DispatchGroup {
                        kind: integration.kind.clone(),
                        pings: Vec::new(),
                        routed: Vec::new(),
                    });
                    groups.last_mut()
                }
            };
            let Some(target) = group else {
                continue;
            };
            let already_listed = target
                .pings
                .last()
                .is_some_and(|last| std::ptr::eq(*last, decision));
            if !already_listed {
                target.pings.push(decision);
            }
        }
    }

    for group in &mut groups {
        group.routed = decisions
            .iter()
            .filter(|decision| decision.routes_to(&group.kind))
            .collect();
    }

    DispatchPlan { groups }
}
