use std::fmt;

use crate::features::litter_reports::models::LitterReportStatus;
use crate::features::waste_pickups::models::PickupStatus;

/// Which lifecycle a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Pickup,
    LitterReport,
}

impl EntityKind {
    /// Human-readable name used in error messages
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Pickup => "waste pickup request",
            EntityKind::LitterReport => "litter report",
        }
    }

    /// Verb for the owner-initiated terminal operation
    pub fn withdraw_verb(self) -> &'static str {
        match self {
            EntityKind::Pickup => "cancel",
            EntityKind::LitterReport => "close",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A fixed status transition table plus the few lifecycle-specific
/// constants the guards need.
pub trait Lifecycle: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Status applied when work is assigned without an explicit status.
    /// Differs per kind.
    const ASSIGNED: Self;

    /// Terminal status reached by cancelling/closing.
    const WITHDRAWN: Self;

    /// Statuses the owner (or an admin) may still withdraw from.
    const WITHDRAWABLE_FROM: &'static [Self];

    /// Status that stamps the completion/resolution time.
    const FINISHED: Self;

    /// Whether reaching `FINISHED` credits the assigned collector.
    const CREDITS_COLLECTOR: bool;

    /// Unassigned statuses a collector can see within their city.
    const OPEN_POOL: &'static [Self];

    /// Statuses reachable in one step.
    fn next_states(self) -> &'static [Self];

    fn can_transition_to(self, next: Self) -> bool {
        self.next_states().contains(&next)
    }

    fn is_withdrawable(self) -> bool {
        Self::WITHDRAWABLE_FROM.contains(&self)
    }
}

impl Lifecycle for PickupStatus {
    const KIND: EntityKind = EntityKind::Pickup;
    const ASSIGNED: Self = PickupStatus::Scheduled;
    const WITHDRAWN: Self = PickupStatus::Cancelled;
    const WITHDRAWABLE_FROM: &'static [Self] = &[PickupStatus::Pending, PickupStatus::Scheduled];
    const FINISHED: Self = PickupStatus::Completed;
    const CREDITS_COLLECTOR: bool = true;
    const OPEN_POOL: &'static [Self] = &[PickupStatus::Pending];

    fn next_states(self) -> &'static [Self] {
        use PickupStatus::*;
        match self {
            Pending => &[Scheduled, Cancelled],
            Scheduled => &[InProgress, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }
}

impl Lifecycle for LitterReportStatus {
    const KIND: EntityKind = EntityKind::LitterReport;
    const ASSIGNED: Self = LitterReportStatus::Verified;
    const WITHDRAWN: Self = LitterReportStatus::Closed;
    const WITHDRAWABLE_FROM: &'static [Self] =
        &[LitterReportStatus::Pending, LitterReportStatus::Verified];
    const FINISHED: Self = LitterReportStatus::Resolved;
    const CREDITS_COLLECTOR: bool = false;
    const OPEN_POOL: &'static [Self] = &[LitterReportStatus::Pending, LitterReportStatus::Verified];

    fn next_states(self) -> &'static [Self] {
        use LitterReportStatus::*;
        match self {
            Pending => &[Verified, Closed],
            Verified => &[InProgress, Closed],
            InProgress => &[Resolved, Closed],
            Resolved => &[Closed],
            Closed => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed_pairs<S: Lifecycle>(all: &[S]) -> Vec<(S, S)> {
        all.iter()
            .flat_map(|from| all.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect()
    }

    #[test]
    fn test_pickup_table() {
        use PickupStatus::*;
        let pairs = allowed_pairs(&PickupStatus::ALL);
        assert_eq!(
            pairs,
            vec![
                (Pending, Scheduled),
                (Pending, Cancelled),
                (Scheduled, InProgress),
                (Scheduled, Cancelled),
                (InProgress, Completed),
                (InProgress, Cancelled),
            ]
        );
        assert!(Completed.next_states().is_empty());
        assert!(Cancelled.next_states().is_empty());
    }

    #[test]
    fn test_litter_report_table() {
        use LitterReportStatus::*;
        let pairs = allowed_pairs(&LitterReportStatus::ALL);
        assert_eq!(
            pairs,
            vec![
                (Pending, Verified),
                (Pending, Closed),
                (Verified, InProgress),
                (Verified, Closed),
                (InProgress, Resolved),
                (InProgress, Closed),
                (Resolved, Closed),
            ]
        );
        assert!(Closed.next_states().is_empty());
        assert!(!Resolved.next_states().is_empty());
    }

    #[test]
    fn test_no_self_transitions() {
        assert!(PickupStatus::ALL.iter().all(|s| !s.can_transition_to(*s)));
        assert!(LitterReportStatus::ALL
            .iter()
            .all(|s| !s.can_transition_to(*s)));
    }

    #[test]
    fn test_assignment_defaults_differ_by_kind() {
        assert_eq!(PickupStatus::ASSIGNED, PickupStatus::Scheduled);
        assert_eq!(LitterReportStatus::ASSIGNED, LitterReportStatus::Verified);
    }

    #[test]
    fn test_withdrawable_sources() {
        let pickups: Vec<_> = PickupStatus::ALL
            .into_iter()
            .filter(|s| s.is_withdrawable())
            .collect();
        assert_eq!(pickups, vec![PickupStatus::Pending, PickupStatus::Scheduled]);

        let reports: Vec<_> = LitterReportStatus::ALL
            .into_iter()
            .filter(|s| s.is_withdrawable())
            .collect();
        assert_eq!(
            reports,
            vec![LitterReportStatus::Pending, LitterReportStatus::Verified]
        );
    }

    #[test]
    fn test_kind_wording() {
        assert_eq!(EntityKind::Pickup.withdraw_verb(), "cancel");
        assert_eq!(EntityKind::LitterReport.to_string(), "litter report");
    }
}
