//! Record status lifecycles.
//!
//! Each status enum carries the single authoritative transition table for
//! its record kind. UI code asks `transitions()` which moves to offer and
//! `RecordStatus::transition` enforces the same table.

use std::fmt;

use crate::error::{LifecycleError, LifecycleResult};
use crate::records::RecordKind;

/// Marketing campaign status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Running,
    Paused,
    Cancelled,
    Completed,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 6] = [
        CampaignStatus::Draft,
        CampaignStatus::Scheduled,
        CampaignStatus::Running,
        CampaignStatus::Paused,
        CampaignStatus::Cancelled,
        CampaignStatus::Completed,
    ];

    /// Check if a transition to the target status is legal
    pub fn can_transition_to(&self, target: CampaignStatus) -> bool {
        use CampaignStatus::*;
        matches!(
            (self, target),
            (Draft, Scheduled)
                | (Draft, Cancelled)
                | (Scheduled, Draft)
                | (Scheduled, Running)
                | (Scheduled, Cancelled)
                | (Running, Paused)
                | (Running, Completed)
                | (Running, Cancelled)
                | (Paused, Running)
                | (Paused, Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CampaignStatus::Cancelled | CampaignStatus::Completed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Scheduled => "Scheduled",
            CampaignStatus::Running => "Running",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Cancelled => "Cancelled",
            CampaignStatus::Completed => "Completed",
        }
    }
}

/// Agent KYC status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    Pending,
    Active,
    Rejected,
    Suspended,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Pending,
        AgentStatus::Active,
        AgentStatus::Rejected,
        AgentStatus::Suspended,
    ];

    /// Check if a transition to the target status is legal
    pub fn can_transition_to(&self, target: AgentStatus) -> bool {
        use AgentStatus::*;
        matches!(
            (self, target),
            (Pending, Active)
                | (Pending, Rejected)
                | (Active, Suspended)
                | (Suspended, Active)
                // Resubmitted documents go back to review
                | (Rejected, Pending)
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentStatus::Pending => "Pending",
            AgentStatus::Active => "Active",
            AgentStatus::Rejected => "Rejected",
            AgentStatus::Suspended => "Suspended",
        }
    }
}

/// Status of any record, tagged by record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Campaign(CampaignStatus),
    Agent(AgentStatus),
}

impl RecordStatus {
    /// Legal targets from this status, in declaration order.
    pub fn transitions(&self) -> Vec<RecordStatus> {
        match self {
            RecordStatus::Campaign(from) => CampaignStatus::ALL
                .iter()
                .filter(|to| from.can_transition_to(**to))
                .map(|to| RecordStatus::Campaign(*to))
                .collect(),
            RecordStatus::Agent(from) => AgentStatus::ALL
                .iter()
                .filter(|to| from.can_transition_to(**to))
                .map(|to| RecordStatus::Agent(*to))
                .collect(),
        }
    }

    pub fn can_transition_to(&self, target: RecordStatus) -> bool {
        match (self, target) {
            (RecordStatus::Campaign(from), RecordStatus::Campaign(to)) => from.can_transition_to(to),
            (RecordStatus::Agent(from), RecordStatus::Agent(to)) => from.can_transition_to(to),
            _ => false,
        }
    }

    /// Move to `target`, rejecting anything the table does not allow.
    pub fn transition(self, target: RecordStatus) -> LifecycleResult<RecordStatus> {
        if self.kind() != target.kind() {
            return Err(LifecycleError::WrongKind(target.to_string()));
        }
        if !self.can_transition_to(target) {
            return Err(LifecycleError::IllegalTransition {
                from: self.to_string(),
                to: target.to_string(),
            });
        }
        Ok(target)
    }

    /// Parse a status name for the given record kind, ignoring case.
    pub fn parse(kind: RecordKind, name: &str) -> Option<RecordStatus> {
        let name = name.trim();
        match kind {
            RecordKind::Campaign => CampaignStatus::ALL
                .into_iter()
                .find(|s| s.display_name().eq_ignore_ascii_case(name))
                .map(RecordStatus::Campaign),
            RecordKind::Agent => AgentStatus::ALL
                .into_iter()
                .find(|s| s.display_name().eq_ignore_ascii_case(name))
                .map(RecordStatus::Agent),
        }
    }

    /// No further transitions; the record is read-only.
    pub fn is_terminal(&self) -> bool {
        match self {
            RecordStatus::Campaign(status) => status.is_terminal(),
            RecordStatus::Agent(_) => false,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordStatus::Campaign(_) => RecordKind::Campaign,
            RecordStatus::Agent(_) => RecordKind::Agent,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordStatus::Campaign(status) => status.display_name(),
            RecordStatus::Agent(status) => status.display_name(),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
