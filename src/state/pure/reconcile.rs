//! State file vs. on-disk evidence

use super::super::types::{Component, ComponentEvidence, ComponentFlags, Evidence, PatchEvidence};

/// Combine both signals for one component. On-disk evidence outranks the record.
pub fn reconcile(evidence: ComponentEvidence) -> Evidence {
    match (evidence.backup_exists, evidence.declared_applied) {
        (true, true) => Evidence::Confirmed,
        (true, false) => Evidence::BackupOnly,
        (false, true) => Evidence::DeclaredOnly,
        (false, false) => Evidence::Absent,
    }
}

/// Which components a removal without explicit selection should undo
pub fn removal_defaults(evidence: &PatchEvidence) -> ComponentFlags {
    let mut flags = ComponentFlags::default();
    for component in Component::ALL {
        flags.set(component, reconcile(evidence.get(component)).is_applied());
    }
    flags
}
