use serde::{Deserialize, Serialize};

/// The project currently holding the highest value of some metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub count: u64,
}

impl Leader {
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self { name: name.into(), count }
    }
}

/// Offer a new observation to a leader slot.
///
/// The slot changes hands only on a strictly greater count, so ties keep the
/// earlier holder and an empty slot is never claimed by a count of zero.
/// Returns `true` if the challenger took the lead.
pub fn challenge(slot: &mut Option<Leader>, name: &str, count: u64) -> bool {
    let current = slot.as_ref().map_or(0, |leader| leader.count);
    if count > current {
        *slot = Some(Leader::new(name, count));
        true
    } else {
        false
    }
}
