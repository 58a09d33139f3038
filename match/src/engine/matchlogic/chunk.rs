use crate::engine::entry::{GroupBounds, ParticipantId};
use std::collections::VecDeque;

/// Groups cut from one shuffled list, plus whoever did not fit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunked {
    pub groups: Vec<Vec<ParticipantId>>,
    pub remainder: Vec<ParticipantId>,
}

/// Cuts consecutive runs of `bounds.min()` members, then deals the leftovers
/// round-robin into groups still below `bounds.max()`.
///
/// Leftovers stay in `remainder` when no group was formed or every group is
/// already full.
pub fn chunk_greedy(ids: Vec<ParticipantId>, bounds: GroupBounds) -> Chunked {
    let mut groups: Vec<Vec<ParticipantId>> = Vec::with_capacity(ids.len() / bounds.min());
    let mut rest = ids.into_iter();
    while rest.len() >= bounds.min() {
        groups.push(rest.by_ref().take(bounds.min()).collect());
    }

    let mut remaining: VecDeque<ParticipantId> = rest.collect();
    let mut g = 0;
    while !remaining.is_empty() && !groups.is_empty() {
        if groups[g].len() < bounds.max() {
            if let Some(next) = remaining.pop_front() {
                groups[g].push(next);
            }
        }
        g = (g + 1) % groups.len();

        if groups.iter().all(|group| group.len() >= bounds.max()) {
            break;
        }
    }

    Chunked {
        groups,
        remainder: remaining.into(),
    }
}
