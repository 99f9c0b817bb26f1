//! Cross-source voting helpers.
//!
//! Each argument is one candidate list per resolved source, in source
//! priority order. Unresolved sources are left out by the caller.

use std::collections::HashSet;

/// Candidate chosen by vote.
///
/// Ranking, highest first: total occurrences over all lists, then the
/// highest-priority list containing it, then its earliest position in any
/// list containing it. Remaining ties go to the candidate met first when
/// walking the lists in priority order. `None` when there are no candidates.
pub fn consensus_elem(candidates: &[Vec<&str>]) -> Option<String> {
    struct Tally<'a> {
        value: &'a str,
        count: usize,
        priority: usize,
        position: usize,
    }

    let mut tallies: Vec<Tally> = Vec::new();
    for (priority, list) in candidates.iter().enumerate() {
        for (position, &value) in list.iter().enumerate() {
            match tallies.iter_mut().find(|t| t.value == value) {
                Some(t) => {
                    t.count += 1;
                    t.position = t.position.min(position);
                }
                None => tallies.push(Tally { value, count: 1, priority, position }),
            }
        }
    }

    let mut best: Option<&Tally> = None;
    for t in &tallies {
        let better = match best {
            None => true,
            Some(b) => (t.count, std::cmp::Reverse(t.priority), std::cmp::Reverse(t.position))
                > (b.count, std::cmp::Reverse(b.priority), std::cmp::Reverse(b.position)),
        };
        if better {
            best = Some(t);
        }
    }
    best.map(|t| t.value.to_string())
}

/// True when the candidate lists share no value. No lists → false.
pub fn no_intersection(candidates: &[Vec<&str>]) -> bool {
    let Some((first, rest)) = candidates.split_first() else {
        return false;
    };
    let mut common: HashSet<&str> = first.iter().copied().collect();
    for list in rest {
        let set: HashSet<&str> = list.iter().copied().collect();
        common.retain(|v| set.contains(v));
    }
    common.is_empty()
}
