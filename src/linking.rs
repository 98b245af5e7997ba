//! One-shot linking of NEOs and their close approaches
//!
//! [`link`] consumes freshly built records, joins approaches to NEOs by
//! designation, and hands everything back behind `Arc`s. NEOs own their
//! approaches; approaches only hold a `Weak` back-reference, so the catalog
//! decides how long the whole graph lives.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{CloseApproach, NearEarthObject};

/// Linked NEOs and approaches, both in input order
#[derive(Debug, Clone, Default)]
pub struct LinkedCatalog {
    neos: Vec<Arc<NearEarthObject>>,
    approaches: Vec<Arc<CloseApproach>>,
}

impl LinkedCatalog {
    /// All NEOs, in input order
    pub fn neos(&self) -> &[Arc<NearEarthObject>] {
        &self.neos
    }

    /// All approaches, in input order
    pub fn approaches(&self) -> &[Arc<CloseApproach>] {
        &self.approaches
    }

    /// Approaches whose designation matched no NEO
    pub fn unlinked_approaches(&self) -> impl Iterator<Item = &Arc<CloseApproach>> + '_ {
        self.approaches.iter().filter(|approach| !approach.is_linked())
    }
}

/// Join approaches to NEOs by designation
///
/// Each matching approach gets its NEO reference set and is appended to that
/// NEO's approaches after any it was constructed with; those are linked to
/// their NEO as well. Approaches without a matching NEO are returned
/// unchanged. When several NEOs share a designation, only the first receives
/// approaches from `approaches`.
pub fn link(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> LinkedCatalog {
    let mut by_designation: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, approach) in approaches.iter().enumerate() {
        by_designation
            .entry(approach.designation().to_string())
            .or_default()
            .push(index);
    }

    let approach_count = approaches.len();
    let mut pending: Vec<Option<CloseApproach>> = approaches.into_iter().map(Some).collect();
    let mut linked: Vec<Option<Arc<CloseApproach>>> = vec![None; approach_count];
    let mut seen: HashMap<String, usize> = HashMap::new();

    let neos: Vec<Arc<NearEarthObject>> = neos
        .into_iter()
        .enumerate()
        .map(|(position, mut neo)| {
            let indices = if let Some(first) = seen.get(&neo.designation) {
                log::warn!(
                    "Duplicate NEO designation {:?} at position {} (first seen at {}); \
                     not linking dataset approaches",
                    neo.designation,
                    position,
                    first
                );
                Vec::new()
            } else {
                seen.insert(neo.designation.clone(), position);
                by_designation.remove(&neo.designation).unwrap_or_default()
            };

            let supplied = std::mem::take(&mut neo.approaches);
            Arc::new_cyclic(|weak| {
                for approach in supplied {
                    let mut approach =
                        Arc::try_unwrap(approach).unwrap_or_else(|shared| (*shared).clone());
                    approach.neo = Some(weak.clone());
                    neo.approaches.push(Arc::new(approach));
                }
                for index in indices {
                    if let Some(mut approach) = pending[index].take() {
                        approach.neo = Some(weak.clone());
                        let approach = Arc::new(approach);
                        linked[index] = Some(Arc::clone(&approach));
                        neo.approaches.push(approach);
                    }
                }
                neo
            })
        })
        .collect();

    for designation in by_designation.keys() {
        log::debug!("No NEO found for close approaches of {:?}", designation);
    }

    let linked_count = linked.iter().flatten().count();
    let approaches: Vec<Arc<CloseApproach>> = linked
        .into_iter()
        .zip(pending)
        .filter_map(|(linked, pending)| linked.or_else(|| pending.map(Arc::new)))
        .collect();

    log::debug!(
        "Linked {} of {} close approaches to {} NEOs ({} unmatched designations)",
        linked_count,
        approach_count,
        neos.len(),
        by_designation.len()
    );

    LinkedCatalog { neos, approaches }
}
