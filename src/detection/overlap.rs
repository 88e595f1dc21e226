//! Cross-faculty overlap finder.
//!
//! Flags bookings of one section that collide in time regardless of who
//! teaches them. Occurrences are grouped by `(term, day, section)`; inside
//! a group, two occurrences are adjacent when their time keys are equal or
//! their intervals overlap. Each connected component of two or more
//! occurrences becomes one group, so A–B and B–C collisions land together
//! even when A and C do not touch.
//!
//! # Algorithm
//! Pairwise adjacency (O(n²) per group), then iterative depth-first
//! traversal for the components. A disjoint-set forest over interval
//! sweeps would bring this to O(n log n) for large sections; group sizes
//! here are a handful of classes.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)

use log::trace;

use super::{group_by, ConflictRule, RuleScope};
use crate::models::{ConflictGroup, ConflictReason, Occurrence, Weekday};

/// Faculty-agnostic section overlap rule.
#[derive(Debug, Clone, Copy)]
pub struct CrossFacultyOverlap;

impl ConflictRule for CrossFacultyOverlap {
    fn reason(&self) -> ConflictReason {
        ConflictReason::CrossFacultyOverlap
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Section
    }

    fn detect(&self, occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
        let mut groups = Vec::new();

        for ((term, day, section), items) in group_by(occurrences, section_key) {
            if items.len() < 2 {
                continue;
            }
            let components =
                connected_components(items.len(), |i, j| items[i].time_collides(items[j]));

            for component in components.into_iter().filter(|c| c.len() >= 2) {
                let members: Vec<String> = component.iter().map(|i| i.to_string()).collect();
                let group_key = format!("{term}|{day}|{section}#{}", members.join(","));
                let group_items = component.iter().map(|&i| items[i].clone()).collect();
                groups.push(ConflictGroup::new(self.reason(), group_key, group_items));
            }
        }

        trace!("cross-faculty overlap produced {} groups", groups.len());
        groups
    }

    fn description(&self) -> &'static str {
        "Section booked by overlapping classes"
    }
}

fn section_key(occ: &Occurrence) -> Option<(&str, Weekday, &str)> {
    let term = occ.term.as_deref()?;
    let day = occ.day?;
    if occ.section.is_empty() {
        return None;
    }
    Some((term, day, occ.section.as_str()))
}

/// Runs the cross-faculty overlap finder over day-expanded occurrences.
///
/// Occurrences without term, day or section are ignored; faculty identity
/// is not required.
pub fn detect_cross_faculty_overlaps(occurrences: &[Occurrence]) -> Vec<ConflictGroup> {
    let rule = CrossFacultyOverlap;
    let eligible: Vec<Occurrence> = occurrences
        .iter()
        .filter(|o| rule.scope().admits(o))
        .cloned()
        .collect();
    rule.detect(&eligible)
}

/// Connected components of an undirected graph on `0..n`.
///
/// `adjacent(i, j)` is queried once per unordered pair. Components are
/// returned in order of their smallest node, each sorted ascending.
pub fn connected_components<F>(n: usize, adjacent: F) -> Vec<Vec<usize>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if adjacent(i, j) {
                adj[i].push(j);
                adj[j].push(i);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![root];
        let mut component = Vec::new();

        while let Some(node) = stack.pop() {
            component.push(node);
            for &next in &adj[node] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}
