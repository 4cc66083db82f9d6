//! Scene reference cycle detection.
//!
//! Scheduling orders scenes by in-degree only, so a cycle between scenes can
//! never be satisfied. Cycles are reported, not broken.

use std::collections::{HashMap, HashSet};

use composer_core::{DependencyTable, FileKind};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Cycles among scene entries found by a depth-first walk, each listed from
/// its smallest path and closed by repeating the first element. A cycle that
/// only runs through scenes already finished by the walk is not reported.
#[must_use]
pub fn scene_cycles(table: &DependencyTable) -> Vec<Vec<String>> {
    let scenes: HashSet<&str> = table
        .of_kind(FileKind::Scene)
        .map(|entry| entry.path.as_str())
        .collect();

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut cycles = Vec::new();

    for start in table.of_kind(FileKind::Scene) {
        let mut stack: Vec<&str> = Vec::new();
        let mut report = |cycle: &[&str]| {
            let canonical = canonicalize(cycle);
            if seen.insert(canonical.clone()) {
                cycles.push(canonical);
            }
        };
        visit(
            table,
            &scenes,
            start.path.as_str(),
            &mut marks,
            &mut stack,
            &mut report,
        );
    }
    cycles
}

fn visit<'a>(
    table: &'a DependencyTable,
    scenes: &HashSet<&'a str>,
    node: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    report: &mut impl FnMut(&[&str]),
) {
    match marks.get(node) {
        Some(Mark::Done) => return,
        Some(Mark::Visiting) => {
            if let Some(pos) = stack.iter().position(|p| *p == node) {
                report(&stack[pos..]);
            }
            return;
        }
        None => {}
    }

    marks.insert(node, Mark::Visiting);
    stack.push(node);
    if let Some(entry) = table.get(node) {
        for reference in &entry.references {
            if scenes.contains(reference.as_str()) {
                visit(table, scenes, reference.as_str(), marks, stack, report);
            }
        }
    }
    stack.pop();
    marks.insert(node, Mark::Done);
}

fn canonicalize(cycle: &[&str]) -> Vec<String> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, path)| **path)
        .map_or(0, |(idx, _)| idx);
    let mut ordered: Vec<String> = cycle[start..]
        .iter()
        .chain(&cycle[..start])
        .map(|path| (*path).to_string())
        .collect();
    if let Some(first) = ordered.first().cloned() {
        ordered.push(first);
    }
    ordered
}
