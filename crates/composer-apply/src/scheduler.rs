//! Dependency scheduling.
//!
//! Turns a populated [`DependencyTable`] into a write order, synthesizes
//! placeholders for references nothing provides, and drives the writes.
//!
//! The order is resources, then scripts, then scenes; scenes are sorted by
//! how often other table entries reference them (least referenced first).
//! This is a heuristic, not a topological sort: scene cycles are reported as
//! warnings and otherwise left alone.

use std::collections::HashMap;

use composer_config::PipelineConfig;
use composer_core::ids::generate_uid;
use composer_core::{
    ApplyReport, DependencyEntry, DependencyTable, FileKind, FileOutcome, FileReport,
    ProcessingOrder, paths,
};
use composer_scene::{placeholder, references, upgrade};
use rand::Rng;

use crate::cycles::scene_cycles;
use crate::materializer;
use crate::storage::ProjectStorage;

pub struct Scheduler<'a, S: ?Sized, R: ?Sized> {
    storage: &'a mut S,
    rng: &'a mut R,
    options: &'a PipelineConfig,
}

impl<'a, S, R> Scheduler<'a, S, R>
where
    S: ProjectStorage + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(storage: &'a mut S, rng: &'a mut R, options: &'a PipelineConfig) -> Self {
        Self {
            storage,
            rng,
            options,
        }
    }

    /// Plan, check for cycles, and write every entry of `table`.
    pub fn process(&mut self, table: &mut DependencyTable) -> ApplyReport {
        let order = self.plan(table);

        let mut warnings = Vec::new();
        if self.options.detect_cycles {
            for cycle in scene_cycles(table) {
                let warning = format!("scene cycle: {}", cycle.join(" -> "));
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
        }

        let files = self.materialize(table, &order);
        ApplyReport {
            order,
            files,
            warnings,
        }
    }

    /// Upgrade legacy scenes, build the order, and splice in placeholder
    /// entries for missing references. Writes nothing.
    pub fn plan(&mut self, table: &mut DependencyTable) -> ProcessingOrder {
        if self.options.upgrade_legacy_scenes {
            self.upgrade_legacy_scenes(table);
        }
        let mut order = initial_order(table);
        self.splice_placeholders(table, &mut order);
        tracing::debug!(entries = order.len(), "planned processing order");
        order
    }

    fn upgrade_legacy_scenes(&mut self, table: &mut DependencyTable) {
        for entry in table.iter_mut() {
            if entry.kind != FileKind::Scene || !upgrade::needs_upgrade(&entry.content) {
                continue;
            }
            tracing::debug!(path = %entry.path, "upgrading legacy scene");
            entry.content = upgrade::upgrade(&entry.content, &mut *self.rng);
            entry.references = references::scene_references(&entry.content);
        }
    }

    /// Walk the order by index. A reference that is neither on storage nor in
    /// the table becomes a pending entry, inserted right before the current
    /// entry when both share a kind and at the end of its kind's group
    /// otherwise. When that lands before the current entry the walk index
    /// moves with it, so the current entry keeps its place in the walk.
    fn splice_placeholders(&self, table: &mut DependencyTable, order: &mut ProcessingOrder) {
        let mut index = 0;
        while index < order.len() {
            let Some(current) = order.get(index).map(str::to_string) else {
                break;
            };
            let Some((current_kind, references)) = table.get(&current).map(|entry| {
                let references: Vec<String> = entry.references.iter().cloned().collect();
                (entry.kind, references)
            }) else {
                index += 1;
                continue;
            };

            for reference in references {
                if table.contains(&reference) || self.storage.exists(&reference) {
                    continue;
                }
                let kind = FileKind::from_path(&reference);
                let at = if kind == current_kind {
                    index
                } else {
                    group_end(table, order, kind)
                };
                tracing::debug!(path = %reference, referenced_by = %current, "synthesizing placeholder");
                table.insert(DependencyEntry::pending(reference.clone(), kind));
                order.insert(at, reference);
                if at <= index {
                    index += 1;
                }
            }
            index += 1;
        }
    }

    /// Write every not-yet-materialized order entry, synthesizing content for
    /// pending ones.
    pub fn materialize(
        &mut self,
        table: &mut DependencyTable,
        order: &ProcessingOrder,
    ) -> Vec<FileReport> {
        let mut reports = Vec::with_capacity(order.len());
        for path in order.iter() {
            let Some(entry) = table.get(path) else {
                continue;
            };
            if entry.is_materialized() {
                continue;
            }

            let content = if entry.has_content() {
                entry.content.clone()
            } else {
                match self.synthesize(table, entry) {
                    Some(content) => content,
                    None => {
                        let reason = format!(
                            "no placeholder template for .{}",
                            paths::extension(path)
                        );
                        tracing::debug!(path, %reason, "skipping");
                        reports.push(FileReport::new(path, FileOutcome::Skipped(reason)));
                        continue;
                    }
                }
            };

            let outcome = materializer::materialize(&mut *self.storage, path, &content);
            if let Some(entry) = table.get_mut(path) {
                entry.content = content;
                if outcome.is_written() || self.options.mark_failed_as_materialized {
                    entry.mark_materialized();
                }
            }
            reports.push(FileReport::new(path, outcome));
        }
        reports
    }

    fn synthesize(&mut self, table: &DependencyTable, entry: &DependencyEntry) -> Option<String> {
        match entry.kind {
            FileKind::Script => Some(placeholder::script_for(&entry.path)),
            FileKind::Scene => {
                let script = paths::with_extension(&entry.path, paths::SCRIPT_EXTENSION);
                let linked = (table.contains(&script) || self.storage.exists(&script))
                    .then_some(script.as_str());
                let uid = generate_uid(&mut *self.rng);
                Some(placeholder::scene_for(&entry.path, &uid, linked))
            }
            FileKind::Resource => placeholder::resource_for(&entry.path),
        }
    }
}

/// Resources (minus anything carrying a script or scene extension), scripts,
/// then scenes by ascending in-degree. Ties keep table order.
fn initial_order(table: &DependencyTable) -> ProcessingOrder {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for entry in table.iter() {
        for reference in &entry.references {
            if table.contains(reference) {
                *in_degree.entry(reference.as_str()).or_default() += 1;
            }
        }
    }

    let resources = table.of_kind(FileKind::Resource).filter(|entry| {
        let ext = paths::extension(&entry.path);
        !ext.eq_ignore_ascii_case(paths::SCRIPT_EXTENSION)
            && !ext.eq_ignore_ascii_case(paths::SCENE_EXTENSION)
    });
    let scripts = table.of_kind(FileKind::Script);
    let mut scenes: Vec<&DependencyEntry> = table.of_kind(FileKind::Scene).collect();
    scenes.sort_by_key(|entry| in_degree.get(entry.path.as_str()).copied().unwrap_or(0));

    resources
        .chain(scripts)
        .chain(scenes)
        .map(|entry| entry.path.clone())
        .collect()
}

/// Index just past the last order entry whose kind sorts at or before `kind`.
fn group_end(table: &DependencyTable, order: &ProcessingOrder, kind: FileKind) -> usize {
    order
        .iter()
        .position(|path| table.get(path).is_some_and(|entry| entry.kind > kind))
        .unwrap_or(order.len())
}

/// Whether `path` is ready to be written: it is untracked, or each of its
/// references is on storage or already materialized in the table.
pub fn has_all_dependencies<S: ProjectStorage + ?Sized>(
    table: &DependencyTable,
    path: &str,
    storage: &S,
) -> bool {
    let Some(entry) = table.get(path) else {
        return true;
    };
    entry.references.iter().all(|reference| {
        storage.exists(reference)
            || table
                .get(reference)
                .is_some_and(DependencyEntry::is_materialized)
    })
}
