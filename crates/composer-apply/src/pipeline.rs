//! The two response pipelines.
//!
//! [`Composer::apply_response`] is the dependency-aware path: extract every
//! block, scan the prose for implied files, then schedule and write.
//! [`Composer::apply_fast`] writes `File:`-labelled blocks one by one with
//! scene validation and no dependency handling.
//!
//! Each call builds a fresh table, so nothing from one response leaks into
//! the next.

use composer_config::{ComposerConfig, PipelineConfig};
use composer_core::{
    ApplyReport, Clock, DependencyEntry, DependencyTable, FileKind, FileOutcome, FileReport,
    ProcessingOrder, SystemClock,
};
use composer_extract::{BlockExtractor, DependencyScanner};
use composer_scene::{references_for, upgrade, validate_scene};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::error::ApplyError;
use crate::materializer;
use crate::scheduler::Scheduler;
use crate::storage::{FsStorage, ProjectStorage};

pub struct Composer<S, R, C = SystemClock> {
    storage: S,
    rng: R,
    extractor: BlockExtractor<C>,
    scanner: DependencyScanner,
    options: PipelineConfig,
}

impl Composer<FsStorage, ThreadRng, SystemClock> {
    /// Composer writing into the configured project root.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Config`] when the project root is unset or not a
    /// directory.
    pub fn for_project(config: &ComposerConfig) -> Result<Self, ApplyError> {
        config.project.validate()?;
        let storage = FsStorage::open(config.project.root_path())?;
        Ok(Self::new(
            storage,
            rand::thread_rng(),
            SystemClock::new(),
            config.pipeline.clone(),
        ))
    }
}

impl<S, R, C> Composer<S, R, C>
where
    S: ProjectStorage,
    R: Rng,
    C: Clock,
{
    pub const fn new(storage: S, rng: R, clock: C, options: PipelineConfig) -> Self {
        Self {
            storage,
            rng,
            extractor: BlockExtractor::new(clock),
            scanner: DependencyScanner::new(),
            options,
        }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub const fn options(&self) -> &PipelineConfig {
        &self.options
    }

    /// Run whichever pipeline the options select.
    pub fn apply(&mut self, response: &str) -> ApplyReport {
        if self.options.fast_path {
            self.apply_fast(response)
        } else {
            self.apply_response(response)
        }
    }

    /// Extracted blocks plus scanned dependencies, before scheduling.
    ///
    /// A response without code blocks yields an empty table; its prose is
    /// not scanned.
    #[must_use]
    pub fn build_table(&self, response: &str) -> DependencyTable {
        let mut table = DependencyTable::new();
        let blocks = self.extractor.extract_all(response);
        if blocks.is_empty() {
            return table;
        }

        for block in blocks {
            let kind = FileKind::from_path(&block.inferred_path);
            let references = references_for(kind, &block.raw_content);
            table.insert(
                DependencyEntry::with_content(block.inferred_path, kind, block.raw_content)
                    .with_references(references),
            );
        }

        let storage = &self.storage;
        let scanned = self
            .scanner
            .scan(response, &mut table, |path| storage.exists(path));
        tracing::debug!(entries = table.len(), scanned, "built dependency table");
        table
    }

    /// The dependency-aware pipeline.
    pub fn apply_response(&mut self, response: &str) -> ApplyReport {
        let mut table = self.build_table(response);
        if table.is_empty() {
            return ApplyReport::default();
        }
        let report =
            Scheduler::new(&mut self.storage, &mut self.rng, &self.options).process(&mut table);
        tracing::info!(
            files = report.files.len(),
            failures = report.failures().count(),
            "applied response"
        );
        report
    }

    /// The direct-write pipeline. Scenes are upgraded when legacy and then
    /// validated; a block that fails validation is reported and not written.
    pub fn apply_fast(&mut self, response: &str) -> ApplyReport {
        let mut report = ApplyReport::default();
        let mut order = ProcessingOrder::new();

        for block in self.extractor.extract_fast(response) {
            let path = block.inferred_path;
            let mut content = block.raw_content;
            order.push(path.as_str());

            if block.inferred_type == FileKind::Scene {
                if self.options.upgrade_legacy_scenes && upgrade::needs_upgrade(&content) {
                    content = upgrade::upgrade(&content, &mut self.rng);
                }
                if self.options.validate_scenes {
                    if let Err(error) = validate_scene(&content) {
                        tracing::warn!(path, %error, "rejected scene block");
                        report
                            .files
                            .push(FileReport::new(path, FileOutcome::Error(error.to_string())));
                        continue;
                    }
                }
            }

            let outcome = materializer::materialize(&mut self.storage, &path, &content);
            report.files.push(FileReport::new(path, outcome));
        }

        report.order = order;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use composer_core::FixedClock;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn composer(storage: MemoryStorage) -> Composer<MemoryStorage, StdRng, FixedClock> {
        Composer::new(
            storage,
            StdRng::seed_from_u64(7),
            FixedClock::at_unix(1_700_000_000),
            PipelineConfig::default(),
        )
    }

    #[test]
    fn prose_only_response_is_a_no_op() {
        let mut composer = composer(MemoryStorage::new());
        let report =
            composer.apply_response("You should create a script called Mover to handle input.");
        assert!(report.is_empty());
        assert!(report.order.is_empty());
        assert!(composer.storage().is_empty());
    }

    #[test]
    fn table_holds_blocks_with_their_references() {
        let composer = composer(MemoryStorage::new());
        let response = "File: res://main.tscn\n```tscn\n[gd_scene format=3]\n\n[ext_resource type=\"Script\" path=\"res://main.gd\" id=\"1_a\"]\n\n[node name=\"Main\" type=\"Node2D\"]\nscript = ExtResource(\"1_a\")\n```\n";
        let table = composer.build_table(response);

        let entry = table.get("res://main.tscn").unwrap();
        assert_eq!(entry.kind, FileKind::Scene);
        assert!(entry.references.contains("res://main.gd"));
        assert!(!entry.is_materialized());
    }

    #[test]
    fn fast_path_rejects_invalid_scene_but_writes_the_rest() {
        let mut composer = composer(MemoryStorage::new());
        let response = "File: res://broken.tscn\n```tscn\n[gd_scene format=3]\n```\n\nFile: res://ok.gd\n```gdscript\nextends Node\n```\n";
        let report = composer.apply_fast(response);

        assert_eq!(report.files.len(), 2);
        assert_eq!(
            report.files[0].outcome,
            FileOutcome::Error("Validation error: scene has no [node] section".into())
        );
        assert_eq!(report.files[1].outcome, FileOutcome::Created);
        assert!(!composer.storage().exists("res://broken.tscn"));
    }

    #[test]
    fn fast_path_upgrades_legacy_scenes_before_validating() {
        let mut composer = composer(MemoryStorage::new());
        let response = "File: res://Enemy.tscn\n```tscn\n[gd_scene format=2]\n\n[node name=\"Enemy\" type=\"KinematicBody2D\"]\n```\n";
        let report = composer.apply_fast(response);

        assert_eq!(report.files[0].outcome, FileOutcome::Created);
        let written = composer.storage().read("res://Enemy.tscn").unwrap();
        assert!(written.contains("format=3"));
        assert!(written.contains("type=\"CharacterBody2D\""));
    }

    #[test]
    fn apply_dispatches_on_fast_path_option() {
        let response = "```\nsome notes\n```\n";
        let mut legacy = composer(MemoryStorage::new());
        assert_eq!(legacy.apply(response).files.len(), 1);

        let mut fast = Composer::new(
            MemoryStorage::new(),
            StdRng::seed_from_u64(7),
            FixedClock::at_unix(1_700_000_000),
            PipelineConfig {
                fast_path: true,
                ..PipelineConfig::default()
            },
        );
        assert!(fast.apply(response).is_empty());
    }
}
