// Assembly pipeline ordering and failure semantics, driven by a recording
// fake model

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use hardshell::catalog::{
    ActiveOption, ActiveOptionSet, CatalogStore, OptionDef, SectionSpec,
};
use hardshell::error::{Error, Result};
use hardshell::gateway::{AnalysisReport, ImprovementResult, ScriptModel};
use hardshell::pipeline::{AssemblyEvent, ScriptAssembler};
use hardshell::selection::SelectionState;

/// Records every call in order; optionally fails at one named call.
struct RecordingModel {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl RecordingModel {
    fn new() -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(Self {
            calls: calls.clone(),
            fail_on: None,
        });
        (model, calls)
    }

    fn failing_on(call: &str) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(Self {
            calls: calls.clone(),
            fail_on: Some(call.to_string()),
        });
        (model, calls)
    }

    fn record(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail_on.as_deref() == Some(call) {
            return Err(Error::Api("HTTP status 500".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ScriptModel for RecordingModel {
    async fn generate_header(&self) -> Result<String> {
        self.record("header")?;
        Ok("H".to_string())
    }
    async fn generate_section(&self, option: &ActiveOption) -> Result<String> {
        self.record(&format!("section:{}", option.id()))?;
        Ok(format!("S:{}", option.id()))
    }
    async fn generate_footer(&self) -> Result<String> {
        self.record("footer")?;
        Ok("F".to_string())
    }
    async fn analyze(&self, _output: &str) -> Result<AnalysisReport> {
        unreachable!("pipeline never analyzes")
    }
    async fn improve(
        &self,
        _script: &str,
        _options: &[ActiveOption],
    ) -> Result<ImprovementResult> {
        unreachable!("pipeline never improves")
    }
}

fn catalog() -> CatalogStore {
    CatalogStore::from_defs(&[
        OptionDef::new("a", "Alpha").with_prompt("pa"),
        OptionDef::new("b", "Beta").with_prompt("pb"),
        OptionDef::new("c", "Gamma").with_prompt("pc"),
        OptionDef::new("reboot-me", "Reboot").with_prompt("pr").with_reboot(true),
    ])
    .unwrap()
}

fn active_set(catalog: &CatalogStore, ids: &[&str]) -> ActiveOptionSet {
    let mut selection = SelectionState::new(catalog);
    for id in ids {
        selection.toggle(catalog, id).unwrap();
    }
    ActiveOptionSet::capture(catalog, &selection, None)
}

fn single_option() -> ActiveOptionSet {
    ActiveOptionSet {
        options: vec![ActiveOption::Catalog(SectionSpec {
            id: "one".into(),
            label: "One".into(),
            prompt: "P".into(),
        })],
        reboot_recommended: false,
    }
}

#[tokio::test]
async fn test_single_option_join_rule_and_call_order() {
    // Scenario: one option, mocked H/S/F, expect "H\n\nS:one\n\nF\n".
    let (model, calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);

    let result = assembler.generate(&single_option(), None).await.unwrap();
    assert_eq!(result.script, "H\n\nS:one\n\nF\n");
    assert_eq!(result.steps, 3);
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["header", "section:one", "footer"]
    );
}

#[tokio::test]
async fn test_three_sections_run_in_catalog_order_between_header_and_footer() {
    let catalog = catalog();
    let active = active_set(&catalog, &["c", "a", "b"]); // toggle order scrambled
    let (model, calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);

    assembler.generate(&active, None).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec!["header", "section:a", "section:b", "section:c", "footer"]
    );
}

#[tokio::test]
async fn test_failure_mid_run_aborts_without_footer() {
    let catalog = catalog();
    let active = active_set(&catalog, &["a", "b", "c"]);
    let (model, calls) = RecordingModel::failing_on("section:b");
    let assembler = ScriptAssembler::new(model);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let err = assembler.generate(&active, Some(&tx)).await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));

    // Nothing after the failing section was dispatched.
    let calls = calls.lock().unwrap();
    assert_eq!(*calls, vec!["header", "section:a", "section:b"]);

    // The accumulated script was transiently visible but is not the result.
    drop(tx);
    let mut last_partial = None;
    while let Some(event) = rx.recv().await {
        if let AssemblyEvent::ScriptSoFar(text) = event {
            last_partial = Some(text);
        }
    }
    assert_eq!(last_partial.as_deref(), Some("H\n\nS:a"));
}

#[tokio::test]
async fn test_progress_steps_are_one_based_and_count_header_footer() {
    let catalog = catalog();
    let active = active_set(&catalog, &["a", "b"]);
    let (model, _calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);

    let (tx, mut rx) = mpsc::unbounded_channel();
    assembler.generate(&active, Some(&tx)).await.unwrap();
    drop(tx);

    let mut steps = Vec::new();
    while let Some(event) = rx.recv().await {
        if let AssemblyEvent::Step(progress) = event {
            assert_eq!(progress.total, 4);
            steps.push((progress.step, progress.message));
        }
    }
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].0, 1);
    assert!(steps[0].1.contains("header"));
    assert!(steps[1].1.contains("Alpha"));
    assert!(steps[2].1.contains("Beta"));
    assert_eq!(steps[3].0, 4);
    assert!(steps[3].1.contains("footer"));
}

#[tokio::test]
async fn test_reboot_flag_set_only_when_flagged_option_selected() {
    let catalog = catalog();
    let (model, _calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);

    let plain = active_set(&catalog, &["a"]);
    let result = assembler.generate(&plain, None).await.unwrap();
    assert!(!result.reboot_recommended);

    let (model, _calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);
    let rebooting = active_set(&catalog, &["a", "reboot-me"]);
    let result = assembler.generate(&rebooting, None).await.unwrap();
    assert!(result.reboot_recommended);
}

#[tokio::test]
async fn test_empty_active_set_is_a_validation_error() {
    let (model, calls) = RecordingModel::new();
    let assembler = ScriptAssembler::new(model);
    let empty = ActiveOptionSet {
        options: Vec::new(),
        reboot_recommended: false,
    };

    let err = assembler.generate(&empty, None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(calls.lock().unwrap().is_empty());
}
