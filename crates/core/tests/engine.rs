// Engine behavior: ordering, fail-fast, final output
use binder_core::config::{PipelineConfig, StepConfig};
use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, PipelineEngine, Step, StepParams, StepRegistry};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<String>>>;

/// Appends its name to the context metadata and to a shared call log
struct RecordingStep {
    name: String,
    calls: Calls,
}

impl Step for RecordingStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, mut context: PipelineContext, _params: &StepParams) -> Result<PipelineContext> {
        self.calls.lock().unwrap().push(self.name.clone());
        context.record(self.name.clone(), json!({"ran": true}));
        Ok(context)
    }
}

/// Always fails with a runtime error
struct FailingStep {
    calls: Calls,
}

impl Step for FailingStep {
    fn name(&self) -> &str {
        "explode"
    }

    fn execute(&self, _context: PipelineContext, _params: &StepParams) -> Result<PipelineContext> {
        self.calls.lock().unwrap().push("explode".to_string());
        Err(BinderError::http("upstream returned 500"))
    }
}

/// Writes `params.payload` into the data tree
struct SeedStep;

impl Step for SeedStep {
    fn name(&self) -> &str {
        "seed"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let payload = params
            .get("payload")
            .cloned()
            .ok_or_else(|| BinderError::missing_param(params.step(), "payload"))?;
        context.data = payload;
        Ok(context)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn engine_with(calls: &Calls) -> PipelineEngine {
    init_tracing();
    let mut registry = StepRegistry::new();
    for name in ["alpha", "beta", "gamma", "delta"] {
        let calls = Arc::clone(calls);
        registry.register(name, move || {
            Box::new(RecordingStep {
                name: name.to_string(),
                calls: Arc::clone(&calls),
            })
        });
    }
    let failing_calls = Arc::clone(calls);
    registry.register("explode", move || {
        Box::new(FailingStep {
            calls: Arc::clone(&failing_calls),
        })
    });
    registry.register("seed", || Box::new(SeedStep));
    PipelineEngine::new(Arc::new(registry))
}

fn steps(names: &[&str]) -> Vec<StepConfig> {
    names.iter().map(|name| StepConfig::new(*name)).collect()
}

fn recorded(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().clone()
}

#[test]
fn test_empty_pipeline_fails() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.json");
    let config = PipelineConfig::new(vec![])
        .with_save_final_output(true)
        .with_target_file(&target);

    assert!(!engine.execute(&config));
    assert!(matches!(engine.run(&config), Err(BinderError::EmptyPipeline)));
    assert!(recorded(&calls).is_empty());
    assert!(!target.exists());
}

#[test]
fn test_metadata_follows_configured_order() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["gamma", "alpha", "delta", "beta"]));

    let context = engine.run(&config).unwrap();

    let names: Vec<&str> = context.metadata().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["gamma", "alpha", "delta", "beta"]);
    assert_eq!(recorded(&calls), vec!["gamma", "alpha", "delta", "beta"]);
}

#[test]
fn test_repeated_step_appends_metadata() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["alpha", "beta", "alpha"]));

    let context = engine.run(&config).unwrap();

    let names: Vec<&str> = context.metadata().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["alpha", "beta", "alpha#2"]);
    assert_eq!(context.metadata().len(), 3);
    assert_eq!(recorded(&calls), vec!["alpha", "beta", "alpha"]);
}

#[test]
fn test_missing_step_name_stops_run() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let mut entries = steps(&["alpha", "beta", "gamma"]);
    entries[1].step = None;
    let config = PipelineConfig::new(entries);

    let err = engine.run(&config).unwrap_err();
    assert!(matches!(err, BinderError::MissingStepName { position: 2 }));
    assert!(err.is_config());
    assert_eq!(recorded(&calls), vec!["alpha"]);
}

#[test]
fn test_blank_step_name_counts_as_missing() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["  ", "alpha"]));

    assert!(matches!(
        engine.run(&config),
        Err(BinderError::MissingStepName { position: 1 })
    ));
    assert!(recorded(&calls).is_empty());
}

#[test]
fn test_unknown_step_stops_run() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["alpha", "fetch_digimon", "beta"]));

    assert!(!engine.execute(&config));

    calls.lock().unwrap().clear();
    match engine.run(&config) {
        Err(BinderError::UnknownStep { position, name }) => {
            assert_eq!(position, 2);
            assert_eq!(name, "fetch_digimon");
        }
        other => panic!("expected UnknownStep, got {:?}", other.map(|_| ())),
    }
    assert_eq!(recorded(&calls), vec!["alpha"]);
}

#[test]
fn test_failing_middle_step_stops_run() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["alpha", "beta", "explode", "gamma"]));

    let err = engine.run(&config).unwrap_err();
    assert!(matches!(err, BinderError::Http(_)));
    assert!(!err.is_config());
    assert_eq!(recorded(&calls), vec!["alpha", "beta", "explode"]);
}

#[test]
fn test_step_params_reach_step() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(vec![
        StepConfig::new("seed").with_param("payload", json!({"sections": {"kanto": {}}})),
    ]);

    let context = engine.run(&config).unwrap();
    assert_eq!(context.data, json!({"sections": {"kanto": {}}}));
}

#[test]
fn test_step_config_error_propagates() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let config = PipelineConfig::new(steps(&["seed", "alpha"]));

    let err = engine.run(&config).unwrap_err();
    assert!(matches!(err, BinderError::MissingParam { ref step, .. } if step == "seed"));
    assert!(recorded(&calls).is_empty());
}

#[test]
fn test_final_output_round_trip() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/final.json");
    let payload = json!({
        "sections": {
            "kanto": {"title": {"en": "Kanto"}, "cards": [{"pokemon": "bulbasaur", "id": 1}]}
        }
    });
    let config = PipelineConfig::new(vec![
        StepConfig::new("seed").with_param("payload", payload.clone()),
        StepConfig::new("alpha"),
    ])
    .with_save_final_output(true)
    .with_target_file(&target);

    let context = engine.run(&config).unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written, context.data);
    assert_eq!(written, payload);
}

#[test]
fn test_final_output_skipped_without_data() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("final.json");
    let config = PipelineConfig::new(steps(&["alpha"]))
        .with_save_final_output(true)
        .with_target_file(&target);

    assert!(engine.execute(&config));
    assert!(!target.exists());
}

#[test]
fn test_final_output_not_written_unless_requested() {
    let calls = Calls::default();
    let engine = engine_with(&calls);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("final.json");
    let config = PipelineConfig::new(vec![
        StepConfig::new("seed").with_param("payload", json!({"a": 1})),
    ])
    .with_target_file(&target);

    let context = engine.run(&config).unwrap();
    assert_eq!(context.target_file.as_deref(), Some(target.as_path()));
    assert!(!target.exists());
}
