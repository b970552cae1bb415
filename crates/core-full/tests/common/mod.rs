// Shared fixtures: canned API responses and a temp workspace
#![allow(dead_code)]

use binder_core::config::{PipelineConfig, StepConfig};
use binder_core::error::Result;
use binder_core::pipeline::{PipelineEngine, StepRegistry};
use binder_core_full::{DataFetcher, ImageFetcher, StepServices, register_steps};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned resources and counts every call
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn with(mut self, resource: &str, value: Value) -> Self {
        self.responses.insert(resource.to_string(), value);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataFetcher for StubFetcher {
    fn fetch(&self, resource: &str) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.responses.get(resource).cloned())
    }
}

impl ImageFetcher for StubFetcher {
    fn fetch_image(&self, _url: &str) -> Result<Option<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

fn species(id: u32, en: &str, de: &str) -> Value {
    json!({
        "id": id,
        "names": [
            {"language": {"name": "en"}, "name": en},
            {"language": {"name": "de"}, "name": de}
        ]
    })
}

pub fn pokeapi() -> Arc<StubFetcher> {
    Arc::new(
        StubFetcher::default()
            .with(
                "pokemon-species?limit=2000",
                json!({"results": [
                    {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/"},
                    {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon-species/4/"}
                ]}),
            )
            .with("pokemon-species/1", species(1, "Bulbasaur", "Bisasam"))
            .with("pokemon-species/4", species(4, "Charmander", "Glumanda")),
    )
}

pub fn tcgdex() -> Arc<StubFetcher> {
    Arc::new(
        StubFetcher::default()
            .with(
                "en/cards/base1-44",
                json!({"id": "base1-44", "name": "Bulbasaur", "rarity": "Common",
                       "image": "https://assets.tcgdex.net/en/base/base1/44"}),
            )
            .with(
                "de/cards/base1-44",
                json!({"id": "base1-44", "name": "Bisasam",
                       "image": "https://assets.tcgdex.net/de/base/base1/44"}),
            )
            .with(
                "en/cards/base1-46",
                json!({"id": "base1-46", "name": "Charmander", "illustrator": "Mitsuhiro Arita",
                       "image": "https://assets.tcgdex.net/en/base/base1/46"}),
            ),
    )
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

pub fn engine(pokeapi: Arc<StubFetcher>, tcgdex: Arc<StubFetcher>) -> PipelineEngine {
    init_tracing();
    let services = StepServices::new(pokeapi, tcgdex.clone(), tcgdex);
    let mut registry = StepRegistry::new();
    register_steps(&mut registry, &services);
    PipelineEngine::new(Arc::new(registry))
}

/// Temp dir with a source and fixes file written into it
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Self { dir };
        workspace.write(
            "source.json",
            &json!({"sections": {"kanto": {
                "title": {"en": "Kanto"},
                "cards": [
                    {"pokemon": "charmander", "set": "base1", "number": "46"},
                    {"pokemon": "Bulbasaur", "set": "base1", "number": "44"},
                    {"pokemon": "agumon"}
                ]
            }}}),
        );
        workspace.write(
            "fixes.json",
            &json!({"kanto": {
                "description": {"en": "First region"},
                "cards": {"agumon": {"pokemon": "missingno", "name": {"en": "MissingNo."}}}
            }}),
        );
        workspace
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn arg(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }

    pub fn write(&self, name: &str, value: &Value) {
        std::fs::write(self.path(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    /// Every core-full step, in the usual order
    pub fn full_config(&self) -> PipelineConfig {
        PipelineConfig::new(vec![
            StepConfig::new("load_source").with_param("file", self.arg("source.json")),
            StepConfig::new("build_index").with_param("output", self.arg("index.json")),
            StepConfig::new("fetch_pokemon")
                .with_param("index_file", self.arg("index.json"))
                .with_param("cache_dir", self.arg("cache/pokeapi")),
            StepConfig::new("enrich_tcg")
                .with_param("cache_dir", self.arg("cache/tcgdex"))
                .with_param("languages", json!(["en", "de"])),
            StepConfig::new("apply_fixes").with_param("file", self.arg("fixes.json")),
            StepConfig::new("transform_sections")
                .with_param("languages", json!(["en", "de"]))
                .with_param("sort_by", "number"),
            StepConfig::new("render_binder")
                .with_param("output", self.arg("out/binder.html"))
                .with_param("language", "de"),
        ])
        .with_save_final_output(true)
        .with_target_file(self.path("out/final.json"))
    }
}

pub fn read(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
