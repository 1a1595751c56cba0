//! End-to-end scenarios for bundle resolution

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use overlay_core::{Error, NormalizedPath, Outcome, Pipeline, process};
use overlay_manifest::{Manifest, Resource};
use overlay_test_utils::engine::RecordingEngine;
use overlay_test_utils::{GENERATED_CONFIG_MAP, OTHER_SERVICE};
use pretty_assertions::assert_eq;

fn kustomization(content: &str) -> Resource {
    Resource {
        name: "kustomize/kustomization.yaml".to_string(),
        content: STANDARD.encode(content),
        encoding: "base64".to_string(),
    }
}

fn read(fs: &overlay_fs::MemoryFs, path: &str) -> String {
    fs.read_to_string(&NormalizedPath::new(path)).unwrap()
}

// ============================================================================
// Scenario A: generated manifest is appended to an existing resource list
// ============================================================================

#[test]
fn scenario_a_generated_manifest_is_added() {
    let manifest = Manifest::new(vec![kustomization("resources:\n- other.yaml\n")]);
    let pipeline = Pipeline::new().with_engine(RecordingEngine::new());

    let outcome = pipeline
        .process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "")
        .unwrap();
    assert!(outcome.used_overlay());

    let fs = pipeline.engine().only_call().fs;
    let declaration: serde_yaml::Value = serde_yaml::from_str(&read(&fs, "kustomization.yaml")).unwrap();
    let resources: Vec<&str> = declaration["resources"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|r| r.as_str())
        .collect();
    assert_eq!(resources, vec!["other.yaml", "manifests.yaml"]);
    assert_eq!(read(&fs, "manifests.yaml"), GENERATED_CONFIG_MAP);
}

#[test]
fn scenario_a_resolves_with_bundled_engine() {
    let manifest = Manifest::new(vec![
        kustomization("resources:\n- other.yaml\n"),
        Resource::plain("kustomize/other.yaml", OTHER_SERVICE),
    ]);

    let outcome = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "").unwrap();
    let ids: Vec<(Option<&str>, Option<&str>)> = outcome
        .objects()
        .iter()
        .map(|o| (o.kind(), o.name()))
        .collect();
    assert_eq!(
        ids,
        vec![
            (Some("Service"), Some("other")),
            (Some("ConfigMap"), Some("generated")),
        ]
    );
}

// ============================================================================
// Scenario B: the declaration already lists manifests.yaml
// ============================================================================

#[test]
fn scenario_b_existing_reference_is_not_duplicated() {
    let original = "resources:\n- other.yaml\n- manifests.yaml\n";
    let manifest = Manifest::new(vec![kustomization(original)]);
    let pipeline = Pipeline::new().with_engine(RecordingEngine::new());

    pipeline
        .process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "")
        .unwrap();

    let fs = pipeline.engine().only_call().fs;
    assert_eq!(read(&fs, "kustomization.yaml"), original);
}

// ============================================================================
// Scenario C: no kustomization fragment at all
// ============================================================================

#[test]
fn scenario_c_without_declaration_is_not_applicable() {
    let outcome = process(&Manifest::default(), GENERATED_CONFIG_MAP.as_bytes(), "").unwrap();
    assert_eq!(outcome, Outcome::NotApplicable);
    assert!(!outcome.used_overlay());
    assert!(outcome.into_objects().is_empty());
}

#[test]
fn scenario_c_other_subsystems_do_not_count() {
    let manifest = Manifest::new(vec![
        Resource::plain("kustomization.yaml", "resources: []\n"),
        Resource::plain("chart/kustomization.yaml", "resources: []\n"),
    ]);
    let outcome = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "").unwrap();
    assert_eq!(outcome, Outcome::NotApplicable);
}

// ============================================================================
// Scenario D: unsupported encoding tag
// ============================================================================

#[test]
fn scenario_d_unsupported_encoding_is_a_decode_error() {
    let manifest = Manifest::new(vec![
        kustomization("resources: []\n"),
        Resource {
            name: "kustomize/other.yaml".to_string(),
            content: "payload".to_string(),
            encoding: "base32".to_string(),
        },
    ]);
    let pipeline = Pipeline::new().with_engine(RecordingEngine::new());

    let err = pipeline
        .process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "")
        .unwrap_err();
    match err {
        Error::Decode { name, source } => {
            assert_eq!(name, "kustomize/other.yaml");
            assert!(matches!(
                source,
                overlay_manifest::Error::UnsupportedEncoding { .. }
            ));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
    assert!(pipeline.engine().calls().is_empty());
}
