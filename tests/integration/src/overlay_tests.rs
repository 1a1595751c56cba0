//! Multi-directory overlays resolved with the bundled engine

use overlay_core::{Error, Outcome, process};
use overlay_engine::Error as EngineError;
use overlay_test_utils::bundle::BundleBuilder;
use overlay_test_utils::{GENERATED_CONFIG_MAP, OTHER_SERVICE};
use pretty_assertions::assert_eq;

const BASE_DEPLOYMENT: &str = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 1\n";

fn names(outcome: &Outcome) -> Vec<&str> {
    outcome.objects().iter().filter_map(|o| o.name()).collect()
}

#[test]
fn test_overlay_with_base_and_generated_content() {
    let manifest = BundleBuilder::new()
        .overlay_file("base/kustomization.yaml", "resources:\n- deployment.yaml\n")
        .overlay_file("base/deployment.yaml", BASE_DEPLOYMENT)
        .overlay_file("overlays/prod/kustomization.yaml", "resources:\n- ../../base\n- service.yaml\n")
        .gzipped("kustomize/overlays/prod/service.yaml", OTHER_SERVICE)
        .plain("chart/values.yaml", "replicas: 3\n")
        .build();

    let outcome = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "overlays/prod").unwrap();
    assert_eq!(names(&outcome), vec!["web", "other", "generated"]);
}

#[test]
fn test_empty_generated_content_is_not_listed() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "resources:\n- other.yaml\n")
        .overlay_file("other.yaml", OTHER_SERVICE)
        .build();

    let outcome = process(&manifest, b"", "").unwrap();
    assert!(outcome.used_overlay());
    assert_eq!(names(&outcome), vec!["other"]);
}

#[test]
fn test_overlay_with_nothing_but_generated_content() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "")
        .build();

    let outcome = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), ".").unwrap();
    assert_eq!(names(&outcome), vec!["generated"]);
}

#[test]
fn test_unparsable_declaration_fails_in_engine() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "resources: [unclosed\n")
        .build();

    let err = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "").unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::InvalidDeclaration { .. })
    ));
}

#[test]
fn test_missing_reference_fails_in_engine() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "resources:\n- other.yaml\n")
        .build();

    let err = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "").unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::MissingResource { .. })
    ));
}

#[test]
fn test_generated_content_duplicating_a_resource_fails() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "resources:\n- copy.yaml\n")
        .overlay_file("copy.yaml", GENERATED_CONFIG_MAP)
        .build();

    let err = process(&manifest, GENERATED_CONFIG_MAP.as_bytes(), "").unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::DuplicateResource { .. })
    ));
}

#[test]
fn test_concurrent_invocations_are_independent() {
    let manifest = BundleBuilder::new()
        .overlay_file("kustomization.yaml", "resources: []\n")
        .build();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let manifest = &manifest;
                scope.spawn(move || {
                    let generated = format!(
                        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm-{i}\n"
                    );
                    process(manifest, generated.as_bytes(), "").unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let outcome = handle.join().unwrap();
            assert_eq!(names(&outcome), vec![format!("cm-{i}").as_str()]);
        }
    });
}
