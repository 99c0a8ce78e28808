//! Configuration-to-chain integration tests

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

use wrapchain::config::Config;
use wrapchain::registry::{TransformerRegistry, json_fn};
use wrapchain::{Error, JsonChain};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

fn load_chain(yaml: &str, registry: &TransformerRegistry) -> wrapchain::Result<JsonChain> {
    let file = write_config(yaml);
    Config::load(Some(file.path()))?.build_chain(registry)
}

#[test]
fn yaml_file_builds_working_chain() {
    // GIVEN: a config that validates, projects, redacts and renames
    let yaml = r"
name: user-export
prepend:
  - type: require
    paths: [id]
transformers:
  - type: project
    paths: [id, user.email, user.name]
  - type: redact
    rules:
      - pattern: '[\w.+-]+@[\w-]+\.[\w.]+'
        replacement: '[EMAIL]'
  - type: rename
    fields:
      name: display_name
";
    let chain = load_chain(yaml, &TransformerRegistry::new()).unwrap();

    // WHEN: wrapping a user record
    let out = chain
        .wrap(json!({
            "id": 7,
            "user": {"email": "ada@example.com", "name": "Ada", "age": 36}
        }))
        .unwrap();

    // THEN: every stage applied in order
    assert_eq!(
        chain.names(),
        vec!["require", "project", "redact", "rename"]
    );
    assert_eq!(
        out,
        json!({"id": 7, "email": "[EMAIL]", "display_name": "Ada"})
    );
}

#[test]
fn failing_stage_stops_chain_and_surfaces_its_error() {
    // GIVEN: [recorder A, require(id), recorder B]
    let calls = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    let registry = TransformerRegistry::new();
    for name in ["A", "B"] {
        let calls = Arc::clone(&calls);
        registry
            .register(
                name,
                json_fn(name, move |v: Value| {
                    calls.lock().push(name);
                    Ok(v)
                }),
            )
            .unwrap();
    }
    let yaml = r"
transformers:
  - type: registered
    name: A
  - type: require
    paths: [id]
  - type: registered
    name: B
";
    let chain = load_chain(yaml, &registry).unwrap();

    // WHEN: wrapping a document without `id`
    let err = chain.wrap(json!({"other": 1})).unwrap_err();

    // THEN: require's own error, A ran, B never did
    assert!(matches!(err, Error::Transform { .. }));
    assert_eq!(err.transformer(), Some("require"));
    assert_eq!(*calls.lock(), vec!["A"]);
}

#[test]
fn unknown_registered_transformer_rejects_config() {
    let yaml = r"
transformers:
  - type: registered
    name: not-there
";
    let err = load_chain(yaml, &TransformerRegistry::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn malformed_spec_is_config_error() {
    let yaml = r"
transformers:
  - type: project
";
    let file = write_config(yaml);
    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn chain_from_config_is_shareable_across_threads() {
    let yaml = r"
transformers:
  - type: namespace
    prefix: t
  - type: flatten
";
    let chain = load_chain(yaml, &TransformerRegistry::new()).unwrap();

    let outputs: Vec<Value> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let chain = &chain;
                s.spawn(move || chain.wrap(json!({"n": {"i": i}})).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: Vec<Value> = (0..4).map(|i| json!({"t_n.i": i})).collect();
    assert_eq!(outputs, expected);
}

#[test]
fn configured_chain_extends_without_touching_original() {
    let registry = TransformerRegistry::new();
    let base = load_chain("transformers:\n  - type: flatten\n", &registry).unwrap();
    let extended = base.append(json_fn("count", |v: Value| {
        let n = v.as_object().map_or(0, serde_json::Map::len);
        Ok(json!(n))
    }));

    let doc = json!({"a": {"b": 1, "c": 2}});
    assert_eq!(base.wrap(doc.clone()).unwrap(), json!({"a.b": 1, "a.c": 2}));
    assert_eq!(extended.wrap(doc).unwrap(), json!(2));
}
