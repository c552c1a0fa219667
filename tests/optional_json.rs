use std::sync::{Arc, Barrier};
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::json;

use osmodel::{ConverterRegistry, ErrorKind, ExtensionData, Optional, TypeDescriptor};

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
struct Named {
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    name: Optional<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
struct Metadata {
    key: String,
    value: u32,
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
struct Queue {
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    name: Optional<String>,
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    ttl: Optional<i64>,
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    metadata: Optional<Metadata>,
    #[serde(flatten)]
    extension: ExtensionData,
}

fn round_trip<T>(value: &T) -> T
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let text = serde_json::to_string(value).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_three_states() {
    let _ = env_logger::try_init();

    let cases = [
        ("{}", Optional::unset()),
        ("{\"name\":null}", Optional::new(None)),
        ("{\"name\":\"x\"}", Optional::new(Some("x".to_string()))),
    ];
    for (text, expected) in cases {
        let parsed: Named = serde_json::from_str(text).unwrap();
        assert_eq!(parsed.name, expected);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), text);
    }
}

#[test]
fn test_present_values_round_trip() {
    let _ = env_logger::try_init();

    let queue = Queue {
        name: Optional::new("demo".into()),
        ttl: Optional::new(0),
        metadata: Optional::new(Metadata {
            key: "k".into(),
            value: 1,
        }),
        extension: ExtensionData::new(),
    };
    assert_eq!(round_trip(&queue), queue);
    assert_eq!(
        serde_json::to_value(&queue).unwrap(),
        json!({"name": "demo", "ttl": 0, "metadata": {"key": "k", "value": 1}})
    );
}

#[test]
fn test_unset_values_round_trip() {
    let _ = env_logger::try_init();

    let queue = Queue::default();
    assert_eq!(serde_json::to_string(&queue).unwrap(), "{}");
    let again = round_trip(&queue);
    assert!(again.name.is_unset());
    assert!(again.ttl.is_unset());
    assert!(again.metadata.is_unset());
    assert_ne!(again.ttl, Optional::new(0));
}

#[test]
fn test_extension_through_registry() {
    let _ = env_logger::try_init();

    let mut queue: Queue =
        serde_json::from_str(r#"{"name": "demo", "_default_message_ttl": 3600}"#).unwrap();
    let ttl: Optional<u32> = queue.extension.get("_default_message_ttl").unwrap();
    assert_eq!(ttl, Optional::new(3600));

    queue
        .extension
        .set("_max_messages_post_size", Optional::new(262144u64))
        .unwrap();
    queue
        .extension
        .set("_default_message_ttl", Optional::<u32>::unset())
        .unwrap();
    assert_eq!(
        serde_json::to_value(&queue).unwrap(),
        json!({"name": "demo", "_max_messages_post_size": 262144})
    );

    let registry = ConverterRegistry::global();
    assert!(registry.can_convert(&Optional::<u32>::descriptor()));
    assert!(!registry.is_empty());
}

#[test]
fn test_registry_dispatch_by_descriptor() {
    let _ = env_logger::try_init();

    let registry = ConverterRegistry::new();
    let descriptors = [
        Optional::<String>::descriptor(),
        Optional::<Option<String>>::descriptor(),
        Optional::<Metadata>::descriptor(),
    ];
    let payloads = [json!("x"), json!(null), json!({"key": "k", "value": 2})];
    for (desc, raw) in descriptors.iter().zip(payloads) {
        let boxed = registry.read(raw.clone(), desc).unwrap();
        let written = registry.write_dyn(&*boxed, desc).unwrap();
        assert_eq!(written, Some(raw));
    }
    assert_eq!(registry.len(), 3);

    let err = registry
        .read(json!("x"), &TypeDescriptor::plain::<Queue>())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_concurrent_extension_access() {
    const THREADS: usize = 8;

    let _ = env_logger::try_init();

    let data = Arc::new(
        ExtensionData::new()
            .with("limits", json!({"maxTotalCores": 20}))
            .unwrap(),
    );
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let data = Arc::clone(&data);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let _ = barrier.wait();
                let limits: Optional<std::collections::BTreeMap<String, u32>> =
                    data.get("limits").unwrap();
                limits.into_value().unwrap()["maxTotalCores"]
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 20);
    }

    let a = ConverterRegistry::global()
        .converter_for::<std::collections::BTreeMap<String, u32>>()
        .unwrap();
    let b = ConverterRegistry::global()
        .converter_for::<std::collections::BTreeMap<String, u32>>()
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
