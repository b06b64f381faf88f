use anyhow::Result;
use sdk_deserialize::{
    from_json, DeserializeEngine, DeserializeError, NestedSpec, SdkObject, TypeRegistry,
    TypeSchema, APPLICATION_JSON,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Owner {
    name: String,
}

impl SdkObject for Owner {
    fn schema() -> TypeSchema {
        TypeSchema::plain("Owner", &["name"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Meta {
    owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Label {
    id: u32,
    text: String,
}

impl SdkObject for Label {
    fn schema() -> TypeSchema {
        TypeSchema::plain("Label", &["id", "text"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Repository {
    id: u64,
    name: String,
    meta: Meta,
    labels: Vec<Label>,
}

impl SdkObject for Repository {
    fn schema() -> TypeSchema {
        TypeSchema::plain("Repository", &["id", "name", "meta", "labels"])
            .with_sub_object("meta.owner", NestedSpec::object("Owner"))
            .with_sub_object("labels", NestedSpec::array_of("Label"))
    }

    fn register_dependencies(registry: &mut TypeRegistry) -> sdk_deserialize::Result<()> {
        registry.register_type::<Owner>()?;
        registry.register_type::<Label>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct Repositories(Vec<Repository>);

impl SdkObject for Repositories {
    fn schema() -> TypeSchema {
        TypeSchema::collection("Repositories", "Repository")
    }

    fn register_dependencies(registry: &mut TypeRegistry) -> sdk_deserialize::Result<()> {
        registry.register_type::<Repository>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    id: u32,
}

impl SdkObject for Item {
    fn schema() -> TypeSchema {
        TypeSchema::plain("Item", &["id"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct Items(Vec<Item>);

impl SdkObject for Items {
    fn schema() -> TypeSchema {
        TypeSchema::collection("Items", "Item")
    }

    fn register_dependencies(registry: &mut TypeRegistry) -> sdk_deserialize::Result<()> {
        registry.register_type::<Item>()
    }
}

fn sample_repository() -> Repository {
    Repository {
        id: 42,
        name: "sdk".to_string(),
        meta: Meta {
            owner: Owner {
                name: "octo".to_string(),
            },
        },
        labels: vec![
            Label {
                id: 1,
                text: "bug".to_string(),
            },
            Label {
                id: 2,
                text: "docs".to_string(),
            },
        ],
    }
}

/// 序列化再反序列化應得到相同的物件
#[test]
fn test_round_trip_flat_object() -> Result<()> {
    let owner = Owner {
        name: "octo".to_string(),
    };
    let text = serde_json::to_string(&owner)?;

    let decoded: Owner = from_json(&text)?;
    assert_eq!(decoded, owner);
    Ok(())
}

#[test]
fn test_round_trip_nested_object() -> Result<()> {
    let repository = sample_repository();
    let text = serde_json::to_string(&repository)?;

    let decoded: Repository = from_json(&text)?;
    assert_eq!(decoded, repository);
    Ok(())
}

/// 巢狀物件的多餘欄位在該型別被過濾時丟棄
#[test]
fn test_nested_extra_fields_are_dropped() -> Result<()> {
    let body = serde_json::json!({
        "id": 42,
        "name": "sdk",
        "private": true,
        "meta": {
            "owner": {"name": "octo", "extra": 1},
            "stars": 10
        },
        "labels": [
            {"id": 1, "text": "bug", "color": "red"},
            {"id": 2, "text": "docs"}
        ]
    })
    .to_string();

    let engine = DeserializeEngine::for_type::<Repository>()?;
    let value = engine.deserialize_value("Repository", Some(APPLICATION_JSON), &body)?;
    assert_eq!(value["meta"]["owner"], serde_json::json!({"name": "octo"}));
    assert!(value.get("private").is_none());
    assert_eq!(value["labels"][0], serde_json::json!({"id": 1, "text": "bug"}));

    let repository: Repository = engine.deserialize(Some(APPLICATION_JSON), &body)?;
    assert_eq!(repository, sample_repository());
    Ok(())
}

#[test]
fn test_collection_drops_fields_per_element() -> Result<()> {
    let items: Items = from_json(r#"[{"id": 1, "x": 9}, {"id": 2}]"#)?;

    assert_eq!(items, Items(vec![Item { id: 1 }, Item { id: 2 }]));
    Ok(())
}

#[test]
fn test_collection_of_nested_objects() -> Result<()> {
    let text = serde_json::to_string(&vec![sample_repository(), sample_repository()])?;

    let repositories: Repositories = from_json(&text)?;
    assert_eq!(repositories.0.len(), 2);
    assert_eq!(repositories.0[1].meta.owner.name, "octo");
    Ok(())
}

#[test]
fn test_missing_intermediate_key() {
    let err = from_json::<Repository>(r#"{"id": 1, "name": "sdk", "labels": []}"#).unwrap_err();

    match err {
        DeserializeError::PathResolution { path, .. } => assert_eq!(path, "meta.owner"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_truncated_payload_is_malformed() {
    let text = serde_json::to_string(&sample_repository()).unwrap();
    let truncated = &text[..text.len() / 2];

    assert!(matches!(
        from_json::<Repository>(truncated),
        Err(DeserializeError::MalformedPayload { .. })
    ));
}

#[test]
fn test_missing_required_field_in_nested_object() {
    let err = from_json::<Repository>(
        r#"{"id": 1, "name": "sdk", "meta": {"owner": {"login": "octo"}}, "labels": []}"#,
    )
    .unwrap_err();

    match err {
        DeserializeError::Construction {
            type_name, field, ..
        } => {
            assert_eq!(type_name, "Repository");
            // 錯誤路徑指出是哪個巢狀物件建不起來
            assert!(field.starts_with("meta.owner"), "field was {field}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_shared_registry_across_threads() -> Result<()> {
    let engine = DeserializeEngine::for_type::<Repositories>()?;
    let text = serde_json::to_string(&vec![sample_repository()])?;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.deserialize::<Repositories>(Some(APPLICATION_JSON), &text)))
            .collect();
        for handle in handles {
            let repositories = handle.join().expect("thread panicked").expect("deserialize failed");
            assert_eq!(repositories.0, vec![sample_repository()]);
        }
    });
    Ok(())
}
