use std::collections::BTreeMap;

use localizer::formats::FormatType;
use localizer::{Catalog, Localizer, LocalizerConfig, MemoryProvider, Value};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?;]{0,30}").expect("valid value regex")
}

/// Values with edge whitespace and characters each format has to escape.
fn raw_value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ A-Za-z0-9_&<>\"'\\\\é:;]{0,30}").expect("valid value regex")
}

fn item_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 _\\-]{0,10}[A-Za-z0-9]")
        .expect("valid item regex")
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 1..24)
}

fn localizer_for(values: &BTreeMap<String, String>) -> Result<Localizer, TestCaseError> {
    let json = serde_json::to_string(values).map_err(|e| TestCaseError::fail(e.to_string()))?;
    load_catalog(FormatType::Json, json.into_bytes())
}

fn load_catalog(format: FormatType, content: Vec<u8>) -> Result<Localizer, TestCaseError> {
    let provider = MemoryProvider::new().with_catalog("strings", Some("en"), format, content);
    let config = LocalizerConfig::default().with_fonts_file(None);
    Localizer::load(config, provider).map_err(|e| TestCaseError::fail(e.to_string()))
}

/// Writes `values` with the catalog writer for `format` and loads the result.
fn written_localizer(
    format: FormatType,
    values: &BTreeMap<String, String>,
) -> Result<Localizer, TestCaseError> {
    let catalog = Catalog::from_entries(
        format,
        values.iter().map(|(k, v)| (k.clone(), Value::from(v.as_str()))),
    )
    .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let mut content = Vec::new();
    format
        .write_catalog(&catalog, &mut content)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    load_catalog(format, content)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn present_keys_resolve_to_stored_values(values in dataset_strategy()) {
        let localizer = localizer_for(&values)?;
        for (key, value) in &values {
            prop_assert_eq!(&localizer.string_with_key(key), value);
        }
    }

    #[test]
    fn absent_keys_resolve_to_themselves(values in dataset_strategy(), missing in "[A-Z][A-Z0-9]{0,8}") {
        // Generated catalog keys are lowercase, so `missing` is never present.
        let localizer = localizer_for(&values)?;
        prop_assert_eq!(localizer.string_with_key(&missing), missing.clone());
        prop_assert!(!localizer.object_for_key_exists(&missing));
        prop_assert!(localizer.array_with_key(&missing).is_empty());
    }

    #[test]
    fn existence_agrees_with_array_lookup(values in dataset_strategy(), key in key_strategy()) {
        let localizer = localizer_for(&values)?;
        prop_assert_eq!(
            localizer.object_for_key_exists(&key),
            !localizer.array_with_key(&key).is_empty()
        );
        prop_assert_eq!(localizer.object_for_key_exists(&key), values.contains_key(&key));
    }

    #[test]
    fn written_catalogs_resolve_values_verbatim(
        values in prop::collection::btree_map(key_strategy(), raw_value_strategy(), 1..16)
    ) {
        for format in [FormatType::Plist, FormatType::Strings, FormatType::Json] {
            let localizer = written_localizer(format, &values)?;
            for (key, value) in &values {
                prop_assert_eq!(&localizer.string_with_key(key), value, "format {}", format);
            }
        }
    }

    #[test]
    fn indexed_lookup_matches_array_lookup(items in prop::collection::vec(item_strategy(), 1..8)) {
        let values = BTreeMap::from([("list".to_string(), items.join("; "))]);
        let localizer = localizer_for(&values)?;

        prop_assert_eq!(&localizer.array_with_key("list"), &items);
        for (index, item) in items.iter().enumerate() {
            let resolved = localizer
                .string_with_key_at_index("list", index)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&resolved, item);
        }
        prop_assert!(localizer.string_with_key_at_index("list", items.len()).is_err());
    }
}
