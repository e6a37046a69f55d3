// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check that coercion is total, that the store returns what was written,
//! and that overrides always win over tree values.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use treecfg::adapters::EnvVarAdapter;
use treecfg::domain::coerce::{self, split_trim, split_trim_ints};
use treecfg::domain::{ConfigTree, ConfigValue, DottedKey};
use treecfg::service::{Config, EnvBridge, Store};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn dotted_key() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("."))
}

fn isolated_config(values: HashMap<String, String>) -> Config {
    Config::with_overrides(Arc::new(EnvVarAdapter::with_values(values)))
}

// Test that DottedKey keeps the raw text of any string
proptest! {
    #[test]
    fn test_dotted_key_from_any_string(s in "\\PC*") {
        let key = DottedKey::from(s.clone());
        prop_assert_eq!(key.as_str(), s.as_str());
    }
}

// Test that the environment name never contains a separator or lowercase ASCII
proptest! {
    #[test]
    fn test_env_name_shape(key in dotted_key()) {
        let name = DottedKey::from(key.as_str()).env_name();
        prop_assert!(!name.contains('.'));
        prop_assert!(!name.chars().any(|c| c.is_ascii_lowercase()));
        prop_assert_eq!(name.len(), key.len());
    }
}

// Test that coercion never panics on arbitrary strings
proptest! {
    #[test]
    fn test_coercion_is_total_on_strings(s in "\\PC*") {
        let value = ConfigValue::from(s.as_str());
        let _ = coerce::to_bool(&value);
        let _ = coerce::to_i8(&value);
        let _ = coerce::to_u64(&value);
        let _ = coerce::to_f64(&value);
        let _ = coerce::to_duration(&value);
        prop_assert_eq!(coerce::to_string(&value), s);
        prop_assert_eq!(coerce::to_string_seq(&value), None);
        prop_assert!(coerce::to_map(&value).is_empty());
    }
}

// Test that integers round-trip through their string form
proptest! {
    #[test]
    fn test_i64_parsing_valid(n in prop::num::i64::ANY) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(coerce::to_i64(&value), n);
    }
}

proptest! {
    #[test]
    fn test_u16_parsing_valid(n in prop::num::u16::ANY) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(coerce::to_u16(&value), n);
    }
}

// Test that native values pass through coercion unchanged
proptest! {
    #[test]
    fn test_identity_coercion(b in prop::bool::ANY, i in prop::num::i32::ANY, f in -1.0e9f64..1.0e9f64) {
        prop_assert_eq!(coerce::to_bool(&ConfigValue::Bool(b)), b);
        prop_assert_eq!(coerce::to_i32(&ConfigValue::I32(i)), i);
        prop_assert_eq!(coerce::to_f64(&ConfigValue::Float(f)), f);
    }
}

// Test that durations survive the string form
proptest! {
    #[test]
    fn test_duration_string_roundtrip(secs in 0u64..2_000_000, millis in 0u64..1000) {
        let duration = Duration::from_secs(secs) + Duration::from_millis(millis);
        let text = coerce::to_string(&ConfigValue::Duration(duration));
        prop_assert_eq!(coerce::to_duration(&ConfigValue::from(text)), duration);
    }
}

// Test that split_trim never yields empty or padded pieces
proptest! {
    #[test]
    fn test_split_trim_pieces_are_clean(s in "[a-z ,]{0,40}") {
        for piece in split_trim(&s) {
            prop_assert!(!piece.is_empty());
            prop_assert_eq!(piece.trim(), piece.as_str());
            prop_assert!(!piece.contains(','));
        }
    }
}

// Test that split_trim_ints recovers a list of integers however it is padded
proptest! {
    #[test]
    fn test_split_trim_ints_roundtrip(items in prop::collection::vec(prop::num::i64::ANY, 0..10)) {
        let text = items
            .iter()
            .map(|n| format!("  {} ", n))
            .collect::<Vec<_>>()
            .join(",,");
        prop_assert_eq!(split_trim_ints(&text), items);
    }
}

// Test that a value written by set is read back by get
proptest! {
    #[test]
    fn test_store_set_then_get(key in dotted_key(), n in prop::num::i64::ANY) {
        let store = Store::new();
        store.set(key.as_str(), n);
        prop_assert_eq!(store.get(key.as_str()), Some(ConfigValue::I64(n)));
    }
}

// Test that the last write wins and reset clears everything
proptest! {
    #[test]
    fn test_store_reset_clears(keys in prop::collection::vec(dotted_key(), 1..8)) {
        let store = Store::new();
        for (i, key) in keys.iter().enumerate() {
            store.set(key.as_str(), i as i64);
        }
        prop_assert!(store.contains(keys[keys.len() - 1].as_str()));
        store.reset();
        for key in &keys {
            prop_assert!(!store.contains(key.as_str()));
        }
    }
}

// Test that an override always beats the tree and is_set agrees with get_or
proptest! {
    #[test]
    fn test_override_precedence(key in dotted_key(), tree_value in "[a-z]{1,10}", env_value in "[a-z]{1,10}") {
        let dotted = DottedKey::from(key.as_str());
        let mut values = HashMap::new();
        values.insert(dotted.env_name(), env_value.clone());

        let config = isolated_config(values);
        config.set(&key, tree_value.as_str());

        prop_assert_eq!(config.get_string(&key), env_value);
        prop_assert!(config.is_set(&key));
    }
}

proptest! {
    #[test]
    fn test_get_or_returns_default_exactly_when_unset(key in dotted_key(), set in prop::bool::ANY, default in prop::num::i32::ANY) {
        let config = isolated_config(HashMap::new());
        if set {
            config.set(&key, 7_i32);
        }
        let value = config.get_i32_or(&key, default);
        prop_assert_eq!(config.is_set(&key), set);
        prop_assert_eq!(value, if set { 7 } else { default });
    }
}

// Test that apply_overrides keeps the shape of the tree
proptest! {
    #[test]
    fn test_apply_overrides_preserves_keys(keys in prop::collection::vec(dotted_key(), 0..8)) {
        let mut tree = ConfigTree::new();
        for key in &keys {
            DottedKey::from(key.as_str()).assign(&mut tree, ConfigValue::I64(1));
        }
        let bridge = EnvBridge::new(Arc::new(EnvVarAdapter::with_values(HashMap::new())));
        let result = bridge.apply_overrides(&tree, &DottedKey::from(""));
        prop_assert_eq!(result, tree);
    }
}
