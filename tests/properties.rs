//! Property-based tests for parsing and rendering

use conffile::{ConfFile, KeyValueStore};
use proptest::collection::btree_map;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    // Printable, no line breaks, no surrounding whitespace
    "([!-~]([ -~]{0,30}[!-~])?)?"
}

proptest! {
    #[test]
    fn render_then_parse_preserves_entries(entries in btree_map(key_strategy(), value_strategy(), 0..20)) {
        let mut conf = ConfFile::new("mem.conf");
        for (key, value) in &entries {
            conf.set(key, value);
        }

        let reparsed = ConfFile::from_text("mem.conf", &conf.render());
        prop_assert_eq!(reparsed.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(reparsed.get(key).unwrap(), value.as_str());
        }
    }

    #[test]
    fn render_is_idempotent(text in "([ -~]{0,40}\n){0,20}") {
        let once = ConfFile::from_text("mem.conf", &text).render();
        let twice = ConfFile::from_text("mem.conf", &once).render();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rendered_lines_are_sorted(entries in btree_map(key_strategy(), value_strategy(), 0..20)) {
        let mut conf = ConfFile::new("mem.conf");
        for (key, value) in entries.iter().rev() {
            conf.set(key, value);
        }

        let rendered = conf.render();
        let keys: Vec<&str> = rendered
            .lines()
            .map(|line| line.split_once('=').map_or(line, |(k, _)| k))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_by_key(|k| k.to_lowercase());
        prop_assert_eq!(keys, sorted);
        let all_upper = rendered.lines().all(|line| {
            let key = line.split_once('=').map_or(line, |(k, _)| k);
            key == key.to_uppercase()
        });
        prop_assert!(all_upper);
    }

    #[test]
    fn lookups_ignore_case_and_padding(key in key_strategy(), value in value_strategy()) {
        let conf = ConfFile::from_text("mem.conf", &format!("{}={}\n", key.to_uppercase(), value));
        let padded = format!("  {}\t", key.to_uppercase());
        prop_assert_eq!(conf.get(&padded).unwrap(), value.as_str());
        prop_assert!(conf.contains_key(&key));
    }

    #[test]
    fn only_first_separator_splits(key in key_strategy(), left in "[a-z0-9]{1,8}", right in "[a-z0-9]{0,8}") {
        let value = format!("{}={}", left, right);
        let conf = ConfFile::from_text("mem.conf", &format!("{}={}\n", key, value));
        prop_assert_eq!(conf.get(&key).unwrap(), value.as_str());
    }

    #[test]
    fn comments_never_produce_entries(body in "[ -~]{0,40}", indent in " {0,4}") {
        let conf = ConfFile::from_text("mem.conf", &format!("{}#{}\n", indent, body));
        prop_assert!(conf.is_empty());
        prop_assert_eq!(conf.entries().count(), 0);
    }
}
