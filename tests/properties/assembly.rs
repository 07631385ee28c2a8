//! Property tests for fragment processing and assembly.

use proptest::prelude::*;

use auaust::{assemble, parse_index, process_fragment};

fn fragment_text() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ a-z;/]{0,16}", 0..=8).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Assembling the same index twice yields identical bundles.
    #[test]
    fn property_assemble_is_deterministic(
        index_text in "(?s)[ a-zA-Z*/@\n]{0,200}",
        body in fragment_text(),
    ) {
        let index = parse_index(&index_text).index;
        let resolve = |r: &auaust::domain::entities::FragmentRef| {
            process_fragment(&format!("{}\n{}", r.id, body), r.left_offset)
        };
        prop_assert_eq!(assemble(&index, resolve), assemble(&index, resolve));
    }

    /// PROPERTY: Processed fragments never keep whole-line comments or
    /// blank lines, and never end in trailing spaces.
    #[test]
    fn property_processed_fragment_is_clean(raw in fragment_text(), offset in 0usize..8) {
        let processed = process_fragment(&raw, offset);

        for line in processed.lines() {
            prop_assert!(!line.trim().is_empty());
            prop_assert!(!line.trim_start().starts_with("//"));
        }
        prop_assert!(!processed.trim_end_matches('\n').ends_with(' '));
    }

    /// PROPERTY: Lines after the first start with at least `offset` spaces.
    #[test]
    fn property_processed_fragment_is_reindented(raw in fragment_text(), offset in 0usize..8) {
        let processed = process_fragment(&raw, offset);
        let indent = " ".repeat(offset);

        for line in processed.lines().skip(1) {
            prop_assert!(line.starts_with(&indent));
        }
    }
}
