//! Property tests for the directive parser.

use proptest::prelude::*;

use auaust::{parse_index, FragmentKind, Segment};

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
}

fn placement() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("@before"), Just("@after"), Just("@here")]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The parser never panics, whatever the input.
    #[test]
    fn property_parse_never_panics(text in "(?s).{0,400}") {
        let _ = parse_index(&text);
    }

    /// PROPERTY: Line-shaped noise built from directive tokens never panics.
    #[test]
    fn property_parse_directive_noise_never_panics(
        lines in proptest::collection::vec(
            prop_oneof![
                Just("/* AUAUST".to_string()),
                Just(" */".to_string()),
                Just(" * useLocal".to_string()),
                Just(" * useGlobal".to_string()),
                Just("@here".to_string()),
                Just("// note".to_string()),
                "[ *@a-zA-Z/]{0,20}",
            ],
            0..=24,
        )
    ) {
        let _ = parse_index(&lines.join("\n"));
    }

    /// PROPERTY: Every referenced fragment is required, and every required
    /// fragment is referenced.
    #[test]
    fn property_required_set_matches_references(
        globals in proptest::collection::vec(name(), 0..=4),
        locals in proptest::collection::vec((name(), placement()), 0..=4),
    ) {
        let mut text = String::from("/* AUAUST\n");
        if !globals.is_empty() {
            text.push_str(&format!(" * useGlobal {}\n", globals.join(" ")));
        }
        for (local, at) in &locals {
            text.push_str(&format!(" * useLocal {} {}\n", local, at));
        }
        text.push_str(" */\nbody();\n");

        let outcome = parse_index(&text);
        let index = &outcome.index;

        for r in index.fragment_refs() {
            prop_assert!(index.required.contains(&r.id));
        }
        for id in index.required.iter() {
            prop_assert!(index.fragment_refs().any(|r| r.id == id));
        }
        prop_assert!(index
            .top_of_file
            .iter()
            .all(|s| s.fragment_ref().is_some_and(|r| r.id.kind == FragmentKind::Global)));
    }

    /// PROPERTY: Index text with no directives survives as body text.
    #[test]
    fn property_plain_lines_are_kept_verbatim(
        lines in proptest::collection::vec("[a-z(); =]{1,20}", 1..=10),
    ) {
        let text: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let expected: String = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!("{}\n", l))
            .collect();

        let outcome = parse_index(&text);
        let body: String = outcome
            .index
            .body
            .iter()
            .map(|s| match s {
                Segment::Text { content } => content.clone(),
                Segment::Fragment(_) => String::new(),
            })
            .collect();

        prop_assert_eq!(body, expected);
        prop_assert!(outcome.diagnostics.is_empty());
    }
}
