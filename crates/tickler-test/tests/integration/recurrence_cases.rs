include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/recurrence_cases_data/mod.rs"));

/// ## Summary
/// Table-driven expansion cases covering every frequency and the edge rules.
#[test_log::test]
fn recurrence_cases_expand_as_expected() {
    for case in recurrence_cases() {
        assert_case(&case);
    }
}
