//! Tests for qualifier translation

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

const USER_FIELDS: FieldMap = FieldMap(&[
    ("id", "id"),
    ("login", "profile.login"),
    ("email", "profile.email"),
    ("status", "status"),
    ("last_updated", "lastUpdated"),
]);

fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .unwrap()
        .and_utc()
}

// ============================================================================
// Operator Tests
// ============================================================================

#[test_case("=", Some(CompareOp::Eq); "equals")]
#[test_case(">", Some(CompareOp::Gt); "greater")]
#[test_case(">=", Some(CompareOp::Ge); "greater equal")]
#[test_case("<", Some(CompareOp::Lt); "less")]
#[test_case("<=", Some(CompareOp::Le); "less equal")]
#[test_case("<>", Some(CompareOp::Ne); "not equal")]
#[test_case("!=", None; "unsupported symbol")]
fn test_compare_op_from_symbol(symbol: &str, expected: Option<CompareOp>) {
    assert_eq!(CompareOp::from_symbol(symbol), expected);
}

#[test]
fn test_vendor_operator_spelling() {
    assert_eq!(CompareOp::Eq.vendor_op(), "eq");
    assert_eq!(CompareOp::Gt.vendor_op(), "gt");
    assert_eq!(CompareOp::Ge.vendor_op(), "ge");
    assert_eq!(CompareOp::Lt.vendor_op(), "lt");
    assert_eq!(CompareOp::Le.vendor_op(), "le");
    assert_eq!(CompareOp::Ne.vendor_op(), "ne");
}

// ============================================================================
// Filter Building Tests
// ============================================================================

#[test]
fn test_single_equality_clause() {
    let quals = QualSet::new().with_equal("status", "ACTIVE");
    assert_eq!(build_filter(&quals, &USER_FIELDS), "status eq \"ACTIVE\"");
}

#[test]
fn test_equality_uses_mapped_field_name() {
    let quals = QualSet::new().with_equal("login", "alice@example.com");
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "profile.login eq \"alice@example.com\""
    );
}

#[test]
fn test_multiple_clauses_join_with_and_in_map_order() {
    let quals = QualSet::new()
        .with_equal("status", "ACTIVE")
        .with_equal("id", "00u1");
    // Clause order follows the field map, not insertion order
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "id eq \"00u1\" and status eq \"ACTIVE\""
    );
}

#[test]
fn test_clause_count_matches_qual_count() {
    let quals = QualSet::new()
        .with_equal("id", "00u1")
        .with_equal("login", "alice")
        .with_equal("email", "alice@example.com")
        .with_equal("status", "ACTIVE");
    let filter = build_filter(&quals, &USER_FIELDS);
    assert_eq!(filter.matches(" eq ").count(), 4);
    assert_eq!(filter.matches(" and ").count(), 3);
}

#[test]
fn test_unmapped_column_is_ignored() {
    let quals = QualSet::new()
        .with_equal("status", "ACTIVE")
        .with_equal("shoe_size", "42");
    assert_eq!(build_filter(&quals, &USER_FIELDS), "status eq \"ACTIVE\"");
}

#[test]
fn test_range_clause_formats_timestamp() {
    let quals = QualSet::new().with_range("last_updated", CompareOp::Ge, ts("2024-06-01T10:30:00"));
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "lastUpdated ge \"2024-06-01T10:30:00.000Z\""
    );
}

#[test]
fn test_bounded_range_emits_two_clauses() {
    let quals = QualSet::new()
        .with_range("last_updated", CompareOp::Gt, ts("2024-01-01T00:00:00"))
        .with_range("last_updated", CompareOp::Lt, ts("2024-02-01T00:00:00"));
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "lastUpdated gt \"2024-01-01T00:00:00.000Z\" and lastUpdated lt \"2024-02-01T00:00:00.000Z\""
    );
}

#[test]
fn test_equality_and_range_combine() {
    let quals = QualSet::new()
        .with_equal("status", "ACTIVE")
        .with_range("last_updated", CompareOp::Ge, ts("2024-06-01T00:00:00"));
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "status eq \"ACTIVE\" and lastUpdated ge \"2024-06-01T00:00:00.000Z\""
    );
}

#[test]
fn test_empty_quals_mean_list_everything() {
    assert_eq!(build_filter(&QualSet::new(), &USER_FIELDS), "");
}

// ============================================================================
// Raw Override Tests
// ============================================================================

#[test]
fn test_raw_override_wins_entirely() {
    let quals = QualSet::new()
        .with_equal("status", "ACTIVE")
        .with_range("last_updated", CompareOp::Ge, ts("2024-06-01T00:00:00"))
        .with_raw_filter("profile.department eq \"Engineering\"");
    // No merging: the override is returned verbatim
    assert_eq!(
        build_filter(&quals, &USER_FIELDS),
        "profile.department eq \"Engineering\""
    );
}

#[test]
fn test_empty_raw_override_falls_back_to_derived() {
    let quals = QualSet::new()
        .with_equal("status", "ACTIVE")
        .with_raw_filter("");
    assert_eq!(build_filter(&quals, &USER_FIELDS), "status eq \"ACTIVE\"");
}

// ============================================================================
// Page Size Tests
// ============================================================================

#[test_case(200, None, 200; "no hint keeps cap")]
#[test_case(200, Some(50), 50; "smaller hint wins")]
#[test_case(200, Some(500), 200; "larger hint keeps cap")]
#[test_case(200, Some(200), 200; "equal hint keeps cap")]
fn test_effective_page_size(cap: u64, hint: Option<u64>, expected: u64) {
    assert_eq!(effective_page_size(cap, hint), expected);
}

// ============================================================================
// Field Map Tests
// ============================================================================

#[test]
fn test_field_map_lookup() {
    assert_eq!(USER_FIELDS.vendor_field("login"), Some("profile.login"));
    assert_eq!(USER_FIELDS.vendor_field("status"), Some("status"));
    assert_eq!(USER_FIELDS.vendor_field("missing"), None);
}
