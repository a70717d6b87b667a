use locator_forge::build_locator_table;
use locator_forge::hierarchy::Platform;
use locator_forge::locator::{LocatorCandidate, LocatorEntry, LocatorStrategy};
use locator_forge::pageobject::{emit, sanitize_identifier, LocatorTable, NameAllocator};

mod common;
use common::{android_login_dump, android_snapshot, ios_login_dump, ios_snapshot, tracer};

// ============================================================================
// Helper builders
// ============================================================================

fn entry(name: &str, strategy: LocatorStrategy, value: &str) -> LocatorEntry {
    LocatorEntry {
        element_name: name.to_string(),
        primary: LocatorCandidate {
            strategy,
            value: value.to_string(),
            specificity: 1,
        },
        fallbacks: vec![],
        original_text: None,
        low_confidence: false,
    }
}

fn table(platform: Platform, entries: Vec<LocatorEntry>) -> LocatorTable {
    LocatorTable {
        page_name: "LoginPage".to_string(),
        platform,
        snapshot_fingerprint: "deadbeef".to_string(),
        entries,
    }
}

// ============================================================================
// Identifier sanitizing
// ============================================================================

#[test]
fn sanitize_identifier_produces_legal_field_names() {
    assert_eq!(sanitize_identifier("Sign In"), "Sign_In");
    assert_eq!(sanitize_identifier("  email address  "), "email_address");
    assert_eq!(sanitize_identifier("2fa-code"), "_2fa_code", "leading digit guarded");
    assert_eq!(sanitize_identifier("class"), "class_", "java keyword guarded");
    assert_eq!(sanitize_identifier("!!!"), "", "nothing usable remains");
    assert_eq!(sanitize_identifier("a---b"), "a_b", "runs collapse to one underscore");
}

#[test]
fn name_collisions_get_numeric_suffixes_in_first_seen_order() {
    let mut names = NameAllocator::new();
    assert_eq!(names.allocate("login".into()), "login");
    assert_eq!(names.allocate("login".into()), "login_2");
    assert_eq!(names.allocate("login".into()), "login_3");
    assert_eq!(names.allocate("other".into()), "other");
}

#[test]
fn element_names_follow_the_priority_order() {
    let snapshot = android_snapshot(&android_login_dump());
    let table = build_locator_table(&snapshot, "LoginPage", &tracer());

    let names: Vec<&str> = table
        .entries
        .iter()
        .map(|e| e.element_name.as_str())
        .collect();

    // login_form by resource-id suffix; the fields by content-desc; the
    // button and link by their visible text.
    assert_eq!(
        names,
        vec![
            "login_form",
            "Username_field",
            "Password_field",
            "Sign_In",
            "Need_an_account_Register"
        ]
    );
}

// ============================================================================
// Annotation rendering
// ============================================================================

#[test]
fn android_annotations_match_the_strategy() {
    let t = table(
        Platform::Android,
        vec![
            entry("login", LocatorStrategy::ResourceId, "com.example:id/login"),
            entry("search", LocatorStrategy::AccessibilityId, "Search"),
            entry("submit", LocatorStrategy::UniqueText, "Submit"),
            entry("row", LocatorStrategy::XPathAbsolute, "/android.widget.FrameLayout"),
        ],
    );
    let source = emit(&t);

    assert!(source.contains("@AndroidFindBy(id = \"com.example:id/login\")"));
    assert!(source.contains("@AndroidFindBy(accessibility = \"Search\")"));
    assert!(source.contains(
        "@AndroidFindBy(uiAutomator = \"new UiSelector().text(\\\"Submit\\\")\")"
    ));
    assert!(source.contains("@AndroidFindBy(xpath = \"/android.widget.FrameLayout\")"));
    assert!(source.contains("public MobileElement login;"));
}

#[test]
fn ios_annotations_match_the_strategy() {
    let t = table(
        Platform::Ios,
        vec![
            entry("loginButton", LocatorStrategy::AccessibilityId, "loginButton"),
            entry("signIn", LocatorStrategy::UniqueText, "Sign In"),
        ],
    );
    let source = emit(&t);

    assert!(source.contains("@iOSXCUITFindBy(accessibilityId = \"loginButton\")"));
    assert!(source.contains("@iOSXCUITFindBy(iOSNsPredicate = \"label == \\\"Sign In\\\"\")"));
}

#[test]
fn quotes_in_values_are_escaped_for_java() {
    let t = table(
        Platform::Android,
        vec![entry("quote", LocatorStrategy::AccessibilityId, "say \"hi\"")],
    );
    let source = emit(&t);
    assert!(source.contains("@AndroidFindBy(accessibility = \"say \\\"hi\\\"\")"));
}

// ============================================================================
// Metadata comments
// ============================================================================

#[test]
fn fallbacks_and_text_ride_along_as_comments_only() {
    let mut e = entry("submit", LocatorStrategy::UniqueText, "Submit");
    e.original_text = Some("Submit".to_string());
    e.fallbacks = vec![LocatorCandidate {
        strategy: LocatorStrategy::XPathAbsolute,
        value: "/android.widget.FrameLayout/android.widget.Button[1]".to_string(),
        specificity: 1,
    }];
    let source = emit(&table(Platform::Android, vec![e]));

    assert!(source.contains("// text: Submit"));
    assert!(source.contains(
        "// fallback xpathAbsolute: /android.widget.FrameLayout/android.widget.Button[1]"
    ));
    assert_eq!(
        source.matches("@AndroidFindBy").count(),
        1,
        "fallbacks never become executable lookups"
    );
}

#[test]
fn low_confidence_entries_are_marked() {
    let mut e = entry("delete", LocatorStrategy::XPathAbsolute, "/a/b");
    e.low_confidence = true;
    let source = emit(&table(Platform::Android, vec![e]));
    assert!(source.contains("// low confidence: no unambiguous locator was available"));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn emission_is_byte_identical_across_runs() {
    let snapshot = android_snapshot(&android_login_dump());
    let table = build_locator_table(&snapshot, "LoginPage", &tracer());

    assert_eq!(emit(&table), emit(&table), "same table, same bytes");

    let rebuilt = build_locator_table(&snapshot, "LoginPage", &tracer());
    assert_eq!(
        emit(&table),
        emit(&rebuilt),
        "regenerated table emits identically"
    );
}

#[test]
fn ios_pipeline_emits_deterministically() {
    let snapshot = ios_snapshot(&ios_login_dump());
    let first = emit(&build_locator_table(&snapshot, "IosLogin", &tracer()));
    let second = emit(&build_locator_table(&snapshot, "IosLogin", &tracer()));
    assert_eq!(first, second);
}
