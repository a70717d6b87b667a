use locator_forge::error::EngineError;
use locator_forge::hierarchy::{node::*, Platform};
use locator_forge::normalize::{normalize, RawDump};

mod common;
use common::{android_login_dump, android_snapshot, ios_login_dump, ios_snapshot};

// ============================================================================
// Android dialect mapping
// ============================================================================

#[test]
fn android_maps_dialect_to_shared_vocabulary() {
    let snapshot = android_snapshot(&android_login_dump());
    assert_eq!(snapshot.platform, Platform::Android);

    let username = snapshot
        .iter()
        .find(|n| n.non_empty_attr(ATTR_RESOURCE_ID) == Some("com.example:id/username"))
        .expect("username field present");

    assert_eq!(username.tag, "EditText", "tag derived from class suffix");
    assert_eq!(
        username.attr(ATTR_CLASS_NAME),
        Some("android.widget.EditText"),
        "full class preserved under className"
    );
    assert_eq!(
        username.non_empty_attr(ATTR_ACCESSIBILITY_ID),
        Some("Username field"),
        "content-desc doubles as accessibility id"
    );
    assert_eq!(
        username.non_empty_attr(ATTR_LABEL),
        Some("Username field"),
        "content-desc mapped to label"
    );
    assert_eq!(username.attr(ATTR_BOUNDS), Some("[40,240][1040,340]"));
    assert_eq!(username.attr(ATTR_ENABLED), Some("true"));
    assert_eq!(username.attr(ATTR_VISIBLE), Some("true"));
}

#[test]
fn android_accepts_bare_root_without_wrapper() {
    let bare = r##"{"class": "android.widget.FrameLayout", "children": []}"##;
    let snapshot = android_snapshot(bare);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.node(snapshot.root()).tag, "FrameLayout");
}

#[test]
fn android_preserves_unknown_attributes_verbatim() {
    let dump = r##"{
      "class": "android.widget.Button",
      "text": "Go",
      "package": "com.example.app",
      "checkable": false,
      "index": 3,
      "children": []
    }"##;
    let snapshot = android_snapshot(dump);
    let root = snapshot.node(snapshot.root());

    assert_eq!(root.attr("package"), Some("com.example.app"), "string kept as-is");
    assert_eq!(root.attr("checkable"), Some("false"), "bool rendered to string");
    assert_eq!(root.attr("index"), Some("3"), "number rendered to string");
}

// ============================================================================
// iOS dialect mapping
// ============================================================================

#[test]
fn ios_maps_dialect_to_shared_vocabulary() {
    let snapshot = ios_snapshot(&ios_login_dump());
    assert_eq!(snapshot.platform, Platform::Ios);

    let login = snapshot
        .iter()
        .find(|n| n.non_empty_attr(ATTR_ACCESSIBILITY_ID) == Some("loginButton"))
        .expect("login button present");

    assert_eq!(login.tag, "Button", "XCUIElementType prefix stripped");
    assert_eq!(login.attr(ATTR_CLASS_NAME), Some("XCUIElementTypeButton"));
    assert_eq!(login.non_empty_attr(ATTR_LABEL), Some("Sign In"));
    assert_eq!(
        login.attr(ATTR_BOUNDS),
        Some("[20,200][370,244]"),
        "rect rendered in the shared bounds form"
    );
    assert_eq!(login.attr(ATTR_ENABLED), Some("true"));
}

// ============================================================================
// Tree structure
// ============================================================================

#[test]
fn snapshot_has_single_root_and_preorder_ids() {
    let snapshot = android_snapshot(&android_login_dump());

    let roots: Vec<_> = snapshot.iter().filter(|n| n.parent.is_none()).collect();
    assert_eq!(roots.len(), 1, "exactly one root per snapshot");
    assert_eq!(roots[0].id, snapshot.root());

    for node in snapshot.iter() {
        for &child in &node.children {
            assert_eq!(
                snapshot.node(child).parent,
                Some(node.id),
                "parent back-reference matches child ownership"
            );
            assert!(child.0 > node.id.0, "children get later pre-order ids");
        }
    }
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn malformed_dumps_fail_with_malformed_hierarchy() {
    let cases = [
        ("", "empty input"),
        ("{\"class\": \"android.widget.Butt", "truncated JSON"),
        ("[{\"class\": \"a\"}, {\"class\": \"b\"}]", "array of roots"),
        ("42", "scalar root"),
    ];

    for (raw, what) in cases {
        let result = normalize(&RawDump::Android(raw.to_string()));
        assert!(
            matches!(result, Err(EngineError::MalformedHierarchy { .. })),
            "{} should be MalformedHierarchy",
            what
        );
    }
}

// ============================================================================
// Fingerprint
// ============================================================================

#[test]
fn fingerprint_is_stable_for_an_unchanged_dump() {
    let a = android_snapshot(&android_login_dump());
    let b = android_snapshot(&android_login_dump());
    assert_eq!(a.fingerprint(), b.fingerprint(), "same dump, same digest");
}

#[test]
fn fingerprint_changes_when_text_changes() {
    let original = android_snapshot(&android_login_dump());
    let renamed = android_snapshot(&android_login_dump().replace("Sign In", "Sign in now"));
    assert_ne!(original.fingerprint(), renamed.fingerprint());
}
