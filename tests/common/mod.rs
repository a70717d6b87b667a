use locator_forge::hierarchy::{NodeId, Snapshot};
use locator_forge::normalize::{normalize, RawDump};
use locator_forge::trace::TraceLogger;

// ============================================================================
// Shared fixtures: raw dumps and snapshot builders
// ============================================================================

/// Android login screen: identified form container, two labelled fields,
/// a text-only submit button, and a register link outside the form.
pub fn android_login_dump() -> String {
    r##"{
      "hierarchy": {
        "class": "android.widget.FrameLayout",
        "resource-id": "",
        "text": "",
        "content-desc": "",
        "bounds": "[0,0][1080,2280]",
        "enabled": "true",
        "displayed": "true",
        "children": [
          {
            "class": "android.widget.LinearLayout",
            "resource-id": "com.example:id/login_form",
            "text": "",
            "content-desc": "",
            "bounds": "[0,200][1080,1400]",
            "enabled": "true",
            "displayed": "true",
            "children": [
              {
                "class": "android.widget.EditText",
                "resource-id": "com.example:id/username",
                "text": "",
                "content-desc": "Username field",
                "bounds": "[40,240][1040,340]",
                "enabled": "true",
                "displayed": "true",
                "children": []
              },
              {
                "class": "android.widget.EditText",
                "resource-id": "com.example:id/password",
                "text": "",
                "content-desc": "Password field",
                "bounds": "[40,380][1040,480]",
                "enabled": "true",
                "displayed": "true",
                "children": []
              },
              {
                "class": "android.widget.Button",
                "resource-id": "",
                "text": "Sign In",
                "content-desc": "",
                "bounds": "[40,540][1040,640]",
                "enabled": "true",
                "displayed": "true",
                "children": []
              }
            ]
          },
          {
            "class": "android.widget.TextView",
            "resource-id": "",
            "text": "Need an account? Register",
            "content-desc": "",
            "bounds": "[40,1500][1040,1560]",
            "enabled": "true",
            "displayed": "true",
            "children": []
          }
        ]
      }
    }"##
    .to_string()
}

/// Minimal screen for the uniqueText ranking scenario: one button with
/// text only, no ids anywhere.
pub fn android_submit_only_dump() -> String {
    r##"{
      "class": "android.widget.FrameLayout",
      "resource-id": "",
      "text": "",
      "content-desc": "",
      "children": [
        {
          "class": "android.widget.Button",
          "resource-id": "",
          "text": "Submit",
          "content-desc": "",
          "children": []
        }
      ]
    }"##
    .to_string()
}

/// Two identical buttons: every text-based candidate is ambiguous.
pub fn android_ambiguous_dump() -> String {
    r##"{
      "class": "android.widget.FrameLayout",
      "children": [
        {
          "class": "android.widget.Button",
          "text": "Delete",
          "children": []
        },
        {
          "class": "android.widget.Button",
          "text": "Delete",
          "children": []
        }
      ]
    }"##
    .to_string()
}

/// iOS login screen in accessibility-tree form.
pub fn ios_login_dump() -> String {
    r##"{
      "type": "XCUIElementTypeApplication",
      "name": "",
      "label": "",
      "rect": {"x": 0, "y": 0, "width": 390, "height": 844},
      "isEnabled": true,
      "isVisible": true,
      "children": [
        {
          "type": "XCUIElementTypeTextField",
          "name": "usernameField",
          "label": "Username",
          "rect": {"x": 20, "y": 120, "width": 350, "height": 44},
          "isEnabled": true,
          "isVisible": true,
          "children": []
        },
        {
          "type": "XCUIElementTypeButton",
          "name": "loginButton",
          "label": "Sign In",
          "rect": {"x": 20, "y": 200, "width": 350, "height": 44},
          "isEnabled": true,
          "isVisible": true,
          "children": []
        }
      ]
    }"##
    .to_string()
}

pub fn android_snapshot(dump: &str) -> Snapshot {
    normalize(&RawDump::Android(dump.to_string())).expect("fixture dump should normalize")
}

pub fn ios_snapshot(dump: &str) -> Snapshot {
    normalize(&RawDump::Ios(dump.to_string())).expect("fixture dump should normalize")
}

pub fn tracer() -> TraceLogger {
    TraceLogger::disabled()
}

/// First node whose text or label equals `needle`.
pub fn node_by_text(snapshot: &Snapshot, needle: &str) -> NodeId {
    snapshot
        .iter()
        .find(|n| n.text_or_label() == Some(needle))
        .map(|n| n.id)
        .expect("fixture should contain the node")
}
