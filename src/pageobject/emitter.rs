use crate::hierarchy::Platform;
use crate::locator::{LocatorCandidate, LocatorStrategy};
use crate::pageobject::table::LocatorTable;

// ============================================================================
// Page object emission — one Java class per invocation
// ============================================================================

/// Render a locator table as a Java page-object class in the Appium
/// PageFactory convention.
///
/// Each element gets exactly one annotated field bound to its primary
/// locator. Fallbacks and the original text ride along as comments — they
/// are healing metadata, never alternate code paths. Output is a pure
/// function of the table: re-emitting an unchanged table is byte-identical.
pub fn emit(table: &LocatorTable) -> String {
    let mut out = String::new();

    out.push_str("// Generated page object. Do not edit by hand; re-run extraction instead.\n");
    out.push_str(&format!(
        "// Source snapshot: {}\n\n",
        table.snapshot_fingerprint
    ));
    out.push_str(&format!("public class {} {{\n", table.page_name));

    for entry in &table.entries {
        out.push('\n');
        if let Some(text) = &entry.original_text {
            out.push_str(&format!("    // text: {}\n", single_line(text)));
        }
        for fallback in &entry.fallbacks {
            out.push_str(&format!(
                "    // fallback {}: {}\n",
                fallback.strategy,
                single_line(&fallback.value)
            ));
        }
        if entry.low_confidence {
            out.push_str("    // low confidence: no unambiguous locator was available\n");
        }
        out.push_str(&format!(
            "    {}\n",
            annotation(table.platform, &entry.primary)
        ));
        out.push_str(&format!(
            "    public MobileElement {};\n",
            entry.element_name
        ));
    }

    out.push_str("}\n");
    out
}

fn annotation(platform: Platform, primary: &LocatorCandidate) -> String {
    let value = &primary.value;
    match platform {
        Platform::Android => match primary.strategy {
            LocatorStrategy::ResourceId => {
                format!("@AndroidFindBy(id = \"{}\")", escape_java(value))
            }
            LocatorStrategy::AccessibilityId => {
                format!("@AndroidFindBy(accessibility = \"{}\")", escape_java(value))
            }
            LocatorStrategy::UniqueText => format!(
                "@AndroidFindBy(uiAutomator = \"new UiSelector().text(\\\"{}\\\")\")",
                escape_java_nested(value)
            ),
            LocatorStrategy::XPathRelative | LocatorStrategy::XPathAbsolute => {
                format!("@AndroidFindBy(xpath = \"{}\")", escape_java(value))
            }
        },
        Platform::Ios => match primary.strategy {
            LocatorStrategy::AccessibilityId => {
                format!("@iOSXCUITFindBy(accessibilityId = \"{}\")", escape_java(value))
            }
            LocatorStrategy::UniqueText => format!(
                "@iOSXCUITFindBy(iOSNsPredicate = \"label == \\\"{}\\\"\")",
                escape_java_nested(value)
            ),
            // iOS snapshots never carry a resourceId; kept total for the
            // sake of hand-edited tables.
            LocatorStrategy::ResourceId => {
                format!("@iOSXCUITFindBy(id = \"{}\")", escape_java(value))
            }
            LocatorStrategy::XPathRelative | LocatorStrategy::XPathAbsolute => {
                format!("@iOSXCUITFindBy(xpath = \"{}\")", escape_java(value))
            }
        },
    }
}

fn escape_java(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape for a string nested inside an already-quoted Java string
/// (uiAutomator / NSPredicate literals).
fn escape_java_nested(raw: &str) -> String {
    escape_java(&raw.replace('"', "\\\""))
}

fn single_line(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ")
}
