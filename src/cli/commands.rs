use std::path::Path;

use crate::error::EngineError;
use crate::generate_page_object;
use crate::heal::{heal, HealSuggestion, StaleLocator};
use crate::hierarchy::Platform;
use crate::locator::match_count;
use crate::normalize::{normalize, RawDump};
use crate::pageobject::table::LocatorTable;
use crate::session::appium::{start_server, AppiumClient};
use crate::session::{devices, scaffold};
use crate::trace::TraceLogger;

// ============================================================================
// extract subcommand
// ============================================================================

pub fn cmd_extract(
    page_name: &str,
    input: Option<&str>,
    session: Option<&str>,
    platform: &str,
    out_dir: &str,
    endpoint: &str,
    verbose: u8,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = load_dump(input, session, platform, endpoint, verbose)?;
    let generated = generate_page_object(&raw, page_name, tracer)?;

    std::fs::create_dir_all(out_dir)?;
    let java_path = Path::new(out_dir).join(format!("{}.java", page_name));
    let yaml_path = Path::new(out_dir).join(format!("{}.locators.yaml", page_name));

    std::fs::write(&java_path, &generated.source)?;
    std::fs::write(&yaml_path, generated.table.to_yaml()?)?;

    let low_confidence = generated
        .table
        .entries
        .iter()
        .filter(|e| e.low_confidence)
        .count();

    println!(
        "Extracted {} elements -> {}",
        generated.table.entries.len(),
        java_path.display()
    );
    println!("Locator metadata -> {}", yaml_path.display());
    if low_confidence > 0 {
        println!(
            "Warning: {} element(s) are low-confidence (no unambiguous locator)",
            low_confidence
        );
    }

    Ok(())
}

// ============================================================================
// heal subcommand
// ============================================================================

/// Heal stale entries and return whether every target got at least one
/// suggestion.
pub fn cmd_heal(
    locators_path: &str,
    element: Option<&str>,
    input: Option<&str>,
    session: Option<&str>,
    floor: f64,
    endpoint: &str,
    verbose: u8,
    tracer: &TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let table = LocatorTable::from_yaml(&std::fs::read_to_string(locators_path)?)?;

    let platform = match table.platform {
        Platform::Android => "android",
        Platform::Ios => "ios",
    };
    let raw = load_dump(input, session, platform, endpoint, verbose)?;
    let snapshot = normalize(&raw)?;

    if snapshot.fingerprint() == table.snapshot_fingerprint {
        eprintln!(
            "Note: current snapshot is identical to the one '{}' was generated from; \
             a failing locator here points outside the UI tree",
            table.page_name
        );
    }

    // Target selection: a named element, or everything that no longer
    // resolves uniquely against the fresh snapshot.
    let targets: Vec<_> = match element {
        Some(name) => {
            let entry = table.entry(name).ok_or_else(|| EngineError::ElementNotFound {
                element: name.to_string(),
                table: locators_path.to_string(),
            })?;
            vec![entry]
        }
        None => table
            .entries
            .iter()
            .filter(|e| match_count(&snapshot, e.primary.strategy, &e.primary.value) != 1)
            .collect(),
    };

    if targets.is_empty() {
        println!("All locators in '{}' still resolve; nothing to heal", table.page_name);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Healing {} stale element(s)...", targets.len());
    }

    let mut all_healed = true;
    for entry in targets {
        let stale = StaleLocator::from_entry(entry);
        let suggestions = heal(&stale, &snapshot, floor, tracer);
        print!("{}", format_heal_report(&entry.element_name, &stale, &suggestions));
        if suggestions.is_empty() {
            all_healed = false;
        }
    }

    Ok(all_healed)
}

/// Format one element's healing outcome for terminal output.
///
/// Produces output like:
/// ```text
/// === Healing: loginButton (uniqueText "Sign In") ===
///   1. uniqueText "Sign in now"  (similarity 0.64)
///   2. xpathAbsolute "/..."      (similarity 0.52, low confidence)
/// ```
pub fn format_heal_report(
    element_name: &str,
    stale: &StaleLocator,
    suggestions: &[HealSuggestion],
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Healing: {} ({} \"{}\") ===\n",
        element_name, stale.strategy, stale.value
    ));

    if suggestions.is_empty() {
        out.push_str("  no candidate cleared the similarity floor\n");
        return out;
    }

    for (index, suggestion) in suggestions.iter().enumerate() {
        let marker = if suggestion.low_confidence {
            ", low confidence"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {}. {} \"{}\"  (similarity {:.2}{})\n",
            index + 1,
            suggestion.strategy,
            suggestion.value,
            suggestion.confidence,
            marker
        ));
    }
    out
}

// ============================================================================
// scaffold subcommand
// ============================================================================

pub fn cmd_scaffold(name: &str, dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let root = scaffold::scaffold_bdd_project(name, Path::new(dir))?;
    println!("BDD framework scaffolded at: {}", root.display());
    Ok(())
}

// ============================================================================
// devices subcommand
// ============================================================================

pub fn cmd_devices(platform: &str) -> Result<(), Box<dyn std::error::Error>> {
    if platform == "android" || platform == "all" {
        match devices::list_connected_android_devices() {
            Ok(udids) => print_list("Connected Android devices", &udids),
            Err(e) => eprintln!("Android devices unavailable: {}", e),
        }
        match devices::list_android_avds() {
            Ok(avds) => print_list("Available AVDs", &avds),
            Err(e) => eprintln!("AVDs unavailable: {}", e),
        }
    }

    if platform == "ios" || platform == "all" {
        match devices::list_ios_simulators() {
            Ok(sims) => print_list("Available iOS simulators", &sims),
            Err(e) => eprintln!("iOS simulators unavailable: {}", e),
        }
    }

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!("{}:", title);
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  {}", item);
    }
}

// ============================================================================
// serve subcommand
// ============================================================================

pub fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let message = start_server(port)?;
    println!("{}", message);
    Ok(())
}

// ============================================================================
// Dump acquisition (file or live session)
// ============================================================================

fn load_dump(
    input: Option<&str>,
    session: Option<&str>,
    platform: &str,
    endpoint: &str,
    verbose: u8,
) -> Result<RawDump, Box<dyn std::error::Error>> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let client = AppiumClient::new(endpoint);
            let session_id = match session {
                Some(id) => id.to_string(),
                None => sole_session(&client)?,
            };
            if verbose > 0 {
                eprintln!("Fetching page source for session {}...", session_id);
            }
            client.fetch_page_source(&session_id)?
        }
    };

    match platform {
        "android" => Ok(RawDump::Android(text)),
        "ios" => Ok(RawDump::Ios(text)),
        other => Err(format!("Unknown platform '{}' (expected android or ios)", other).into()),
    }
}

fn sole_session(client: &AppiumClient) -> Result<String, Box<dyn std::error::Error>> {
    let mut sessions = client.active_sessions()?;
    match sessions.len() {
        1 => Ok(sessions.remove(0)),
        0 => Err(format!(
            "No active session on {}; pass --session or --input",
            client.endpoint()
        )
        .into()),
        n => Err(format!(
            "{} active sessions on {}; pass --session to pick one",
            n,
            client.endpoint()
        )
        .into()),
    }
}
