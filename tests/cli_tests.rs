use clap::Parser;
use locator_forge::cli::commands::format_heal_report;
use locator_forge::cli::config::{load_config, AppConfig, Cli, Commands};
use locator_forge::heal::{HealSuggestion, StaleLocator};
use locator_forge::locator::LocatorStrategy;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_extract_minimal() {
    let cli = Cli::parse_from(["locator-forge", "extract", "--page-name", "LoginPage"]);
    match cli.command {
        Commands::Extract {
            page_name,
            input,
            session,
            platform,
            out_dir,
        } => {
            assert_eq!(page_name, "LoginPage");
            assert!(input.is_none());
            assert!(session.is_none());
            assert!(platform.is_none(), "platform resolution happens in main");
            assert!(out_dir.is_none(), "out_dir resolution happens in main");
        }
        _ => panic!("Expected Extract command"),
    }
}

#[test]
fn cli_parse_extract_all_args() {
    let cli = Cli::parse_from([
        "locator-forge",
        "-v",
        "--endpoint",
        "http://10.0.0.5:4723",
        "extract",
        "--page-name",
        "CartPage",
        "--input",
        "dump.json",
        "--platform",
        "ios",
        "--out-dir",
        "out/pages",
    ]);

    assert_eq!(cli.verbose, 1);
    assert_eq!(cli.endpoint.as_deref(), Some("http://10.0.0.5:4723"));
    match cli.command {
        Commands::Extract {
            page_name,
            input,
            platform,
            out_dir,
            ..
        } => {
            assert_eq!(page_name, "CartPage");
            assert_eq!(input.as_deref(), Some("dump.json"));
            assert_eq!(platform.as_deref(), Some("ios"));
            assert_eq!(out_dir.as_deref(), Some("out/pages"));
        }
        _ => panic!("Expected Extract command"),
    }
}

#[test]
fn cli_parse_heal_with_floor() {
    let cli = Cli::parse_from([
        "locator-forge",
        "heal",
        "--locators",
        "LoginPage.locators.yaml",
        "--element",
        "Sign_In",
        "--floor",
        "0.7",
    ]);
    match cli.command {
        Commands::Heal {
            locators,
            element,
            floor,
            ..
        } => {
            assert_eq!(locators, "LoginPage.locators.yaml");
            assert_eq!(element.as_deref(), Some("Sign_In"));
            assert_eq!(floor, Some(0.7));
        }
        _ => panic!("Expected Heal command"),
    }
}

#[test]
fn cli_parse_scaffold_and_serve_defaults() {
    let cli = Cli::parse_from(["locator-forge", "scaffold", "--name", "mobile-tests"]);
    match cli.command {
        Commands::Scaffold { name, dir } => {
            assert_eq!(name, "mobile-tests");
            assert_eq!(dir, ".");
        }
        _ => panic!("Expected Scaffold command"),
    }

    let cli = Cli::parse_from(["locator-forge", "serve"]);
    match cli.command {
        Commands::Serve { port } => assert_eq!(port, 4723),
        _ => panic!("Expected Serve command"),
    }
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let config = load_config(Some("does/not/exist.yaml"));
    assert!(config.appium.endpoint.is_none());
    assert_eq!(config.extract.out_dir, "generated/pages");
    assert_eq!(config.extract.platform, "android");
    assert_eq!(config.healing.similarity_floor, 0.5);
    assert_eq!(config.trace.file, "locator_trace.jsonl");
}

#[test]
fn partial_config_keeps_defaults_for_missing_sections() {
    let config: AppConfig = serde_yaml::from_str(
        r#"
appium:
  endpoint: http://192.168.1.20:4723
healing:
  similarity_floor: 0.65
"#,
    )
    .expect("valid config YAML");

    assert_eq!(config.appium.endpoint.as_deref(), Some("http://192.168.1.20:4723"));
    assert_eq!(config.healing.similarity_floor, 0.65);
    assert_eq!(config.extract.out_dir, "generated/pages", "untouched section defaults");
}

// ============================================================================
// Heal report formatting
// ============================================================================

#[test]
fn heal_report_lists_ranked_suggestions() {
    let stale = StaleLocator {
        strategy: LocatorStrategy::UniqueText,
        value: "Sign In".to_string(),
        original_text: Some("Sign In".to_string()),
        last_known_path: None,
    };
    let suggestions = vec![
        HealSuggestion {
            strategy: LocatorStrategy::UniqueText,
            value: "Sign in now".to_string(),
            confidence: 0.64,
            low_confidence: false,
        },
        HealSuggestion {
            strategy: LocatorStrategy::XPathAbsolute,
            value: "/a/b".to_string(),
            confidence: 0.52,
            low_confidence: true,
        },
    ];

    let report = format_heal_report("Sign_In", &stale, &suggestions);
    assert!(report.contains("=== Healing: Sign_In (uniqueText \"Sign In\") ==="));
    assert!(report.contains("1. uniqueText \"Sign in now\"  (similarity 0.64)"));
    assert!(report.contains("2. xpathAbsolute \"/a/b\"  (similarity 0.52, low confidence)"));
}

#[test]
fn heal_report_states_the_empty_outcome() {
    let stale = StaleLocator {
        strategy: LocatorStrategy::ResourceId,
        value: "com.example:id/gone".to_string(),
        original_text: Some("Gone".to_string()),
        last_known_path: None,
    };
    let report = format_heal_report("gone", &stale, &[]);
    assert!(report.contains("no candidate cleared the similarity floor"));
}
