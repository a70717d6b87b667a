use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "locator-forge",
    version,
    about = "Mobile UI locator extraction and self-healing page objects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Automation server endpoint (default: http://127.0.0.1:4723)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Path to config file (default: locator-forge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract locators from the current screen into a page object
    Extract {
        /// Class name for the generated page object (e.g. "LoginPage")
        #[arg(long)]
        page_name: String,

        /// Read the hierarchy dump from a JSON file instead of a live session
        #[arg(long)]
        input: Option<String>,

        /// Session id (default: the only active session on the server)
        #[arg(long)]
        session: Option<String>,

        /// Dump platform: android or ios
        #[arg(long)]
        platform: Option<String>,

        /// Output directory for the .java and .locators.yaml artifacts
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// Propose replacement locators for stale page-object entries
    Heal {
        /// Path to a .locators.yaml sidecar produced by extract
        #[arg(long)]
        locators: String,

        /// Heal one element by name (default: every entry that no longer
        /// resolves uniquely)
        #[arg(long)]
        element: Option<String>,

        /// Read the fresh hierarchy dump from a JSON file
        #[arg(long)]
        input: Option<String>,

        /// Session id (default: the only active session on the server)
        #[arg(long)]
        session: Option<String>,

        /// Similarity floor override, in [0, 1]
        #[arg(long)]
        floor: Option<f64>,
    },

    /// Create a BDD test project skeleton
    Scaffold {
        /// Root folder name for the new project
        #[arg(long)]
        name: String,

        /// Directory to create the project under
        #[arg(short, long, default_value = ".")]
        dir: String,
    },

    /// List connected devices, emulators and simulators
    Devices {
        /// android, ios, or all
        #[arg(long, default_value = "all")]
        platform: String,
    },

    /// Start the Appium server if it is not already running
    Serve {
        #[arg(long, default_value_t = 4723)]
        port: u16,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `locator-forge.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub appium: AppiumConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub healing: HealingConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppiumConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_platform")]
    pub platform: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            platform: default_platform(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealingConfig {
    #[serde(default = "default_floor")]
    pub similarity_floor: f64,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            similarity_floor: default_floor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_trace_file")]
    pub file: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            file: default_trace_file(),
        }
    }
}

// Serde default helpers
fn default_out_dir() -> String { "generated/pages".to_string() }
fn default_platform() -> String { "android".to_string() }
fn default_floor() -> f64 { crate::heal::DEFAULT_SIMILARITY_FLOOR }
fn default_trace_file() -> String { "locator_trace.jsonl".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("locator-forge.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
