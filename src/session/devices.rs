//! Device and emulator discovery, wrapping the platform SDK tools.

use std::path::PathBuf;
use std::process::Command;

use crate::error::EngineError;

pub fn is_mac() -> bool {
    cfg!(target_os = "macos")
}

/// Resolve the Android SDK root: `ANDROID_HOME`, then `ANDROID_SDK_ROOT`,
/// then the platform-default install location.
pub fn android_sdk_root() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("ANDROID_HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(root) = std::env::var("ANDROID_SDK_ROOT") {
        return Some(PathBuf::from(root));
    }
    let home = std::env::var("HOME").ok()?;
    if is_mac() {
        Some(PathBuf::from(home).join("Library/Android/sdk"))
    } else {
        Some(PathBuf::from(home).join("Android/Sdk"))
    }
}

/// SDK tool path when the SDK root is known, else the bare name so PATH
/// resolution can still find it.
fn sdk_tool(subdir: &str, name: &str) -> String {
    match android_sdk_root() {
        Some(root) => {
            let candidate = root.join(subdir).join(name);
            if candidate.exists() {
                return candidate.to_string_lossy().into_owned();
            }
            name.to_string()
        }
        None => name.to_string(),
    }
}

fn run_tool(tool: &str, args: &[&str]) -> Result<String, EngineError> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| EngineError::SubprocessSpawn {
            tool: tool.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(EngineError::SubprocessFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// UDIDs of connected devices and running emulators, via `adb devices`.
pub fn list_connected_android_devices() -> Result<Vec<String>, EngineError> {
    let adb = sdk_tool("platform-tools", "adb");
    let stdout = run_tool(&adb, &["devices"])?;

    // First line is the "List of devices attached" header.
    Ok(stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|udid| !udid.is_empty())
        .map(str::to_string)
        .collect())
}

/// Names of the Android Virtual Devices that can be started.
pub fn list_android_avds() -> Result<Vec<String>, EngineError> {
    let emulator = sdk_tool("emulator", "emulator");
    let stdout = run_tool(&emulator, &["-list-avds"])?;

    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Available iOS simulators via `xcrun simctl`. macOS only.
pub fn list_ios_simulators() -> Result<Vec<String>, EngineError> {
    if !is_mac() {
        return Err(EngineError::SubprocessSpawn {
            tool: "xcrun".into(),
            source: std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "iOS simulator tooling requires macOS",
            ),
        });
    }

    let stdout = run_tool("xcrun", &["simctl", "list", "devices", "available"])?;

    // Device lines are indented entries under the runtime headers.
    Ok(stdout
        .lines()
        .filter(|line| line.starts_with("    ") && line.contains('('))
        .map(str::trim)
        .map(str::to_string)
        .collect())
}
