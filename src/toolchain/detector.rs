//! @ai:module:intent Low-level inspection of CLI tools on the host
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolDetector, ToolDetectorTrait, VERSION_TIMEOUT
//! @ai:module:stateless true
//!
//! Every probe fails soft: lookups and subprocess errors come back as `None`,
//! `false` or a descriptive permission string, never as an `Err`.

use regex::Regex;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Upper bound for a single version query. JVM tools need a few seconds to start,
/// and the whole validation run is at most one of these per versioned tool.
pub const VERSION_TIMEOUT: Duration = Duration::from_secs(3);

/// Version numbers look like `1.2` or `v1.2.3`.
const VERSION_PATTERN: &str = r"v?(\d+\.\d+(\.\d+)?)";

/// @ai:intent Trait for tool inspection primitives
pub trait ToolDetectorTrait: Send + Sync {
    /// @ai:intent Resolve a tool on the search path
    fn check_availability(&self, tool_name: &str) -> Option<PathBuf>;

    /// @ai:intent Run the tool's version command and extract a version string
    fn get_version(&self, tool_path: &Path, version_command: &str) -> Option<String>;

    /// @ai:intent Check `current >= minimum` with integer-tuple ordering
    fn compare_versions(&self, current: &str, minimum: &str) -> bool {
        compare_versions(current, minimum)
    }

    /// @ai:intent Inspect the execute bit and render the mode string
    fn check_permissions(&self, tool_path: &Path) -> (bool, String);
}

/// @ai:intent Inspects tools via PATH lookup, subprocess and file metadata
pub struct ToolDetector {
    version_timeout: Duration,
    version_regex: Regex,
}

impl ToolDetector {
    /// @ai:intent Create a detector with the default version timeout
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_timeout(VERSION_TIMEOUT)
    }

    /// @ai:intent Create a detector with a custom version timeout
    /// @ai:effects pure
    pub fn with_timeout(version_timeout: Duration) -> Self {
        Self {
            version_timeout,
            version_regex: Regex::new(VERSION_PATTERN).expect("version pattern is valid"),
        }
    }

    /// @ai:intent Timeout applied to each version query
    /// @ai:effects pure
    pub fn version_timeout(&self) -> Duration {
        self.version_timeout
    }

    /// @ai:intent Extract the first version number from tool output
    /// @ai:effects pure
    /// @ai:example ("git version 2.43.0") -> Some("2.43.0")
    pub fn parse_version_output(&self, output: &str) -> Option<String> {
        self.version_regex
            .captures(output)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// @ai:intent Spawn the tool and collect stdout+stderr, bounded by the timeout
    /// @ai:post returns within the timeout even when a grandchild keeps the pipes open
    /// @ai:effects io
    fn run_version_command(&self, tool_path: &Path, version_command: &str) -> Option<String> {
        let deadline = Instant::now() + self.version_timeout;

        let mut child = Command::new(tool_path)
            .args(version_command.split_whitespace())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                tracing::debug!("Failed to spawn {}: {}", tool_path.display(), e);
            })
            .ok()?;

        // Pumps drain both pipes while we wait, so chatty tools never block on write.
        let stdout_buf = Arc::new(Mutex::new(Vec::new()));
        let stderr_buf = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = mpsc::channel();
        let mut pumps = 0;

        if let Some(stdout) = child.stdout.take() {
            spawn_output_pump(stdout, Arc::clone(&stdout_buf), done_tx.clone());
            pumps += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_output_pump(stderr, Arc::clone(&stderr_buf), done_tx.clone());
            pumps += 1;
        }
        drop(done_tx);

        match child.wait_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(Some(_status)) => {}
            Ok(None) => {
                tracing::debug!(
                    "Version query for {} timed out after {:?}",
                    tool_path.display(),
                    self.version_timeout
                );
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(e) => {
                tracing::debug!("Waiting on {} failed: {}", tool_path.display(), e);
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        }

        for _ in 0..pumps {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if done_rx.recv_timeout(remaining).is_err() {
                tracing::debug!(
                    "Output of {} still open after exit, using what was read",
                    tool_path.display()
                );
                break;
            }
        }

        let mut combined = String::from_utf8_lossy(&drain(&stdout_buf)).into_owned();
        combined.push_str(&String::from_utf8_lossy(&drain(&stderr_buf)));
        Some(combined)
    }
}

/// @ai:intent Copy a pipe into a shared buffer on a background thread
/// @ai:post signals `done` once the pipe reaches EOF or fails
/// @ai:effects io
fn spawn_output_pump<R>(mut reader: R, sink: Arc<Mutex<Vec<u8>>>, done: mpsc::Sender<()>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(&chunk[..n]);
                    }
                }
            }
        }
        let _ = done.send(());
    });
}

fn drain(buf: &Mutex<Vec<u8>>) -> Vec<u8> {
    buf.lock()
        .map(|mut bytes| std::mem::take(&mut *bytes))
        .unwrap_or_default()
}

impl Default for ToolDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDetectorTrait for ToolDetector {
    /// @ai:intent Resolve a tool on the search path
    /// @ai:post None on any lookup failure
    /// @ai:effects fs:read
    fn check_availability(&self, tool_name: &str) -> Option<PathBuf> {
        match which::which(tool_name) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("{} not found on PATH: {}", tool_name, e);
                None
            }
        }
    }

    /// @ai:intent Run the tool's version command and extract a version string
    /// @ai:post None on timeout, spawn failure or no version match
    /// @ai:effects io
    fn get_version(&self, tool_path: &Path, version_command: &str) -> Option<String> {
        let output = self.run_version_command(tool_path, version_command)?;
        let version = self.parse_version_output(&output);

        if version.is_none() {
            tracing::debug!(
                "No version number in output of {} {}",
                tool_path.display(),
                version_command
            );
        }

        version
    }

    /// @ai:intent Inspect the execute bit and render the mode string
    /// @ai:effects fs:read
    fn check_permissions(&self, tool_path: &Path) -> (bool, String) {
        check_permissions(tool_path)
    }
}

/// @ai:intent Compare dot-separated versions as integer tuples
/// @ai:post false when either side has a non-integer component
/// @ai:effects pure
/// @ai:example ("1.2", "1.1.9") -> true
/// @ai:example ("1.2", "1.2.0") -> false
pub fn compare_versions(current: &str, minimum: &str) -> bool {
    match (parse_version_tuple(current), parse_version_tuple(minimum)) {
        // Vec ordering is lexicographic with a strict prefix sorting first.
        (Some(current), Some(minimum)) => current >= minimum,
        _ => false,
    }
}

fn parse_version_tuple(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// @ai:intent Inspect the execute bit and render the mode string
/// @ai:effects fs:read
pub fn check_permissions(tool_path: &Path) -> (bool, String) {
    match tool_path.try_exists() {
        Ok(false) => return (false, "file not found".to_string()),
        Ok(true) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return (false, "permission denied".to_string())
        }
        Err(_) => return (false, "unknown error".to_string()),
    }

    match std::fs::metadata(tool_path) {
        Ok(metadata) => mode_of(&metadata),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            (false, "permission denied".to_string())
        }
        Err(e) => {
            tracing::debug!("Could not stat {}: {}", tool_path.display(), e);
            (false, "unknown error".to_string())
        }
    }
}

#[cfg(unix)]
fn mode_of(metadata: &std::fs::Metadata) -> (bool, String) {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    (mode & 0o111 != 0, format_mode(mode))
}

#[cfg(not(unix))]
fn mode_of(metadata: &std::fs::Metadata) -> (bool, String) {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let write = if metadata.permissions().readonly() { '-' } else { 'w' };
    let executable = metadata.is_file();
    let exec = if executable { 'x' } else { '-' };
    let triple: String = ['r', write, exec].iter().collect();
    (executable, format!("{kind}{triple}{triple}{triple}"))
}

/// @ai:intent Render a unix mode as a 10-character permission string
/// @ai:effects pure
/// @ai:example (0o100755) -> "-rwxr-xr-x"
#[cfg(unix)]
pub fn format_mode(mode: u32) -> String {
    const S_IFMT: u32 = 0o170000;

    let kind = match mode & S_IFMT {
        0o040000 => 'd',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);

    // (read, write, exec, special bit, special char when exec set, when exec clear)
    let triples = [
        (0o400, 0o200, 0o100, 0o4000, 's', 'S'),
        (0o040, 0o020, 0o010, 0o2000, 's', 'S'),
        (0o004, 0o002, 0o001, 0o1000, 't', 'T'),
    ];

    for (r, w, x, special, with_exec, without_exec) in triples {
        out.push(if mode & r != 0 { 'r' } else { '-' });
        out.push(if mode & w != 0 { 'w' } else { '-' });
        out.push(match (mode & special != 0, mode & x != 0) {
            (true, true) => with_exec,
            (true, false) => without_exec,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}
