use crate::common::error::SvnError;
use crate::common::result::SvnResult;
use crate::infrastructure::process::platform::Platform;
use crate::infrastructure::process::tokenizer::tokenize;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Timeout applied when a command does not carry its own
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Text encoding used to decode captured output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputCharset {
    /// Host default: bytes that are not valid UTF-8 are replaced, never rejected
    #[default]
    PlatformDefault,
    /// Strict UTF-8: invalid bytes are a `MalformedOutput` error
    Utf8,
}

impl OutputCharset {
    /// Decode captured bytes into text
    pub fn decode(self, bytes: &[u8]) -> SvnResult<String> {
        match self {
            OutputCharset::PlatformDefault => Ok(String::from_utf8_lossy(bytes).into_owned()),
            OutputCharset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                SvnError::malformed_output_with_source("command output is not valid UTF-8", e)
            }),
        }
    }
}

/// Blocking or non-blocking supervision of the child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Block a worker thread until the process exits or times out
    Sync,
    /// Await the process on the async runtime
    #[default]
    Async,
}

/// One command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command text without credentials
    pub command: String,

    /// Per-command timeout; `None` or zero means the executor default
    pub timeout: Option<Duration>,

    /// Skip error classification of stderr
    pub ignore_error: bool,

    /// Credential arguments appended right before execution
    pub auth_suffix: Option<String>,

    /// Hand the command text to the platform shell instead of tokenizing it
    pub use_shell: bool,

    /// Encoding of captured output
    pub charset: OutputCharset,
}

impl CommandSpec {
    /// Create a spec for `command` with every option at its default
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: None,
            ignore_error: false,
            auth_suffix: None,
            use_shell: false,
            charset: OutputCharset::default(),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set whether stderr content is ignored
    pub fn with_ignore_error(mut self, ignore_error: bool) -> Self {
        self.ignore_error = ignore_error;
        self
    }

    /// Append credential arguments at execution time
    pub fn with_auth_suffix(mut self, auth_suffix: impl Into<String>) -> Self {
        self.auth_suffix = Some(auth_suffix.into());
        self
    }

    /// Set whether to use shell for execution
    pub fn with_shell(mut self, use_shell: bool) -> Self {
        self.use_shell = use_shell;
        self
    }

    /// Set output charset
    pub fn with_charset(mut self, charset: OutputCharset) -> Self {
        self.charset = charset;
        self
    }

    /// Command text safe to log: never includes the auth suffix
    pub fn display_command(&self) -> &str {
        &self.command
    }

    /// Command text that is actually executed
    pub fn full_command(&self) -> String {
        match self.auth_suffix.as_deref().map(str::trim) {
            Some(suffix) if !suffix.is_empty() => format!("{} {}", self.command, suffix),
            _ => self.command.clone(),
        }
    }

    /// Timeout to enforce for this command
    pub fn effective_timeout(&self, default: Duration) -> Duration {
        match self.timeout {
            Some(timeout) if !timeout.is_zero() => timeout,
            _ => default,
        }
    }
}

/// Output captured from one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured stdout; empty when capture was not requested
    pub stdout: Vec<u8>,

    /// Captured stderr, always collected
    pub stderr: Vec<u8>,

    /// Exit code, `None` when the process was ended by a signal
    pub exit_code: Option<i32>,

    /// Encoding used by `stdout_text` and `stderr_text`
    pub charset: OutputCharset,

    /// Wall time from spawn to exit
    pub duration: Duration,
}

impl ExecutionResult {
    /// Create a new execution result
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            charset: OutputCharset::default(),
            duration: Duration::ZERO,
        }
    }

    /// Set output charset
    pub fn with_charset(mut self, charset: OutputCharset) -> Self {
        self.charset = charset;
        self
    }

    /// Set execution time
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn stdout_text(&self) -> SvnResult<String> {
        self.charset.decode(&self.stdout)
    }

    pub fn stderr_text(&self) -> SvnResult<String> {
        self.charset.decode(&self.stderr)
    }
}

/// Seam between the SVN façades and process execution
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run one command and return whatever it captured.
    ///
    /// Stderr is not classified here; callers pass the result through
    /// the classifier or a decoder.
    async fn execute(&self, spec: &CommandSpec, capture_output: bool) -> SvnResult<ExecutionResult>;
}

/// Command executor for running external processes
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    platform: Platform,
    default_timeout: Duration,
    mode: ExecutionMode,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl CommandExecutor {
    /// Create an executor for `platform` with the default timeout in async mode
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            default_timeout: DEFAULT_TIMEOUT,
            mode: ExecutionMode::default(),
        }
    }

    /// Set the timeout used by specs without their own
    pub fn with_default_timeout(mut self, default_timeout: Duration) -> Self {
        if !default_timeout.is_zero() {
            self.default_timeout = default_timeout;
        }
        self
    }

    /// Set execution mode
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Program and argument vector for `spec`
    pub fn resolve_invocation(&self, spec: &CommandSpec) -> SvnResult<(String, Vec<String>)> {
        let full_command = spec.full_command();
        if full_command.trim().is_empty() {
            return Err(SvnError::malformed_command(
                "command is empty",
                spec.display_command(),
            ));
        }

        if spec.use_shell {
            return self.platform.shell_invocation(&full_command);
        }

        // The tokenizer error carries the raw text, which may hold credentials
        let mut tokens = tokenize(&full_command).map_err(|e| match e {
            SvnError::MalformedCommand { message, .. } => {
                SvnError::malformed_command(message, spec.display_command())
            }
            other => other,
        })?;
        if tokens.is_empty() {
            return Err(SvnError::malformed_command(
                "command is empty",
                spec.display_command(),
            ));
        }
        let program = tokens.remove(0);
        Ok((program, tokens))
    }

    /// Execute `spec`, blocking the calling thread until the process exits
    /// or the timeout elapses.
    ///
    /// The timeout covers both the wait and the draining of the pipes, so a
    /// descendant that keeps a pipe open cannot hold the call past its
    /// deadline. On timeout the whole process group is killed and the child
    /// reaped before `Timeout` is returned. Both pipes are drained on their
    /// own threads so a child filling one of them can never stall the wait.
    pub fn run(&self, spec: &CommandSpec, capture_output: bool) -> SvnResult<ExecutionResult> {
        let (program, args) = self.resolve_invocation(spec)?;
        let timeout = spec.effective_timeout(self.default_timeout);
        let shown = spec.display_command();

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(if capture_output {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let started = Instant::now();
        let deadline = deadline_after(started, timeout);
        let child = command
            .spawn()
            .map_err(|e| SvnError::process_error(shown, "failed to spawn process", e))?;
        let mut guard = ChildGuard { child };
        let pid = guard.child.id();
        debug!(command = shown, pid, mode = "sync", "spawned process");

        let (sender, receiver) = mpsc::channel();
        let mut pending = 0;
        if let Some(stream) = guard.child.stdout.take() {
            spawn_reader(OutputStream::Stdout, stream, sender.clone());
            pending += 1;
        }
        if let Some(stream) = guard.child.stderr.take() {
            spawn_reader(OutputStream::Stderr, stream, sender.clone());
            pending += 1;
        }
        drop(sender);

        let status = match guard.child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(
                    command = shown,
                    pid,
                    timeout_ms = millis(timeout),
                    "command timed out, killing"
                );
                guard.kill_and_reap();
                return Err(SvnError::timeout(shown, millis(timeout), Some(pid)));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                return Err(SvnError::interrupted(format!(
                    "wait for '{}' was interrupted",
                    shown
                )));
            }
            Err(e) => {
                return Err(SvnError::process_error(
                    shown,
                    "failed to wait for process",
                    e,
                ))
            }
        };

        let (stdout, stderr) = match drain_readers(&receiver, pending, deadline, shown)? {
            Some(output) => output,
            None => {
                warn!(
                    command = shown,
                    pid,
                    timeout_ms = millis(timeout),
                    "output still open after exit, killing process group"
                );
                kill_process_tree(pid);
                return Err(SvnError::timeout(shown, millis(timeout), Some(pid)));
            }
        };
        let duration = started.elapsed();
        debug!(
            command = shown,
            exit_code = ?status.code(),
            duration_ms = millis(duration),
            "command finished"
        );

        Ok(ExecutionResult::new(stdout, stderr, status.code())
            .with_charset(spec.charset)
            .with_duration(duration))
    }

    /// Execute `spec` on the async runtime.
    ///
    /// Same timeout contract as [`run`](Self::run). The child is spawned
    /// with `kill_on_drop` and its process group is killed when this future
    /// is dropped early.
    pub async fn run_async(
        &self,
        spec: &CommandSpec,
        capture_output: bool,
    ) -> SvnResult<ExecutionResult> {
        let (program, args) = self.resolve_invocation(spec)?;
        let timeout = spec.effective_timeout(self.default_timeout);
        let shown = spec.display_command();

        let mut command = TokioCommand::new(&program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(if capture_output {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let started = Instant::now();
        let deadline = tokio::time::Instant::from_std(deadline_after(started, timeout));
        let mut child = command
            .spawn()
            .map_err(|e| SvnError::process_error(shown, "failed to spawn process", e))?;
        let pid = child.id();
        let mut group = ProcessTreeGuard { pid };
        debug!(command = shown, pid = ?pid, mode = "async", "spawned process");

        let mut stdout_task = child.stdout.take().map(|mut stream| {
            tokio::spawn(async move {
                let mut buffer = Vec::new();
                stream.read_to_end(&mut buffer).await.map(|_| buffer)
            })
        });
        let mut stderr_task = child.stderr.take().map(|mut stream| {
            tokio::spawn(async move {
                let mut buffer = Vec::new();
                stream.read_to_end(&mut buffer).await.map(|_| buffer)
            })
        });

        let status = match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                abort_readers(&stdout_task, &stderr_task);
                if e.kind() == std::io::ErrorKind::Interrupted {
                    return Err(SvnError::interrupted(format!(
                        "wait for '{}' was interrupted",
                        shown
                    )));
                }
                return Err(SvnError::process_error(
                    shown,
                    "failed to wait for process",
                    e,
                ));
            }
            Err(_) => {
                warn!(
                    command = shown,
                    pid = ?pid,
                    timeout_ms = millis(timeout),
                    "command timed out, killing"
                );
                group.kill();
                // kill() also waits, so the child is reaped here
                if let Err(e) = child.kill().await {
                    warn!(command = shown, error = %e, "failed to kill timed out process");
                }
                abort_readers(&stdout_task, &stderr_task);
                return Err(SvnError::timeout(shown, millis(timeout), pid));
            }
        };

        let drained = tokio::time::timeout_at(deadline, async {
            let stdout = join_task(&mut stdout_task, shown).await?;
            let stderr = join_task(&mut stderr_task, shown).await?;
            Ok::<_, SvnError>((stdout, stderr))
        })
        .await;
        let (stdout, stderr) = match drained {
            Ok(output) => output?,
            Err(_) => {
                warn!(
                    command = shown,
                    pid = ?pid,
                    timeout_ms = millis(timeout),
                    "output still open after exit, killing process group"
                );
                group.kill();
                abort_readers(&stdout_task, &stderr_task);
                return Err(SvnError::timeout(shown, millis(timeout), pid));
            }
        };
        group.disarm();

        let duration = started.elapsed();
        debug!(
            command = shown,
            exit_code = ?status.code(),
            duration_ms = millis(duration),
            "command finished"
        );

        Ok(ExecutionResult::new(stdout, stderr, status.code())
            .with_charset(spec.charset)
            .with_duration(duration))
    }
}

#[async_trait]
impl CommandRunner for CommandExecutor {
    async fn execute(&self, spec: &CommandSpec, capture_output: bool) -> SvnResult<ExecutionResult> {
        match self.mode {
            ExecutionMode::Async => self.run_async(spec, capture_output).await,
            ExecutionMode::Sync => {
                let executor = self.clone();
                let spec = spec.clone();
                tokio::task::spawn_blocking(move || executor.run(&spec, capture_output)).await?
            }
        }
    }
}

/// Kills the process group and reaps the child on every exit path that did
/// not already wait for it
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn kill_and_reap(&mut self) {
        kill_process_tree(self.child.id());
        if let Err(e) = self.child.kill() {
            debug!(pid = self.child.id(), error = %e, "kill failed");
        }
        if let Err(e) = self.child.wait() {
            debug!(pid = self.child.id(), error = %e, "reap failed");
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            self.kill_and_reap();
        }
    }
}

/// Kills the process group of an async child unless disarmed
struct ProcessTreeGuard {
    pid: Option<u32>,
}

impl ProcessTreeGuard {
    fn kill(&mut self) {
        if let Some(pid) = self.pid.take() {
            kill_process_tree(pid);
        }
    }

    fn disarm(&mut self) {
        self.pid = None;
    }
}

impl Drop for ProcessTreeGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Kill `pid` and everything it started.
///
/// On POSIX the child leads its own process group, so the group is killed.
#[cfg(unix)]
fn kill_process_tree(pid: u32) {
    let Ok(group) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal to the group created for this child
    let rc = unsafe { libc::killpg(group, libc::SIGKILL) };
    if rc != 0 {
        debug!(pid, error = %std::io::Error::last_os_error(), "killpg failed");
    }
}

#[cfg(windows)]
fn kill_process_tree(pid: u32) {
    let result = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = result {
        debug!(pid, error = %e, "taskkill failed");
    }
}

#[cfg(not(any(unix, windows)))]
fn kill_process_tree(_pid: u32) {}

#[derive(Debug, Clone, Copy)]
enum OutputStream {
    Stdout,
    Stderr,
}

type ReaderMessage = (OutputStream, std::io::Result<Vec<u8>>);

fn spawn_reader(kind: OutputStream, mut stream: impl Read + Send + 'static, sender: Sender<ReaderMessage>) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = stream.read_to_end(&mut buffer).map(|_| buffer);
        // The receiver is gone once the call has timed out
        let _ = sender.send((kind, result));
    });
}

/// Collect both pipes before `deadline`; `None` when it passes first
fn drain_readers(
    receiver: &Receiver<ReaderMessage>,
    pending: usize,
    deadline: Instant,
    command: &str,
) -> SvnResult<Option<(Vec<u8>, Vec<u8>)>> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    for _ in 0..pending {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(remaining) {
            Ok((OutputStream::Stdout, Ok(bytes))) => stdout = bytes,
            Ok((OutputStream::Stderr, Ok(bytes))) => stderr = bytes,
            Ok((_, Err(e))) => {
                return Err(SvnError::process_error(
                    command,
                    "failed to read process output",
                    e,
                ))
            }
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(SvnError::interrupted("output reader thread panicked"))
            }
        }
    }
    Ok(Some((stdout, stderr)))
}

async fn join_task(
    handle: &mut Option<tokio::task::JoinHandle<std::io::Result<Vec<u8>>>>,
    command: &str,
) -> SvnResult<Vec<u8>> {
    match handle {
        None => Ok(Vec::new()),
        Some(handle) => match handle.await? {
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(SvnError::process_error(
                command,
                "failed to read process output",
                e,
            )),
        },
    }
}

fn abort_readers(
    stdout: &Option<tokio::task::JoinHandle<std::io::Result<Vec<u8>>>>,
    stderr: &Option<tokio::task::JoinHandle<std::io::Result<Vec<u8>>>>,
) {
    for handle in [stdout, stderr].into_iter().flatten() {
        handle.abort();
    }
}

// Durations too large for the clock never expire
fn deadline_after(start: Instant, timeout: Duration) -> Instant {
    start
        .checked_add(timeout)
        .unwrap_or_else(|| start + Duration::from_secs(60 * 60 * 24 * 365))
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_defaults() {
        let spec = CommandSpec::new("svn info");
        assert_eq!(spec.timeout, None);
        assert!(!spec.ignore_error);
        assert!(!spec.use_shell);
        assert_eq!(spec.charset, OutputCharset::PlatformDefault);
        assert_eq!(spec.effective_timeout(DEFAULT_TIMEOUT), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let spec = CommandSpec::new("svn info").with_timeout(Duration::ZERO);
        assert_eq!(
            spec.effective_timeout(Duration::from_secs(5)),
            Duration::from_secs(5)
        );

        let spec = spec.with_timeout(Duration::from_millis(250));
        assert_eq!(
            spec.effective_timeout(Duration::from_secs(5)),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_auth_suffix_is_executed_but_not_displayed() {
        let spec = CommandSpec::new("svn info svn://localhost/repo")
            .with_auth_suffix("--username u --password secret");
        assert_eq!(spec.display_command(), "svn info svn://localhost/repo");
        assert_eq!(
            spec.full_command(),
            "svn info svn://localhost/repo --username u --password secret"
        );
    }

    #[test]
    fn test_charset_decoding() {
        let invalid = vec![b'o', b'k', 0xff];
        assert_eq!(
            OutputCharset::PlatformDefault.decode(&invalid).unwrap(),
            "ok\u{fffd}"
        );
        assert!(matches!(
            OutputCharset::Utf8.decode(&invalid),
            Err(SvnError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_resolve_invocation_tokenizes_without_shell() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("svn mkdir -m 'first commit' --parents");
        let (program, args) = executor.resolve_invocation(&spec).unwrap();
        assert_eq!(program, "svn");
        assert_eq!(args, vec!["mkdir", "-m", "first commit", "--parents"]);
    }

    #[test]
    fn test_resolve_invocation_wraps_with_shell() {
        let spec = CommandSpec::new("svn info | head -1").with_shell(true);

        let (program, args) = CommandExecutor::new(Platform::Posix)
            .resolve_invocation(&spec)
            .unwrap();
        assert_eq!(program, "/bin/sh");
        assert_eq!(args, vec!["-c", "svn info | head -1"]);

        let (program, args) = CommandExecutor::new(Platform::Windows)
            .resolve_invocation(&spec)
            .unwrap();
        assert_eq!(program, "cmd");
        assert_eq!(args, vec!["/c", "svn info | head -1"]);

        let result = CommandExecutor::new(Platform::Unsupported("wasi".to_string()))
            .resolve_invocation(&spec);
        assert!(matches!(result, Err(SvnError::UnsupportedPlatform { .. })));
    }

    #[test]
    fn test_resolve_invocation_rejects_empty_command() {
        let executor = CommandExecutor::new(Platform::Posix);
        let result = executor.resolve_invocation(&CommandSpec::new("   "));
        assert!(matches!(result, Err(SvnError::MalformedCommand { .. })));
    }

    #[test]
    fn test_malformed_command_error_hides_credentials() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("svn mkdir -m 'open").with_auth_suffix("--password secret");
        match executor.resolve_invocation(&spec) {
            Err(SvnError::MalformedCommand { command, .. }) => {
                assert_eq!(command, "svn mkdir -m 'open");
            }
            other => panic!("expected MalformedCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_default_timeout_is_ignored() {
        let executor = CommandExecutor::default().with_default_timeout(Duration::ZERO);
        assert_eq!(executor.default_timeout(), DEFAULT_TIMEOUT);
        assert_eq!(executor.mode(), ExecutionMode::Async);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout() {
        let executor = CommandExecutor::new(Platform::Posix);
        let result = executor
            .run(&CommandSpec::new("echo 'Hello World'"), true)
            .unwrap();
        assert_eq!(result.stdout_text().unwrap(), "Hello World\n");
        assert!(result.stderr.is_empty());
        assert_eq!(result.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_always_captures_stderr() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("echo out; echo oops >&2; exit 3").with_shell(true);
        let result = executor.run(&spec, false).unwrap();
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr_text().unwrap(), "oops\n");
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_times_out() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("sleep 5").with_timeout(Duration::from_millis(200));
        let started = Instant::now();
        let result = executor.run(&spec, true);
        assert!(matches!(result, Err(SvnError::Timeout { pid: Some(_), .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_failure() {
        let executor = CommandExecutor::new(Platform::Posix);
        let result = executor.run(&CommandSpec::new("definitely-not-a-real-binary-xyz"), true);
        assert!(matches!(result, Err(SvnError::Process { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_async_captures_output() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("printf 'a\\nb'; echo warn >&2").with_shell(true);
        let result = executor.run_async(&spec, true).await.unwrap();
        assert_eq!(result.stdout_text().unwrap(), "a\nb");
        assert_eq!(result.stderr_text().unwrap(), "warn\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_async_times_out() {
        let executor = CommandExecutor::new(Platform::Posix);
        let spec = CommandSpec::new("sleep 5").with_timeout(Duration::from_millis(200));
        let result = executor.run_async(&spec, true).await;
        assert!(matches!(result, Err(SvnError::Timeout { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sync_mode_through_runner() {
        let executor = CommandExecutor::new(Platform::Posix).with_mode(ExecutionMode::Sync);
        let runner: &dyn CommandRunner = &executor;
        let result = runner
            .execute(&CommandSpec::new("echo sync"), true)
            .await
            .unwrap();
        assert_eq!(result.stdout_text().unwrap(), "sync\n");
    }
}
