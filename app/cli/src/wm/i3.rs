//! `i3-msg`/`swaymsg` backed window manager client.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use super::{WindowManager, Workspace};
use crate::config::WindowManagerConfig;
use crate::error::{LevelsError, LevelsResult};
use crate::levels::WorkspaceNumber;
use crate::utils::command::resolve_binary;

/// Client that shells out to an i3 IPC message binary for every request.
#[derive(Debug, Clone)]
pub struct I3Msg {
    binary: PathBuf,
}

/// One entry of the reply to a `RUN_COMMAND` message.
#[derive(Debug, Deserialize)]
struct CommandReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl I3Msg {
    /// Creates a client for an already resolved binary path.
    #[must_use]
    pub const fn new(binary: PathBuf) -> Self { Self { binary } }

    /// Creates a client for the message binary named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LevelsError::Spawn`] if the binary cannot be found.
    pub fn from_config(config: &WindowManagerConfig) -> LevelsResult<Self> {
        let binary = resolve_binary(&config.msg_command)
            .map_err(|reason| LevelsError::spawn(&config.msg_command, reason))?;
        tracing::debug!(binary = %binary.display(), "resolved window manager message binary");
        Ok(Self::new(binary))
    }

    /// Returns the binary this client runs.
    #[must_use]
    pub fn binary(&self) -> &Path { &self.binary }

    fn run(&self, args: &[&str]) -> LevelsResult<(bool, String, String)> {
        let formatted = format_command(&self.binary, args);
        tracing::debug!(command = %formatted, "running window manager command");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|err| LevelsError::spawn(&formatted, err.to_string()))?;

        let stdout = String::from_utf8(output.stdout).map_err(|err| {
            LevelsError::Parse(format!("`{formatted}` returned invalid UTF-8: {err}"))
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        Ok((output.status.success(), stdout, stderr))
    }

    fn run_command(&self, command: &str) -> LevelsResult<()> {
        let (success, stdout, stderr) = self.run(&[command])?;

        // A rejected command still prints its replies, which carry the reason.
        parse_command_replies(&stdout)
            .map_err(|err| LevelsError::window_manager(format!("`{command}`: {err}")))?;

        if !success {
            return Err(LevelsError::window_manager(format!(
                "`{command}` failed: {}",
                if stderr.is_empty() { "non-zero exit status" } else { stderr.as_str() }
            )));
        }

        Ok(())
    }
}

impl WindowManager for I3Msg {
    fn workspaces(&self) -> LevelsResult<Vec<Workspace>> {
        let (success, stdout, stderr) = self.run(&["-t", "get_workspaces"])?;
        if !success {
            return Err(LevelsError::window_manager(format!(
                "workspace query failed: {stderr}"
            )));
        }
        parse_workspaces(&stdout)
    }

    fn rename_workspace(&self, from: WorkspaceNumber, to: WorkspaceNumber) -> LevelsResult<()> {
        self.run_command(&format!("rename workspace {from} to {to}"))
    }

    fn focus_workspace(&self, number: WorkspaceNumber) -> LevelsResult<()> {
        self.run_command(&format!("workspace number {number}"))
    }

    fn move_container_to(&self, number: WorkspaceNumber) -> LevelsResult<()> {
        self.run_command(&format!("move container to workspace number {number}"))
    }
}

/// Parses a `GET_WORKSPACES` reply.
///
/// Blank output is treated as an empty workspace list.
///
/// # Errors
///
/// Returns [`LevelsError::Parse`] if the output is not a JSON array of workspaces.
pub fn parse_workspaces(raw: &str) -> LevelsResult<Vec<Workspace>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|err| LevelsError::Parse(format!("invalid workspace list: {err}")))
}

/// Checks a `RUN_COMMAND` reply for failed commands.
///
/// Returns `Ok` for blank output, since older `i3-msg` builds print nothing
/// for successful commands.
///
/// # Errors
///
/// Returns the window manager's message for the first failed command, or a
/// parse error if the reply is not understood.
pub fn parse_command_replies(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    let replies: Vec<CommandReply> =
        serde_json::from_str(raw).map_err(|err| format!("unreadable reply: {err}"))?;

    match replies.into_iter().find(|reply| !reply.success) {
        Some(failed) => Err(failed.error.unwrap_or_else(|| "command failed".to_string())),
        None => Ok(()),
    }
}

fn format_command(binary: &Path, args: &[&str]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(binary.display().to_string());
    parts.extend(args.iter().map(|arg| (*arg).to_string()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const I3_WORKSPACES: &str = r#"[
        {"id":94131,"num":1,"name":"1","visible":false,"focused":false,
         "rect":{"x":0,"y":0,"width":1920,"height":1080},"output":"eDP-1","urgent":false},
        {"id":94132,"num":101,"name":"101","visible":true,"focused":true,
         "rect":{"x":0,"y":0,"width":1920,"height":1080},"output":"eDP-1","urgent":false},
        {"id":94133,"num":-1,"name":"scratch","visible":false,"focused":false,
         "rect":{"x":0,"y":0,"width":1920,"height":1080},"output":"HDMI-1","urgent":true}
    ]"#;

    #[test]
    fn parse_workspaces_reads_i3_reply() {
        let workspaces = parse_workspaces(I3_WORKSPACES).unwrap();
        assert_eq!(workspaces.len(), 3);
        assert_eq!(workspaces[1].num, 101);
        assert_eq!(workspaces[1].id, 94132);
        assert!(workspaces[1].focused);
        assert_eq!(workspaces[2].name, "scratch");
        assert_eq!(workspaces[2].num, -1);
        assert!(workspaces[2].urgent);
        assert_eq!(workspaces[2].output, "HDMI-1");
    }

    #[test]
    fn parse_workspaces_keeps_reply_order() {
        let raw = r#"[{"num":201},{"num":1},{"num":101}]"#;
        let nums: Vec<i32> = parse_workspaces(raw).unwrap().iter().map(|w| w.num).collect();
        assert_eq!(nums, vec![201, 1, 101]);
    }

    #[test]
    fn parse_empty_output_is_ok() {
        assert!(parse_workspaces("  \n").unwrap().is_empty());
    }

    #[test]
    fn parse_workspaces_rejects_garbage() {
        let err = parse_workspaces("not json").unwrap_err();
        assert!(matches!(err, LevelsError::Parse(_)));
    }

    #[test]
    fn command_replies_success() {
        assert!(parse_command_replies(r#"[{"success":true}]"#).is_ok());
        assert!(parse_command_replies("").is_ok());
    }

    #[test]
    fn command_replies_report_first_failure() {
        let raw = r#"[{"success":true},{"success":false,"error":"New workspace \"102\" already exists"}]"#;
        let err = parse_command_replies(raw).unwrap_err();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn command_replies_failure_without_message() {
        let err = parse_command_replies(r#"[{"success":false}]"#).unwrap_err();
        assert_eq!(err, "command failed");
    }

    #[test]
    fn format_command_joins_args() {
        let formatted = format_command(Path::new("/usr/bin/i3-msg"), &["-t", "get_workspaces"]);
        assert_eq!(formatted, "/usr/bin/i3-msg -t get_workspaces");
    }

    // ========================================================================
    // Process tests against scripted message binaries
    // ========================================================================

    #[cfg(unix)]
    mod process {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        use tempfile::TempDir;

        use super::*;

        /// Writes an executable `sh` script that records its arguments next
        /// to itself and then runs `body`.
        fn scripted_msg(temp_dir: &TempDir, body: &str) -> I3Msg {
            let path = temp_dir.path().join("fake-msg");
            let script = format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args\"\n{body}\n"
            );
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            I3Msg::new(path)
        }

        fn recorded_args(temp_dir: &TempDir) -> String {
            fs::read_to_string(temp_dir.path().join("args")).unwrap()
        }

        #[test]
        fn focus_uses_numbered_workspace_command() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, r#"printf '[{"success":true}]'"#);

            wm.focus_workspace(102).unwrap();
            assert_eq!(recorded_args(&temp_dir), "workspace number 102\n");
        }

        #[test]
        fn move_container_uses_numbered_workspace_command() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, r#"printf '[{"success":true}]'"#);

            wm.move_container_to(7).unwrap();
            assert_eq!(recorded_args(&temp_dir), "move container to workspace number 7\n");
        }

        #[test]
        fn rename_addresses_workspace_by_name() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, "");

            wm.rename_workspace(102, 103).unwrap();
            assert_eq!(recorded_args(&temp_dir), "rename workspace 102 to 103\n");
        }

        #[test]
        fn rejected_command_reports_reply_error() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(
                &temp_dir,
                r#"printf '[{"success":false,"error":"workspace 103 already exists"}]'
exit 2"#,
            );

            let err = wm.rename_workspace(102, 103).unwrap_err();
            assert!(matches!(err, LevelsError::WindowManager(_)));
            let message = err.to_string();
            assert!(message.contains("rename workspace 102 to 103"));
            assert!(message.contains("already exists"));
        }

        #[test]
        fn failed_exit_without_reply_reports_stderr() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, "echo 'Could not connect to i3' >&2\nexit 1");

            let err = wm.focus_workspace(3).unwrap_err();
            assert!(matches!(err, LevelsError::WindowManager(_)));
            assert!(err.to_string().contains("Could not connect to i3"));
        }

        #[test]
        fn failed_exit_without_output_reports_status() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, "exit 1");

            let err = wm.focus_workspace(3).unwrap_err();
            assert!(err.to_string().contains("non-zero exit status"));
        }

        #[test]
        fn workspace_query_reads_snapshot() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(
                &temp_dir,
                r#"printf '[{"num":1},{"num":101,"focused":true}]'"#,
            );

            let snapshot = wm.snapshot().unwrap();
            assert_eq!(recorded_args(&temp_dir), "-t\nget_workspaces\n");
            assert_eq!(snapshot.focused().map(|(i, w)| (i, w.num)), Some((1, 101)));
        }

        #[test]
        fn workspace_query_failure_is_error() {
            let temp_dir = TempDir::new().unwrap();
            let wm = scripted_msg(&temp_dir, "echo 'no running i3' >&2\nexit 1");

            let err = wm.workspaces().unwrap_err();
            assert!(matches!(err, LevelsError::WindowManager(_)));
            assert!(err.to_string().contains("no running i3"));
        }

        #[test]
        fn missing_binary_is_spawn_error() {
            let temp_dir = TempDir::new().unwrap();
            let wm = I3Msg::new(temp_dir.path().join("missing-msg"));

            let err = wm.focus_workspace(1).unwrap_err();
            assert!(matches!(err, LevelsError::Spawn { .. }));
            assert!(err.is_window_manager_failure());
        }
    }
}
