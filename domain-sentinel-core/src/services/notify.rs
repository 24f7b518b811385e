//! External notification program invocation.
//!
//! Two delivery methods: a templated argument vector, or the message piped
//! whole to the child's standard input. Either way stdout and stderr are
//! captured separately and a non-zero exit is reported as a failure
//! outcome, never as an abort.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{SentinelError, SentinelResult};
use crate::types::{DeliveryMethod, NotificationOutcome};

/// Placeholder replaced with the rendered message in argument templates.
const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Invoke the external notification program with the given message.
///
/// `Err` is returned only when the program cannot be launched or its stdin
/// cannot be written; a process that runs and exits non-zero yields
/// `Ok` with `success == false` and the captured stderr.
pub async fn dispatch(
    program: &str,
    message: &str,
    method: DeliveryMethod,
    args_template: &str,
) -> SentinelResult<NotificationOutcome> {
    let output = match method {
        DeliveryMethod::Args => {
            let args = render_args(args_template, message);
            log::info!("Running {program} with args {args:?}");
            Command::new(program)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .map_err(|e| SentinelError::Process(format!("launch {program}: {e}")))?
        }
        DeliveryMethod::Stdin => {
            log::info!("Running {program} with message on stdin");
            let mut child = Command::new(program)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| SentinelError::Process(format!("launch {program}: {e}")))?;

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(message.as_bytes())
                    .await
                    .map_err(|e| SentinelError::Process(format!("write stdin of {program}: {e}")))?;
                // Dropping the handle closes the pipe so the child sees EOF.
                drop(stdin);
            }

            child
                .wait_with_output()
                .await
                .map_err(|e| SentinelError::Process(format!("wait for {program}: {e}")))?
        }
    };

    Ok(NotificationOutcome {
        program: program.to_string(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

/// Build the argument vector from a template.
///
/// The template is split on single spaces first, then every placeholder
/// occurrence is substituted within each token. Splitting happens before
/// substitution, so a message containing spaces lands inside a single argv
/// entry. No quoting or escaping is applied.
fn render_args(template: &str, message: &str) -> Vec<String> {
    template
        .split(' ')
        .map(|token| token.replace(MESSAGE_PLACEHOLDER, message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== render_args tests ====================

    #[test]
    fn test_render_args_substitutes_placeholder() {
        let args = render_args("-m {message}", "expiring soon");
        assert_eq!(args, vec!["-m", "expiring soon"]);
    }

    #[test]
    fn test_render_args_no_placeholder() {
        let args = render_args("-a -b -c", "ignored");
        assert_eq!(args, vec!["-a", "-b", "-c"]);
    }

    #[test]
    fn test_render_args_repeated_placeholder() {
        let args = render_args("{message} {message}", "hi");
        assert_eq!(args, vec!["hi", "hi"]);
    }

    #[test]
    fn test_render_args_placeholder_inside_token() {
        let args = render_args("--text={message}", "domain expiring");
        assert_eq!(args, vec!["--text=domain expiring"]);
    }

    #[test]
    fn test_render_args_empty_template_yields_one_empty_token() {
        // strings split on ' ' always yield at least one element; the
        // child receives a single empty argument.
        let args = render_args("", "msg");
        assert_eq!(args, vec![""]);
    }

    // ==================== dispatch tests ====================

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dispatch_stdin_pipes_message() {
        let outcome = dispatch("cat", "hello sentinel", DeliveryMethod::Stdin, "")
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.stdout, "hello sentinel");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dispatch_args_method() {
        let outcome = dispatch("echo", "ping", DeliveryMethod::Args, "-n {message}")
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout, "ping");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dispatch_nonzero_exit_is_failure_outcome() {
        // sh with no arguments reads the script from stdin.
        let outcome = dispatch("sh", "echo oops >&2; exit 3", DeliveryMethod::Stdin, "")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(outcome.stderr.trim(), "oops");
        assert!(outcome.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_missing_program_is_process_error() {
        let result = dispatch(
            "/nonexistent/sentinel-notifier",
            "msg",
            DeliveryMethod::Stdin,
            "",
        )
        .await;
        assert!(matches!(result, Err(SentinelError::Process(_))));
    }
}
