//! Make-target execution - runs `make <target>` as an external process and
//! captures combined stdout/stderr as one text blob. No timeout; a build
//! can legitimately run for a long time.

use tokio::process::Command;

use crate::messages::TaskEvent;

pub async fn run_make_target(target: String) -> TaskEvent {
    let output = Command::new("make").arg(&target).output().await;

    let combined = match output {
        Ok(out) => {
            let mut text = String::new();
            text.push_str(&String::from_utf8_lossy(&out.stdout));
            let stderr = String::from_utf8_lossy(&out.stderr);
            if !stderr.is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&stderr);
            }

            if out.status.success() {
                text
            } else {
                let code = out
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                format!("ERROR: make {target} exited with status {code}\n\n{text}")
            }
        }
        Err(e) => format!("ERROR: failed to run make {target}: {e}"),
    };

    TaskEvent::ShellCompleted {
        target,
        output: combined,
    }
}
