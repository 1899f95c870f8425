use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Default `gh run view` payload: a completed, green run.
pub const DEFAULT_RUN_JSON: &str = r#"{"databaseId":4242,"status":"completed","conclusion":"success","url":"https://github.com/owner/repo/actions/runs/4242","workflowName":"Deploy","headBranch":"main","event":"workflow_dispatch","createdAt":"2025-01-01T00:00:00Z","updatedAt":"2025-01-01T00:05:00Z"}"#;

/// Default detail payload: one failed `build` job.
pub const DEFAULT_DETAIL_JSON: &str = r#"{"status":"completed","conclusion":"failure","url":"https://github.com/owner/repo/actions/runs/4242","workflowName":"Deploy","headBranch":"main","event":"workflow_dispatch","jobs":[{"databaseId":7,"name":"build","status":"completed","conclusion":"failure"}]}"#;

/// A `gh` stand-in on `PATH`.
///
/// The script records every invocation to a log file and answers from
/// `FAKE_GH_*` environment variables, so each test scripts its scenario
/// through the spawned process's environment.
pub struct FakeGh {
    pub root: TempDir,
    pub bin_dir: PathBuf,
    pub log_file: PathBuf,
}

impl FakeGh {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for fake gh");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        let log_file = root.path().join("gh.log");
        let state_dir = root.path().to_path_buf();

        let gh_script_path = bin_dir.join("gh");

        let script_content = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"

case "$1" in
    --version)
        [ -n "$FAKE_GH_VERSION_FAIL" ] && exit 1
        echo "gh version 2.40.0 (fake)"
        ;;
    auth)
        [ -n "$FAKE_GH_AUTH_FAIL" ] && exit 1
        echo "Logged in to github.com"
        ;;
    repo)
        echo '{{"nameWithOwner":"owner/repo"}}'
        ;;
    workflow)
        if [ -n "$FAKE_GH_DISPATCH_FAIL" ]; then
            echo "could not create workflow dispatch event" >&2
            exit 1
        fi
        ;;
    run)
        case "$2" in
            list)
                if [ -n "$FAKE_GH_RUN_LIST_EMPTY" ]; then
                    echo '[]'
                else
                    echo "[{{\"databaseId\":${{FAKE_GH_RUN_ID:-4242}}}}]"
                fi
                ;;
            view)
                if [ -n "$FAKE_GH_VIEW_FAIL" ]; then
                    echo "run view failed" >&2
                    exit 1
                fi
                ARGS="$*"
                case "$ARGS" in
                    *"--log --job"*)
                        printf '%s\n' "$FAKE_GH_JOB_LOG"
                        ;;
                    *--log-failed*)
                        printf '%s\n' "$FAKE_GH_FAILED_LOG"
                        ;;
                    *--log*)
                        printf '%s\n' "$FAKE_GH_FULL_LOG"
                        ;;
                    *jobs*)
                        printf '%s\n' "$FAKE_GH_DETAIL_JSON"
                        ;;
                    *)
                        COUNT_FILE="{state}/view_count"
                        N=$(cat "$COUNT_FILE" 2>/dev/null || echo 0)
                        N=$((N+1))
                        echo "$N" > "$COUNT_FILE"
                        if [ "$N" = "1" ] && [ -n "$FAKE_GH_RUN_JSON_FIRST" ]; then
                            printf '%s\n' "$FAKE_GH_RUN_JSON_FIRST"
                        else
                            printf '%s\n' "$FAKE_GH_RUN_JSON"
                        fi
                        ;;
                esac
                ;;
        esac
        ;;
esac
exit 0
"#,
            log = log_file.to_string_lossy(),
            state = state_dir.to_string_lossy(),
        );

        fs::write(&gh_script_path, script_content).expect("Failed to write gh script");

        let mut perms =
            fs::metadata(&gh_script_path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&gh_script_path, perms).expect("Failed to set permissions");

        Self { root, bin_dir, log_file }
    }

    pub fn get_log(&self) -> String {
        fs::read_to_string(&self.log_file).unwrap_or_default()
    }
}
