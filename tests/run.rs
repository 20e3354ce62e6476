use arcticmix::cli::{RunOpts, handle_run_command};
use arcticmix::settings::Settings;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Get the path to the example scenario.
fn get_scenario_path() -> PathBuf {
    Path::new(file!())
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join("old_crow.toml")
}

/// An integration test for the `run` command.
///
/// NB: This must be the only test in this binary that initialises logging, as the
/// logger can only be set up once per process.
#[test]
fn test_handle_run_command() {
    let output_dir = tempdir().unwrap();
    let opts = RunOpts {
        output_dir: Some(output_dir.path().to_path_buf()),
    };

    handle_run_command(&get_scenario_path(), &opts, Some(Settings::default())).unwrap();

    for file_name in ["plan.toml", "recommended_mix.csv", "timeline.csv"] {
        assert!(
            output_dir.path().join(file_name).is_file(),
            "{file_name} was not written"
        );
    }

    let plan = std::fs::read_to_string(output_dir.path().join("plan.toml")).unwrap();
    assert!(plan.contains("success = true"));
}
