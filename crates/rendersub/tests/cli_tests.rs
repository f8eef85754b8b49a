//! Integration tests for the rendersub CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use rendersub_testkit::{FixtureProject, temp_dir_in_workspace, with_isolated_env};
use std::path::Path;
use std::process::Command;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn rendersub() -> Command {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
}

/// Command with the fixture's config and scene
fn scene_command(project: &FixtureProject, subcommand: &str) -> Command {
    let mut cmd = rendersub();
    cmd.current_dir(&project.root)
        .arg(subcommand)
        .arg("--config")
        .arg(project.config_path())
        .arg("--scene")
        .arg(project.scene_path());
    cmd
}

#[test]
fn test_cli_help_flag() {
    rendersub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("expand"))
        .stdout(predicate::str::contains("submit"));
}

#[test]
fn test_cli_version_flag() {
    rendersub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rendersub"));
}

#[test]
fn test_expand_optional_group() {
    rendersub()
        .args(["expand", "filename[_<RenderPass>].jpg", "--tokens", "RenderPass=Diffuse"])
        .assert()
        .success()
        .stdout("filename_Diffuse.jpg\n");

    rendersub()
        .args(["expand", "filename[_<RenderPass>].jpg"])
        .assert()
        .success()
        .stdout("filename.jpg\n");
}

#[test]
fn test_expand_absent_and_leave_unmatched() {
    rendersub()
        .args(["expand", "<Scene>/<Version>/img", "--absent", "Version"])
        .assert()
        .success()
        .stdout("/<Version>/img\n");

    rendersub()
        .args(["expand", "<Scene>[_<Camera>]", "--leave-unmatched"])
        .assert()
        .success()
        .stdout("<Scene><Camera>\n");
}

#[test]
fn test_expand_quoted_token_values() {
    rendersub()
        .args(["expand", "<Layer>/<Camera>", "--tokens", "Layer='my layer' Camera=rig:cam"])
        .assert()
        .success()
        .stdout("my layer/rig_cam\n");
}

#[test]
fn test_expand_rejects_malformed_tokens() {
    rendersub()
        .args(["expand", "<Layer>", "--tokens", "Layer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("TOKEN_MAP_INVALID"));
}

#[test]
fn test_files_json() {
    let project = FixtureProject::new();
    let root = path_str(&project.root);

    let output = rendersub()
        .arg("files")
        .arg("--scene")
        .arg(project.scene_path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let files: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        files,
        vec![
            format!("{}/cache/cloth.mc", root),
            format!("{}/cache/cloth.xml", root),
            format!("{}/data/gi.vrmap", root),
            format!("{}/sourceimages/wood.png", root),
        ]
    );
}

#[test]
fn test_files_missing_scene() {
    rendersub()
        .args(["files", "--scene", "/nonexistent/shot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCENE_PARSE_ERROR"));
}

#[test]
fn test_info_mental_ray_json() {
    let project = FixtureProject::new();

    let output = rendersub()
        .arg("info")
        .arg("--scene")
        .arg(project.scene_path())
        .args(["--renderer", "mentalray", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["extension"], "exr");
    assert_eq!(info["padding"], 4);
    assert_eq!(
        info["render_layers"],
        serde_json::json!(["defaultRenderLayer", "beauty", "fg"])
    );
    assert_eq!(info["file_prefix"][0], "renders/<RenderLayer>/shot");
    assert_eq!(
        info["file_prefix"][1]["beauty"],
        "renders/<RenderLayer>/<RenderPass>/shot"
    );
    assert_eq!(
        info["plugins"],
        serde_json::json!(["Mayatomr", "vrayformaya", "cache"])
    );
}

#[test]
fn test_info_human_output() {
    let project = FixtureProject::new();

    rendersub()
        .arg("info")
        .arg("--scene")
        .arg(project.scene_path())
        .args(["--renderer", "software"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maya Software"))
        .stdout(predicate::str::contains("iff"));
}

#[test]
fn test_info_unknown_renderer() {
    let project = FixtureProject::new();

    rendersub()
        .arg("info")
        .arg("--scene")
        .arg(project.scene_path())
        .args(["--renderer", "arnold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UNKNOWN_RENDERER"));
}

#[test]
fn test_form_json_initial_values() {
    let project = FixtureProject::new();

    let output = scene_command(&project, "form").arg("--json").output().unwrap();
    assert!(output.status.success());

    let fields: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let field = |name: &str| {
        fields
            .iter()
            .find(|f| f["name"] == name)
            .cloned()
            .unwrap_or_else(|| panic!("field {} missing", name))
    };

    assert_eq!(field("frange")["value"], "1001-1024");
    assert_eq!(field("chunk_size")["value"], "8");
    assert_eq!(field("camera")["value"], "shotCam");
    assert_eq!(field("x_res")["value"], "2048");
    assert_eq!(field("project")["value"], path_str(&project.root));
    assert_eq!(field("output_dir")["value"], path_str(&project.images_dir()));
    assert_eq!(
        field("layers")["options"],
        serde_json::json!(["defaultRenderLayer", "beauty", "fg"])
    );
    assert_eq!(field("vray_nightly")["enabled"], true);
    assert_eq!(field("password")["value"], "***");
}

#[test]
fn test_missing_config_reported() {
    with_isolated_env(None, |_home| {
        let project = FixtureProject::new();
        let empty = temp_dir_in_workspace();

        rendersub()
            .current_dir(empty.path())
            .arg("form")
            .arg("--scene")
            .arg(project.scene_path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("CONFIG_NOT_FOUND"));
    });
}

#[test]
fn test_config_from_environment() {
    let project = FixtureProject::new();

    with_isolated_env(Some(&project.config_path()), |_home| {
        rendersub()
            .arg("form")
            .arg("--scene")
            .arg(project.scene_path())
            .assert()
            .success()
            .stdout(predicate::str::contains("frange"));
    });
}

#[test]
fn test_invalid_config_reported() {
    let project = FixtureProject::new();
    project.write("rendersub.toml", "[api]\nsite = \"https://x\"\n");

    scene_command(&project, "form")
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.key"));
}

#[test]
fn test_paths_plan_and_create() {
    let project = FixtureProject::new();
    let images = project.images_dir();

    scene_command(&project, "paths")
        .args(["--set", "renderer=mentalray", "--set", "layers=beauty,fg"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            path_str(&images.join("renders/beauty/MasterBeauty")),
        ))
        .stdout(predicate::str::contains(
            path_str(&images.join("renders/beauty/specular")),
        ));
    assert!(!images.exists(), "planning must not create directories");

    scene_command(&project, "paths")
        .args(["--set", "renderer=mentalray", "--set", "layers=beauty,fg", "--create"])
        .assert()
        .success();

    assert!(images.join("renders/beauty/diffuse").is_dir());
    assert!(images.join("renders/beauty/specular").is_dir());
    assert!(images.join("renders/fg").is_dir());
    assert!(!images.join("renders/fg/diffuse").exists());
}

#[test]
fn test_paths_rejects_unknown_field() {
    let project = FixtureProject::new();

    scene_command(&project, "paths")
        .args(["--set", "colour=red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UNKNOWN_FIELD"));
}

#[test]
fn test_submit_requires_credentials() {
    let project = FixtureProject::new();

    scene_command(&project, "submit")
        .args(["--set", "layers=beauty"])
        .env_remove("RENDERSUB_USERNAME")
        .env_remove("RENDERSUB_PASSWORD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MISSING_CREDENTIALS"));

    assert!(!project.spool_dir().exists());
}

#[test]
fn test_submit_requires_layers() {
    let project = FixtureProject::new();

    scene_command(&project, "submit")
        .args(["--username", "ana", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NO_LAYERS_SELECTED"));
}

#[test]
fn test_submit_spools_job() {
    let project = FixtureProject::new();

    scene_command(&project, "submit")
        .args(["--set", "layers=beauty", "--set", "vray_nightly=1"])
        .args(["--username", "ana", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job submitted"));

    let spooled: Vec<_> = std::fs::read_dir(project.spool_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(spooled.len(), 1);

    let job: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&spooled[0]).unwrap()).unwrap();
    assert_eq!(job["plugin"], "maya");
    assert_eq!(job["layers"], "beauty");
    assert_eq!(job["username"], "ana");
    assert_eq!(job["path_mappings"][0]["to"], "/projects");
    assert_eq!(job["params"]["renderer"], "vray");
    assert_eq!(job["params"]["vray_nightly"], 1);
    assert_eq!(job["params"]["start_new_slots"], 1);
    assert_eq!(job["params"]["scene_info"]["extension"], "exr");
    assert!(job["params"]["scene_info"].get("layer_passes").is_none());

    // V-Ray passes get their own directories under the layer prefix
    assert!(project.images_dir().join("vray/beauty/lighting").is_dir());
}

#[test]
fn test_submit_upload_only() {
    let project = FixtureProject::new();

    scene_command(&project, "submit")
        .args(["--set", "upload_only=1"])
        .args(["--username", "ana", "--password", "pw"])
        .assert()
        .success();

    let spooled = std::fs::read_dir(project.spool_dir()).unwrap().next().unwrap().unwrap();
    let job: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(spooled.path()).unwrap()).unwrap();
    assert_eq!(job["params"]["upload_only"], 1);
    assert!(job.get("layers").is_none());
    assert!(job["params"].get("scene_info").is_none());
    assert!(!project.images_dir().exists());
}

#[test]
fn test_submit_unique_scene_copy() {
    let project = FixtureProject::new();

    scene_command(&project, "submit")
        .args(["--set", "upload_only=yes", "--unique-scene"])
        .args(["--username", "ana", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cloud_submit"));

    let copies: Vec<_> = std::fs::read_dir(project.root.join("scenes/cloud_submit"))
        .unwrap()
        .collect();
    assert_eq!(copies.len(), 1);
}
