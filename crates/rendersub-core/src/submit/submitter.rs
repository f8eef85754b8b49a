use chrono::Local;
use std::path::PathBuf;

use super::client::{JobRequest, SubmissionClient, SubmitReceipt};
use crate::config::PathMapping;
use crate::error::{RendersubError, Result};
use crate::job::SubmitForm;
use crate::output::{create_local_paths, save_scene_copy, OutputPlan};
use crate::scene::{SceneInfo, SceneInspector};

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub receipt: SubmitReceipt,
    /// Scene file the job was submitted with
    pub scene_path: PathBuf,
    /// Local output directories, absent for upload-only jobs
    pub output: Option<OutputPlan>,
}

/// Drives one submission from a filled-in form
pub struct Submitter<'a> {
    scene: &'a dyn SceneInspector,
    client: &'a mut dyn SubmissionClient,
    path_mappings: Vec<PathMapping>,
    unique_scene: bool,
}

impl<'a> Submitter<'a> {
    pub fn new(scene: &'a dyn SceneInspector, client: &'a mut dyn SubmissionClient) -> Self {
        Self {
            scene,
            client,
            path_mappings: Vec::new(),
            unique_scene: false,
        }
    }

    /// Path prefix replacements registered with the service before submitting
    pub fn path_mappings(mut self, mappings: Vec<PathMapping>) -> Self {
        self.path_mappings = mappings;
        self
    }

    /// Submit a uniquely named copy of the scene instead of the scene itself
    pub fn unique_scene(mut self, unique: bool) -> Self {
        self.unique_scene = unique;
        self
    }

    pub fn submit(&mut self, form: &SubmitForm) -> Result<Submission> {
        let mut params = form.render_params()?;

        let mut scene_path = self.scene.scene_path().ok_or(RendersubError::SceneNotSaved)?;

        let layers = if params.upload_only {
            Vec::new()
        } else if params.selected_layers.is_empty() {
            return Err(RendersubError::NoLayersSelected);
        } else {
            params.selected_layers.clone()
        };

        let credentials = form.credentials();
        if !credentials.is_complete() {
            return Err(RendersubError::MissingCredentials);
        }
        self.client.authenticate(&credentials)?;

        // only copy once the service has accepted the login
        if self.unique_scene {
            scene_path = save_scene_copy(&scene_path, None, Local::now().naive_local())?;
        }

        let scene_info = if params.upload_only {
            None
        } else {
            Some(SceneInfo::collect(self.scene, params.renderer)?)
        };

        self.client.add_path_mappings(&self.path_mappings)?;

        let output = match &scene_info {
            Some(info) => Some(create_local_paths(&params, info)?),
            None => None,
        };

        params.scene_info = scene_info;
        log::debug!("render params: {:?}", params);

        let request = JobRequest::new(scene_path.clone(), &layers, params);
        let receipt = self.client.submit_job(&request)?;
        log::info!("submitted {} as job {}", scene_path.display(), receipt.job_id);

        Ok(Submission {
            receipt,
            scene_path,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{FormDefaults, FrameRange};
    use crate::renderer::Renderer;
    use crate::scene::SceneSnapshot;
    use crate::submit::Credentials;
    use std::path::Path;

    /// Records calls instead of talking to a service
    #[derive(Default)]
    struct RecordingClient {
        calls: Vec<&'static str>,
        reject_login: bool,
        requests: Vec<JobRequest>,
    }

    impl SubmissionClient for RecordingClient {
        fn project_name(&self, _scene_path: &Path) -> Result<String> {
            Ok("shots".to_string())
        }

        fn output_path(&self, _scene_path: &Path) -> Result<String> {
            Ok("/unused".to_string())
        }

        fn authenticate(&mut self, _credentials: &Credentials) -> Result<()> {
            self.calls.push("authenticate");
            if self.reject_login {
                return Err(RendersubError::AuthenticationFailed("bad password".to_string()));
            }
            Ok(())
        }

        fn add_path_mappings(&mut self, _mappings: &[PathMapping]) -> Result<()> {
            self.calls.push("add_path_mappings");
            Ok(())
        }

        fn submit_job(&mut self, request: &JobRequest) -> Result<SubmitReceipt> {
            self.calls.push("submit_job");
            self.requests.push(request.clone());
            Ok(SubmitReceipt {
                job_id: "job-1".to_string(),
                location: None,
            })
        }
    }

    fn scene(saved: bool) -> SceneSnapshot {
        let mut scene = SceneSnapshot::from_json(
            r#"{
                "scene_path": "/proj/scenes/shot.ma",
                "project_dir": "/proj",
                "layers": [{"name": "defaultRenderLayer"}, {"name": "beauty"}],
                "cameras": [{"name": "cam", "renderable": true}],
                "nodes": {
                    "defaultRenderGlobals": {"type": "renderGlobals",
                        "attributes": {"imageFilePrefix": "", "extensionPadding": 4}}
                },
                "image_formats": {"software": "Maya IFF (iff)"}
            }"#,
        )
        .unwrap();
        if !saved {
            scene.scene_path = None;
        }
        scene
    }

    fn form(out_path: &str, assignments: &[&str]) -> SubmitForm {
        let mut form = SubmitForm::new(FormDefaults {
            project_name: "shots".to_string(),
            project_dir: "/proj".to_string(),
            output_dir: out_path.to_string(),
            renderer: Renderer::Software,
            num_instances: 1,
            instance_types: Vec::new(),
            default_instance_type: crate::config::InstanceType {
                name: "standard".to_string(),
                label: "zync_standard".to_string(),
                description: String::new(),
            },
            frame_range: FrameRange::new(1, 10),
            frame_step: 1,
            chunk_size: 5,
            cameras: vec!["cam".to_string()],
            layers: vec!["defaultRenderLayer".to_string(), "beauty".to_string()],
            resolution: (640, 480),
        });
        for assignment in assignments {
            form.assign(assignment).unwrap();
        }
        form
    }

    #[test]
    fn test_submit_flow_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = temp.path().join("images");
        let scene = scene(true);
        let mut client = RecordingClient::default();

        let submission = Submitter::new(&scene, &mut client)
            .submit(&form(
                out.to_str().unwrap(),
                &["layers=beauty", "username=ana", "password=pw"],
            ))
            .unwrap();

        assert_eq!(submission.receipt.job_id, "job-1");
        assert_eq!(submission.scene_path, PathBuf::from("/proj/scenes/shot.ma"));
        assert!(out.is_dir());
        assert_eq!(client.calls, vec!["authenticate", "add_path_mappings", "submit_job"]);

        let request = &client.requests[0];
        assert_eq!(request.layers.as_deref(), Some("beauty"));
        let info = request.params.scene_info.as_ref().unwrap();
        assert_eq!(info.extension, "iff");
    }

    #[test]
    fn test_unsaved_scene_rejected() {
        let scene = scene(false);
        let mut client = RecordingClient::default();
        let err = Submitter::new(&scene, &mut client)
            .submit(&form("/out", &["layers=beauty", "username=a", "password=b"]))
            .unwrap_err();
        assert!(matches!(err, RendersubError::SceneNotSaved));
        assert!(client.calls.is_empty());
    }

    #[test]
    fn test_layers_required_unless_upload_only() {
        let scene = scene(true);
        let mut client = RecordingClient::default();
        let err = Submitter::new(&scene, &mut client)
            .submit(&form("/out", &["username=a", "password=b"]))
            .unwrap_err();
        assert!(matches!(err, RendersubError::NoLayersSelected));

        let submission = Submitter::new(&scene, &mut client)
            .submit(&form("/nonexistent/out", &["upload_only=1", "username=a", "password=b"]))
            .unwrap();
        assert!(submission.output.is_none());
        let request = &client.requests[0];
        assert_eq!(request.layers, None);
        assert!(request.params.scene_info.is_none());
    }

    #[test]
    fn test_credentials_checked_before_login() {
        let scene = scene(true);
        let mut client = RecordingClient::default();
        let err = Submitter::new(&scene, &mut client)
            .submit(&form("/out", &["layers=beauty", "username=a"]))
            .unwrap_err();
        assert!(matches!(err, RendersubError::MissingCredentials));
        assert!(client.calls.is_empty());
    }

    #[test]
    fn test_failed_login_stops_submission() {
        let scene = scene(true);
        let mut client = RecordingClient {
            reject_login: true,
            ..RecordingClient::default()
        };
        let err = Submitter::new(&scene, &mut client)
            .submit(&form("/out", &["layers=beauty", "username=a", "password=b"]))
            .unwrap_err();
        assert!(matches!(err, RendersubError::AuthenticationFailed(_)));
        assert_eq!(client.calls, vec!["authenticate"]);
    }

    #[test]
    fn test_unique_copy_written_only_after_login() {
        let temp = tempfile::TempDir::new().unwrap();
        let scenes = temp.path().join("scenes");
        std::fs::create_dir_all(&scenes).unwrap();
        let scene_file = scenes.join("shot.ma");
        std::fs::write(&scene_file, "//Maya ASCII").unwrap();

        let mut scene = scene(true);
        scene.scene_path = Some(scene_file);
        let copies = scenes.join("cloud_submit");
        let out = temp.path().join("images");
        let assignments = ["layers=beauty", "username=a", "password=b"];

        let mut rejecting = RecordingClient {
            reject_login: true,
            ..RecordingClient::default()
        };
        let err = Submitter::new(&scene, &mut rejecting)
            .unique_scene(true)
            .submit(&form(out.to_str().unwrap(), &assignments))
            .unwrap_err();
        assert!(matches!(err, RendersubError::AuthenticationFailed(_)));
        assert!(!copies.exists());

        let mut no_layers = RecordingClient::default();
        Submitter::new(&scene, &mut no_layers)
            .unique_scene(true)
            .submit(&form(out.to_str().unwrap(), &["username=a", "password=b"]))
            .unwrap_err();
        assert!(!copies.exists());

        let mut client = RecordingClient::default();
        let submission = Submitter::new(&scene, &mut client)
            .unique_scene(true)
            .submit(&form(out.to_str().unwrap(), &assignments))
            .unwrap();
        assert!(submission.scene_path.starts_with(&copies));
        assert!(submission.scene_path.is_file());
        assert_eq!(client.requests[0].scene_path, submission.scene_path);
    }

    #[test]
    fn test_invalid_form_fails_first() {
        let scene = scene(false);
        let mut client = RecordingClient::default();
        let err = Submitter::new(&scene, &mut client)
            .submit(&form("/out", &["frange=9-1"]))
            .unwrap_err();
        assert!(matches!(err, RendersubError::FieldInvalid { .. }));
    }
}
