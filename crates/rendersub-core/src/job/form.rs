//! Submit form state
//!
//! [`Field`] is the closed set of form inputs. Each field has one entry in
//! the `FIELDS` table giving its name, its kind and the accessor that
//! produces its initial value from [`FormDefaults`]. [`SubmitForm`] holds the
//! current values and turns them into [`RenderParams`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{FrameRange, RenderParams};
use crate::config::{Config, InstanceType};
use crate::error::{RendersubError, Result};
use crate::renderer::Renderer;
use crate::scene::{top_level_layers, SceneInspector};
use crate::submit::{Credentials, SubmissionClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ProjectName,
    ParentId,
    UploadOnly,
    StartNewSlots,
    SkipCheck,
    NotifyComplete,
    Project,
    OutputDir,
    Renderer,
    NumInstances,
    InstanceType,
    FrameRange,
    FrameStep,
    ChunkSize,
    Camera,
    Layers,
    XRes,
    YRes,
    VrayNightly,
    UseVrscene,
    Username,
    Password,
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    /// One of [`SubmitForm::options`]
    Choice,
    /// Any subset of [`SubmitForm::options`]
    MultiChoice,
}

struct FieldSpec {
    field: Field,
    name: &'static str,
    kind: FieldKind,
    initial: fn(&FormDefaults) -> FieldValue,
}

/// Indexed by `Field as usize`
static FIELDS: [FieldSpec; 22] = [
    FieldSpec {
        field: Field::ProjectName,
        name: "project_name",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.project_name.clone()),
    },
    FieldSpec {
        field: Field::ParentId,
        name: "parent_id",
        kind: FieldKind::Text,
        initial: |_| FieldValue::Text(String::new()),
    },
    FieldSpec {
        field: Field::UploadOnly,
        name: "upload_only",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::StartNewSlots,
        name: "start_new_slots",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::SkipCheck,
        name: "skip_check",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::NotifyComplete,
        name: "notify_complete",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::Project,
        name: "project",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.project_dir.clone()),
    },
    FieldSpec {
        field: Field::OutputDir,
        name: "output_dir",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.output_dir.clone()),
    },
    FieldSpec {
        field: Field::Renderer,
        name: "renderer",
        kind: FieldKind::Choice,
        initial: |d| FieldValue::Text(d.renderer.label().to_string()),
    },
    FieldSpec {
        field: Field::NumInstances,
        name: "num_instances",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.num_instances.to_string()),
    },
    FieldSpec {
        field: Field::InstanceType,
        name: "instance_type",
        kind: FieldKind::Choice,
        initial: |d| FieldValue::Text(d.default_instance_type.menu_label()),
    },
    FieldSpec {
        field: Field::FrameRange,
        name: "frange",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.frame_range.to_string()),
    },
    FieldSpec {
        field: Field::FrameStep,
        name: "frame_step",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.frame_step.to_string()),
    },
    FieldSpec {
        field: Field::ChunkSize,
        name: "chunk_size",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.chunk_size.to_string()),
    },
    FieldSpec {
        field: Field::Camera,
        name: "camera",
        kind: FieldKind::Choice,
        initial: |d| FieldValue::Text(d.cameras.first().cloned().unwrap_or_default()),
    },
    FieldSpec {
        field: Field::Layers,
        name: "layers",
        kind: FieldKind::MultiChoice,
        initial: |_| FieldValue::Selection(Vec::new()),
    },
    FieldSpec {
        field: Field::XRes,
        name: "x_res",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.resolution.0.to_string()),
    },
    FieldSpec {
        field: Field::YRes,
        name: "y_res",
        kind: FieldKind::Text,
        initial: |d| FieldValue::Text(d.resolution.1.to_string()),
    },
    FieldSpec {
        field: Field::VrayNightly,
        name: "vray_nightly",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::UseVrscene,
        name: "use_vrscene",
        kind: FieldKind::Flag,
        initial: |_| FieldValue::Flag(false),
    },
    FieldSpec {
        field: Field::Username,
        name: "username",
        kind: FieldKind::Text,
        initial: |_| FieldValue::Text(String::new()),
    },
    FieldSpec {
        field: Field::Password,
        name: "password",
        kind: FieldKind::Text,
        initial: |_| FieldValue::Text(String::new()),
    },
];

impl Field {
    pub fn all() -> impl Iterator<Item = Field> {
        FIELDS.iter().map(|spec| spec.field)
    }

    fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    /// Form name, as accepted by `--set`
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn initial_value(self, defaults: &FormDefaults) -> FieldValue {
        (self.spec().initial)(defaults)
    }

    /// Disabled while `upload_only` is set
    pub fn is_render_setting(self) -> bool {
        matches!(
            self,
            Field::NumInstances
                | Field::InstanceType
                | Field::StartNewSlots
                | Field::SkipCheck
                | Field::OutputDir
                | Field::Renderer
                | Field::VrayNightly
                | Field::UseVrscene
                | Field::FrameRange
                | Field::FrameStep
                | Field::ChunkSize
                | Field::Camera
                | Field::Layers
                | Field::XRes
                | Field::YRes
        )
    }

    /// Only meaningful when rendering with V-Ray
    pub fn is_vray_only(self) -> bool {
        matches!(self, Field::VrayNightly | Field::UseVrscene)
    }

    /// Never echoed back
    pub fn is_secret(self) -> bool {
        self == Field::Password
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = RendersubError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        FIELDS
            .iter()
            .find(|spec| spec.name == wanted)
            .map(|spec| spec.field)
            .ok_or_else(|| RendersubError::UnknownField(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Selection(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(on) => f.write_str(if *on { "on" } else { "off" }),
            FieldValue::Selection(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Everything the form is initialised from
#[derive(Debug, Clone)]
pub struct FormDefaults {
    pub project_name: String,
    pub project_dir: String,
    pub output_dir: String,
    pub renderer: Renderer,
    pub num_instances: u32,
    pub instance_types: Vec<InstanceType>,
    pub default_instance_type: InstanceType,
    pub frame_range: FrameRange,
    pub frame_step: u32,
    pub chunk_size: u32,
    /// Renderable cameras
    pub cameras: Vec<String>,
    /// Top-level render layers
    pub layers: Vec<String>,
    pub resolution: (u32, u32),
}

impl FormDefaults {
    /// Read defaults from the scene, the config and the service
    ///
    /// Fails with `SCENE_NOT_SAVED` when the scene has no path yet.
    pub fn gather(
        scene: &dyn SceneInspector,
        config: &Config,
        client: &dyn SubmissionClient,
    ) -> Result<Self> {
        let scene_path = scene.scene_path().ok_or(RendersubError::SceneNotSaved)?;

        let project_name = client.project_name(&scene_path)?;
        let output_dir = client.output_path(&scene_path)?;

        let project_dir = scene.project_dir().to_string_lossy().into_owned();
        let project_dir = project_dir
            .strip_suffix('/')
            .unwrap_or(&project_dir)
            .to_string();

        Ok(Self {
            project_name,
            project_dir,
            output_dir,
            renderer: config.submit.default_renderer,
            num_instances: config.submit.num_instances,
            instance_types: config.instance_types(),
            default_instance_type: config.default_instance_type(),
            frame_range: scene.frame_range(),
            frame_step: scene.frame_step(),
            chunk_size: config.submit.chunk_size,
            cameras: scene.renderable_cameras(),
            layers: top_level_layers(scene),
            resolution: scene.resolution(),
        })
    }
}

/// Current form values
#[derive(Debug, Clone)]
pub struct SubmitForm {
    values: BTreeMap<Field, FieldValue>,
    defaults: FormDefaults,
}

impl SubmitForm {
    pub fn new(defaults: FormDefaults) -> Self {
        let values = Field::all()
            .map(|field| (field, field.initial_value(&defaults)))
            .collect();
        Self { values, defaults }
    }

    pub fn get(&self, field: Field) -> &FieldValue {
        // every field is seeded in new()
        &self.values[&field]
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn text(&self, field: Field) -> &str {
        match self.get(field) {
            FieldValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn flag(&self, field: Field) -> bool {
        matches!(self.get(field), FieldValue::Flag(true))
    }

    pub fn selection(&self, field: Field) -> &[String] {
        match self.get(field) {
            FieldValue::Selection(items) => items,
            _ => &[],
        }
    }

    /// Menu entries for choice fields, default first
    pub fn options(&self, field: Field) -> Vec<String> {
        match field {
            Field::Renderer => {
                let default = self.defaults.renderer;
                std::iter::once(default)
                    .chain(Renderer::ALL.into_iter().filter(|r| *r != default))
                    .map(|r| r.label().to_string())
                    .collect()
            }
            Field::InstanceType => {
                let default = &self.defaults.default_instance_type;
                std::iter::once(default)
                    .chain(self.defaults.instance_types.iter().filter(|t| *t != default))
                    .map(InstanceType::menu_label)
                    .collect()
            }
            Field::Camera => self.defaults.cameras.clone(),
            Field::Layers => self.defaults.layers.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether the field is editable given the other values
    pub fn is_enabled(&self, field: Field) -> bool {
        if field.is_render_setting() && self.flag(Field::UploadOnly) {
            return false;
        }
        if field.is_vray_only() && !self.renderer().is_vray() {
            return false;
        }
        true
    }

    /// Selected renderer, or the default when the choice is unrecognised
    pub fn renderer(&self) -> Renderer {
        self.text(Field::Renderer)
            .parse()
            .unwrap_or(self.defaults.renderer)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.text(Field::Username), self.text(Field::Password))
    }

    /// Set a field from its text form
    pub fn set(&mut self, field: Field, raw: &str) -> Result<()> {
        let value = match field.kind() {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Flag => FieldValue::Flag(parse_flag(field, raw)?),
            FieldKind::Choice => FieldValue::Text(self.resolve_choice(field, raw)?),
            FieldKind::MultiChoice => FieldValue::Selection(self.resolve_selection(field, raw)?),
        };

        log::debug!("form: {} = {}", field, if field.is_secret() { "***" } else { raw });
        self.values.insert(field, value);
        Ok(())
    }

    /// Apply a `field=value` assignment
    pub fn assign(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            RendersubError::FieldInvalid {
                field: assignment.to_string(),
                reason: "expected field=value".to_string(),
            }
        })?;
        self.set(name.parse()?, value)
    }

    fn resolve_choice(&self, field: Field, raw: &str) -> Result<String> {
        let raw = raw.trim();
        let options = self.options(field);

        let resolved = match field {
            Field::Renderer => Some(raw.parse::<Renderer>()?.label().to_string()),
            Field::InstanceType => self
                .defaults
                .instance_types
                .iter()
                .find(|t| t.name == raw || t.menu_label() == raw)
                .map(InstanceType::menu_label),
            // nothing to choose from: accept what was typed
            _ if options.is_empty() => Some(raw.to_string()),
            _ => options.iter().find(|o| o.as_str() == raw).cloned(),
        };

        resolved.ok_or_else(|| RendersubError::FieldInvalid {
            field: field.name().to_string(),
            reason: format!("'{}' is not one of: {}", raw, options.join(", ")),
        })
    }

    fn resolve_selection(&self, field: Field, raw: &str) -> Result<Vec<String>> {
        let options = self.options(field);
        let mut selected: Vec<String> = Vec::new();

        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !options.iter().any(|o| o == item) {
                return Err(RendersubError::FieldInvalid {
                    field: field.name().to_string(),
                    reason: format!("unknown {} '{}'", field.name(), item),
                });
            }
            if !selected.iter().any(|s| s == item) {
                selected.push(item.to_string());
            }
        }

        Ok(selected)
    }

    /// Parse every value; the first bad field is reported
    pub fn validate(&self) -> Result<()> {
        self.render_params().map(|_| ())
    }

    /// Job parameters as the service expects them
    pub fn render_params(&self) -> Result<RenderParams> {
        let upload_only = self.flag(Field::UploadOnly);
        let renderer = self.renderer();
        let vray_extras = !upload_only && renderer.is_vray();

        let parent_id = self.text(Field::ParentId).trim();
        let frange: FrameRange = self.text(Field::FrameRange).parse()?;

        Ok(RenderParams {
            proj_name: self.text(Field::ProjectName).to_string(),
            parent_id: (!parent_id.is_empty()).then(|| parent_id.to_string()),
            upload_only,
            start_new_slots: !self.flag(Field::StartNewSlots),
            skip_check: self.flag(Field::SkipCheck),
            notify_complete: self.flag(Field::NotifyComplete),
            project: self.text(Field::Project).to_string(),
            out_path: self.text(Field::OutputDir).to_string(),
            renderer,
            num_instances: self.positive(Field::NumInstances)?,
            instance_type: self.instance_label(),
            frange: frange.to_string(),
            step: self.positive(Field::FrameStep)?,
            chunk_size: self.positive(Field::ChunkSize)?,
            camera: self.text(Field::Camera).to_string(),
            xres: self.number(Field::XRes)?,
            yres: self.number(Field::YRes)?,
            vray_nightly: vray_extras && self.flag(Field::VrayNightly),
            use_vrscene: vray_extras && self.flag(Field::UseVrscene),
            scene_info: None,
            selected_layers: self.selection(Field::Layers).to_vec(),
        })
    }

    /// Service label of the chosen instance type
    fn instance_label(&self) -> String {
        let chosen = self.text(Field::InstanceType);
        self.defaults
            .instance_types
            .iter()
            .find(|t| t.menu_label() == chosen || t.name == chosen)
            .unwrap_or(&self.defaults.default_instance_type)
            .label
            .clone()
    }

    fn number(&self, field: Field) -> Result<u32> {
        let raw = self.text(field).trim();
        raw.parse().map_err(|_| RendersubError::FieldInvalid {
            field: field.name().to_string(),
            reason: format!("'{}' is not a whole number", raw),
        })
    }

    fn positive(&self, field: Field) -> Result<u32> {
        match self.number(field)? {
            0 => Err(RendersubError::FieldInvalid {
                field: field.name().to_string(),
                reason: "must be at least 1".to_string(),
            }),
            n => Ok(n),
        }
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(RendersubError::FieldInvalid {
            field: field.name().to_string(),
            reason: format!("'{}' is not a flag value", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(name: &str, label: &str, description: &str) -> InstanceType {
        InstanceType {
            name: name.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    fn defaults() -> FormDefaults {
        let types = vec![
            instance("standard", "zync_standard", "8 core"),
            instance("highmem", "zync_highmem", "8 core, 52GB"),
        ];
        FormDefaults {
            project_name: "shots".to_string(),
            project_dir: "/proj".to_string(),
            output_dir: "/proj/images".to_string(),
            renderer: Renderer::Vray,
            num_instances: 1,
            default_instance_type: types[0].clone(),
            instance_types: types,
            frame_range: FrameRange::new(1001, 1100),
            frame_step: 1,
            chunk_size: 10,
            cameras: vec!["shotCam".to_string(), "wideCam".to_string()],
            layers: vec!["defaultRenderLayer".to_string(), "beauty".to_string(), "fg".to_string()],
            resolution: (1920, 1080),
        }
    }

    #[test]
    fn test_field_table_matches_enum_order() {
        for (i, spec) in FIELDS.iter().enumerate() {
            assert_eq!(spec.field as usize, i, "{} is out of place", spec.name);
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::all() {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!(matches!(
            "colour".parse::<Field>(),
            Err(RendersubError::UnknownField(_))
        ));
    }

    #[test]
    fn test_initial_values() {
        let form = SubmitForm::new(defaults());
        assert_eq!(form.text(Field::ProjectName), "shots");
        assert_eq!(form.text(Field::FrameRange), "1001-1100");
        assert_eq!(form.text(Field::Renderer), "V-Ray");
        assert_eq!(form.text(Field::InstanceType), "standard (8 core)");
        assert_eq!(form.text(Field::Camera), "shotCam");
        assert!(form.selection(Field::Layers).is_empty());
        assert!(!form.flag(Field::UploadOnly));
    }

    #[test]
    fn test_options_put_default_first() {
        let mut d = defaults();
        d.renderer = Renderer::MentalRay;
        d.default_instance_type = d.instance_types[1].clone();
        let form = SubmitForm::new(d);
        assert_eq!(form.options(Field::Renderer), vec!["Mental Ray", "V-Ray", "Maya Software"]);
        assert_eq!(
            form.options(Field::InstanceType),
            vec!["highmem (8 core, 52GB)", "standard (8 core)"]
        );
    }

    #[test]
    fn test_upload_only_disables_render_settings() {
        let mut form = SubmitForm::new(defaults());
        assert!(form.is_enabled(Field::FrameRange));
        form.set(Field::UploadOnly, "1").unwrap();
        assert!(!form.is_enabled(Field::FrameRange));
        assert!(!form.is_enabled(Field::Layers));
        assert!(form.is_enabled(Field::ProjectName));
        assert!(form.is_enabled(Field::Username));
    }

    #[test]
    fn test_vray_flags_follow_renderer() {
        let mut form = SubmitForm::new(defaults());
        assert!(form.is_enabled(Field::VrayNightly));
        form.set(Field::Renderer, "mentalray").unwrap();
        assert_eq!(form.text(Field::Renderer), "Mental Ray");
        assert!(!form.is_enabled(Field::VrayNightly));
        assert!(!form.is_enabled(Field::UseVrscene));
    }

    #[test]
    fn test_instance_type_names_sharing_a_prefix() {
        let mut d = defaults();
        d.instance_types = vec![
            instance("gpu", "zync_gpu", "1 GPU"),
            instance("gpu_large", "zync_gpu_large", "4 GPU"),
        ];
        d.default_instance_type = d.instance_types[0].clone();
        let mut form = SubmitForm::new(d);

        form.set(Field::InstanceType, "gpu_large").unwrap();
        assert_eq!(form.text(Field::InstanceType), "gpu_large (4 GPU)");
        assert_eq!(form.render_params().unwrap().instance_type, "zync_gpu_large");

        form.set(Field::InstanceType, "gpu (1 GPU)").unwrap();
        assert_eq!(form.render_params().unwrap().instance_type, "zync_gpu");
    }

    #[test]
    fn test_render_params_conversion() {
        let mut form = SubmitForm::new(defaults());
        form.assign("parent_id=  ").unwrap();
        form.assign("start_new_slots=0").unwrap();
        form.assign("instance_type=highmem").unwrap();
        form.assign("layers=beauty, fg,beauty").unwrap();
        form.assign("vray_nightly=yes").unwrap();

        let params = form.render_params().unwrap();
        assert_eq!(params.parent_id, None);
        assert!(params.start_new_slots);
        assert_eq!(params.instance_type, "zync_highmem");
        assert_eq!(params.selected_layers, vec!["beauty", "fg"]);
        assert_eq!(params.frange, "1001-1100");
        assert!(params.vray_nightly);
        assert_eq!(params.renderer, Renderer::Vray);
    }

    #[test]
    fn test_vray_flags_forced_off_for_other_renderers() {
        let mut form = SubmitForm::new(defaults());
        form.set(Field::VrayNightly, "1").unwrap();
        form.set(Field::UseVrscene, "1").unwrap();
        form.set(Field::Renderer, "Maya Software").unwrap();
        let params = form.render_params().unwrap();
        assert!(!params.vray_nightly);
        assert!(!params.use_vrscene);

        form.set(Field::Renderer, "vray").unwrap();
        form.set(Field::UploadOnly, "true").unwrap();
        let params = form.render_params().unwrap();
        assert!(!params.vray_nightly);
    }

    #[test]
    fn test_bad_numbers_name_the_field() {
        let mut form = SubmitForm::new(defaults());
        form.set(Field::ChunkSize, "ten").unwrap();
        let err = form.render_params().unwrap_err();
        assert!(matches!(
            err,
            RendersubError::FieldInvalid { ref field, .. } if field == "chunk_size"
        ));

        form.set(Field::ChunkSize, "10").unwrap();
        form.set(Field::NumInstances, "0").unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_invalid_choices_rejected() {
        let mut form = SubmitForm::new(defaults());
        assert!(matches!(
            form.set(Field::Renderer, "arnold"),
            Err(RendersubError::UnknownRenderer(_))
        ));
        assert!(form.set(Field::Camera, "persp").is_err());
        assert!(form.set(Field::Layers, "beauty,ghost").is_err());
        assert!(form.set(Field::InstanceType, "gpu").is_err());
        assert!(form.set(Field::UploadOnly, "maybe").is_err());
        assert!(form.assign("no_equals_sign").is_err());
        assert!(matches!(
            form.assign("colour=red"),
            Err(RendersubError::UnknownField(_))
        ));
    }

    #[test]
    fn test_credentials_from_form() {
        let mut form = SubmitForm::new(defaults());
        assert!(!form.credentials().is_complete());
        form.assign("username=ana").unwrap();
        form.assign("password=a=b").unwrap();
        assert_eq!(form.credentials(), Credentials::new("ana", "a=b"));
    }
}
