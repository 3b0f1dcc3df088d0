use services::authoring::{AuthoringPhase, LessonModule, ModuleState};

use super::course_vm::duration_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRowVm {
    pub key: u32,
    pub title: String,
    pub file_label: String,
    pub status_label: &'static str,
    pub video_path: Option<String>,
    pub editable: bool,
    pub can_upload: bool,
}

impl From<&LessonModule> for ModuleRowVm {
    fn from(module: &LessonModule) -> Self {
        let state = module.state();
        let file_label = module.video().map_or_else(
            || "No video selected".to_owned(),
            |video| format!("{} ({})", video.file_name(), duration_label(video.duration_minutes())),
        );
        let status_label = match state {
            ModuleState::UnselectedVideo | ModuleState::VideoSelected => "Not uploaded",
            ModuleState::Uploading => "Uploading...",
            ModuleState::Uploaded => "Uploaded",
        };
        let editable = !matches!(state, ModuleState::Uploading | ModuleState::Uploaded);
        Self {
            key: module.key(),
            title: module.title().to_owned(),
            file_label,
            status_label,
            video_path: module
                .video()
                .map(|video| video.path().display().to_string()),
            editable,
            can_upload: editable,
        }
    }
}

#[must_use]
pub fn map_module_rows(modules: &[LessonModule]) -> Vec<ModuleRowVm> {
    modules.iter().map(ModuleRowVm::from).collect()
}

#[must_use]
pub fn phase_label(phase: AuthoringPhase) -> &'static str {
    match phase {
        AuthoringPhase::Draft => "Draft",
        AuthoringPhase::Created => "Course created",
        AuthoringPhase::ModulesInProgress => "Uploading modules",
        AuthoringPhase::Saved => "All modules uploaded",
    }
}
