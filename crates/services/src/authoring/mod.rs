//! Admin course authoring: the add-course workflow, the edit-course page and
//! the service that carries their backend calls.

mod draft;
mod editor;
mod module;
mod preview;
mod service;

pub use draft::{AuthoringPhase, CourseAuthoring};
pub use editor::CourseEditor;
pub use module::{LessonModule, ModuleState, UploadOutcome};
pub use preview::{PreviewSlot, VideoPreview};
pub use service::AuthoringService;
