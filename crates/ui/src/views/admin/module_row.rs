use dioxus::prelude::*;

use services::authoring::PreviewSlot;

use crate::vm::ModuleRowVm;

/// One lesson module of the add/edit course forms. The video is attached
/// from a local path; `action_label` names what `on_action` does on this
/// page.
#[component]
pub(super) fn ModuleRow(
    row: ModuleRowVm,
    action_label: &'static str,
    on_title: EventHandler<String>,
    on_attach: EventHandler<String>,
    on_clear: EventHandler<()>,
    on_preview: EventHandler<String>,
    on_action: EventHandler<()>,
) -> Element {
    let mut path = use_signal(String::new);
    let preview_path = row.video_path.clone();

    rsx! {
        li { class: "module-row card",
            p { class: "muted", "Module {row.key} · {row.status_label}" }
            input {
                placeholder: "Lesson title",
                value: "{row.title}",
                disabled: !row.editable,
                oninput: move |evt| on_title.call(evt.value()),
            }
            p { "{row.file_label}" }
            if row.editable {
                input {
                    placeholder: "/path/to/video.mp4",
                    value: "{path}",
                    oninput: move |evt| path.set(evt.value()),
                }
                button {
                    disabled: path.read().trim().is_empty(),
                    onclick: move |_| on_attach.call(path().trim().to_owned()),
                    "Attach"
                }
                button { onclick: move |_| on_clear.call(()), "Clear" }
            }
            if let Some(video_path) = preview_path {
                button {
                    onclick: move |_| on_preview.call(video_path.clone()),
                    "Preview"
                }
            }
            button {
                disabled: !row.can_upload,
                onclick: move |_| on_action.call(()),
                "{action_label}"
            }
        }
    }
}

/// Plays the module video currently opened in `preview`.
#[component]
pub(super) fn VideoPreviewPanel(preview: Signal<PreviewSlot>) -> Element {
    let mut preview = preview;
    let current = preview
        .read()
        .current()
        .map(|video| video.path().display().to_string());

    match current {
        Some(path) => rsx! {
            div { class: "player card",
                video { controls: true, src: "{path}" }
                button { onclick: move |_| preview.write().close(), "Close preview" }
            }
        },
        None => rsx! {},
    }
}
