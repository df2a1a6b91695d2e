//! Host commands - JSON IPC interface between the webview and the editor

use crate::ai::{GenerateContentRequest, GenerateContentResponse};
use crate::editor::{Editor, EditorControls, MaskUpdate};
use crate::file::ExportPayload;
use crate::input::{DisplayRect, PointerEvent};
use crate::mask::BrushMode;
use crate::render::ViewState;
use crate::tool::EditingTool;
use serde::{Deserialize, Serialize};

/// One request from the host
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    Rotate,
    SetBrightness {
        value: i32,
    },
    SetContrast {
        value: i32,
    },
    ClearMask,
    Export,
    SelectTool(EditingTool),
    SetBrush {
        #[serde(default)]
        mode: Option<BrushMode>,
        #[serde(default)]
        size: Option<f32>,
    },
    Pointer {
        event: PointerEvent,
        rect: DisplayRect,
    },
    #[serde(rename_all = "camelCase")]
    LoadDataUrl {
        data_url: String,
    },
    /// Build the AI call body for the active tool
    #[serde(rename_all = "camelCase")]
    AiRequest {
        prompt: String,
        #[serde(default)]
        allow_nsfw: bool,
    },
    /// Feed back the service's reply to the last AI request
    ApplyAiResponse {
        response: GenerateContentResponse,
    },
}

/// Mask change carried by a reply; `data_url` is `None` once cleared
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskPayload {
    pub data_url: Option<String>,
}

/// State snapshot returned for every command
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReply {
    pub view: ViewState,
    pub brush_size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_request: Option<GenerateContentRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl CommandReply {
    fn snapshot(editor: &Editor) -> Self {
        Self {
            view: *editor.view(),
            brush_size: editor.brush().size,
            mask: None,
            export: None,
            ai_request: None,
            analysis: None,
        }
    }

    fn with_mask(mut self, update: Option<MaskUpdate>) -> Result<Self, String> {
        if let Some(update) = update {
            self.mask = Some(MaskPayload {
                data_url: update.to_data_url()?,
            });
        }
        Ok(self)
    }
}

/// Execute one command against the editor
pub fn dispatch(editor: &mut Editor, command: HostCommand) -> Result<CommandReply, String> {
    tracing::debug!("Dispatching {:?}", CommandName(&command));

    let mut update = None;
    let mut export = None;
    let mut ai_request = None;
    let mut analysis = None;

    match command {
        HostCommand::Rotate => {
            editor.rotate();
        }
        HostCommand::SetBrightness { value } => {
            editor.set_brightness(value);
        }
        HostCommand::SetContrast { value } => {
            editor.set_contrast(value);
        }
        HostCommand::ClearMask => update = Some(editor.clear_mask()),
        HostCommand::Export => {
            let image = editor.export()?;
            export = Some(ExportPayload::from(&image));
        }
        HostCommand::SelectTool(tool) => update = editor.select_tool(tool),
        HostCommand::SetBrush { mode, size } => {
            if let Some(mode) = mode {
                editor.set_brush_mode(mode);
            }
            if let Some(size) = size {
                editor.set_brush_size(size);
            }
        }
        HostCommand::Pointer { event, rect } => update = editor.handle_pointer(&event, rect),
        HostCommand::LoadDataUrl { data_url } => editor.load_data_url(&data_url)?,
        HostCommand::AiRequest { prompt, allow_nsfw } => {
            let request = editor.ai_request(&prompt, allow_nsfw)?;
            ai_request = Some(request.to_body(&editor.config().models)?);
        }
        HostCommand::ApplyAiResponse { response } => match editor.tool() {
            EditingTool::Analyze { fast } => analysis = Some(response.analysis(fast)),
            _ => update = Some(editor.apply_ai_result(response.image()?)),
        },
    }

    let mut reply = CommandReply::snapshot(editor).with_mask(update)?;
    reply.export = export;
    reply.ai_request = ai_request;
    reply.analysis = analysis;
    Ok(reply)
}

/// JSON in, JSON out
pub fn dispatch_json(editor: &mut Editor, json: &str) -> Result<String, String> {
    let command: HostCommand = serde_json::from_str(json).map_err(|e| {
        tracing::warn!("Rejected host command: {}", e);
        format!("Invalid command: {}", e)
    })?;
    let reply = dispatch(editor, command)?;
    serde_json::to_string(&reply).map_err(|e| e.to_string())
}

/// Debug view that leaves out bulky payloads
struct CommandName<'a>(&'a HostCommand);

impl std::fmt::Debug for CommandName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            HostCommand::Rotate => "rotate",
            HostCommand::SetBrightness { .. } => "setBrightness",
            HostCommand::SetContrast { .. } => "setContrast",
            HostCommand::ClearMask => "clearMask",
            HostCommand::Export => "export",
            HostCommand::SelectTool(_) => "selectTool",
            HostCommand::SetBrush { .. } => "setBrush",
            HostCommand::Pointer { .. } => "pointer",
            HostCommand::LoadDataUrl { .. } => "loadDataUrl",
            HostCommand::AiRequest { .. } => "aiRequest",
            HostCommand::ApplyAiResponse { .. } => "applyAiResponse",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::adapters::encode_png_data_url;
    use crate::core::config::EditorConfig;
    use crate::file::resource::tests::png_bytes;
    use serde_json::{json, Value};

    fn loaded_editor(width: u32, height: u32) -> Editor {
        let mut editor = Editor::new(EditorConfig::default()).unwrap();
        let url = encode_png_data_url(&png_bytes(width, height, [200, 50, 50, 255]));
        let reply = dispatch_json(
            &mut editor,
            &json!({ "command": "loadDataUrl", "dataUrl": url }).to_string(),
        );
        assert!(reply.is_ok(), "{:?}", reply);
        editor
    }

    fn send(editor: &mut Editor, command: Value) -> Value {
        let reply = dispatch_json(editor, &command.to_string()).unwrap();
        serde_json::from_str(&reply).unwrap()
    }

    #[test]
    fn test_view_commands() {
        let mut editor = loaded_editor(20, 20);
        let reply = send(&mut editor, json!({ "command": "rotate" }));
        assert_eq!(reply["view"]["rotationDegrees"], 90);

        let reply = send(&mut editor, json!({ "command": "setBrightness", "value": 250 }));
        assert_eq!(reply["view"]["brightnessPercent"], 200);

        let reply = send(&mut editor, json!({ "command": "setContrast", "value": -4 }));
        assert_eq!(reply["view"]["contrastPercent"], 0);
        assert!(reply.get("mask").is_none());
    }

    #[test]
    fn test_stroke_produces_mask_data_url() {
        let mut editor = loaded_editor(40, 40);
        send(&mut editor, json!({ "command": "selectTool", "tool": "inpaint" }));
        let reply = send(&mut editor, json!({ "command": "setBrush", "mode": "paint", "size": 10 }));
        assert_eq!(reply["brushSize"], 10.0);

        let rect = json!({ "left": 0, "top": 0, "width": 40, "height": 40 });
        for (phase, x) in [("down", 0), ("move", 40)] {
            let reply = send(
                &mut editor,
                json!({
                    "command": "pointer",
                    "event": { "phase": phase, "source": { "kind": "mouse", "clientX": x, "clientY": 20 } },
                    "rect": rect,
                }),
            );
            assert!(reply.get("mask").is_none());
        }
        let reply = send(
            &mut editor,
            json!({
                "command": "pointer",
                "event": { "phase": "up", "source": { "kind": "mouse", "clientX": 40, "clientY": 20 } },
                "rect": rect,
            }),
        );
        let url = reply["mask"]["dataUrl"].as_str().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let reply = send(&mut editor, json!({ "command": "clearMask" }));
        assert_eq!(reply["mask"]["dataUrl"], Value::Null);
    }

    #[test]
    fn test_export_reply() {
        let mut editor = loaded_editor(1000, 500);
        let reply = send(&mut editor, json!({ "command": "export" }));
        assert_eq!(reply["export"]["fileName"], "edited-image.png");
        assert_eq!(reply["export"]["width"], 800);
        assert_eq!(reply["export"]["height"], 400);
    }

    #[test]
    fn test_errors_are_strings() {
        let mut editor = Editor::new(EditorConfig::default()).unwrap();
        assert_eq!(
            dispatch(&mut editor, HostCommand::Export).unwrap_err(),
            "No image is loaded"
        );
        assert!(dispatch_json(&mut editor, r#"{ "command": "explode" }"#)
            .unwrap_err()
            .starts_with("Invalid command"));
        assert!(dispatch_json(
            &mut editor,
            r#"{ "command": "loadDataUrl", "dataUrl": "data:image/png;base64,!!!" }"#
        )
        .is_err());
    }

    #[test]
    fn test_generate_round_trip() {
        let mut editor = Editor::new(EditorConfig::default()).unwrap();
        send(&mut editor, json!({ "command": "selectTool", "tool": "generate", "size": "2K" }));
        let reply = send(&mut editor, json!({ "command": "aiRequest", "prompt": "a red fox" }));
        assert_eq!(reply["aiRequest"]["model"], "gemini-3-pro-image-preview");
        assert_eq!(reply["aiRequest"]["config"]["imageConfig"]["imageSize"], "2K");

        let url = encode_png_data_url(&png_bytes(1024, 1024, [0, 0, 0, 255]));
        let data = url.trim_start_matches("data:image/png;base64,");
        let response = json!({
            "candidates": [{ "content": { "parts": [ { "inlineData": { "mimeType": "image/png", "data": data } } ] } }]
        });
        let reply = send(&mut editor, json!({ "command": "applyAiResponse", "response": response }));
        assert_eq!(reply["mask"]["dataUrl"], Value::Null);
        assert_eq!(editor.surface_size().width, 600);
    }

    #[test]
    fn test_analyze_reply_text() {
        let mut editor = loaded_editor(10, 10);
        send(&mut editor, json!({ "command": "selectTool", "tool": "analyze", "fast": true }));
        let reply = send(&mut editor, json!({ "command": "aiRequest", "prompt": "" }));
        assert_eq!(reply["aiRequest"]["model"], "gemini-2.5-flash-lite");
        assert_eq!(
            reply["aiRequest"]["contents"]["parts"][1]["text"],
            "Quickly describe this image."
        );

        let reply = send(
            &mut editor,
            json!({ "command": "applyAiResponse", "response": { "candidates": [] } }),
        );
        assert_eq!(reply["analysis"], "No description available.");
    }
}
