//! Annotation-driven navigation for session replay.
//!
//! The crate sits between a replay engine's timeline and the player UI:
//! bookmark navigation over a recording's annotations, autopause at marked
//! instants, and the lifecycle of the contextual overlay anchored in the
//! replayed document.

pub mod annotations;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod player;
pub mod recording;
pub mod runtime;
pub mod simulation;

use std::fs;
use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// Write the TypeScript view types consumed by the player UI.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    for entry in fs::read_dir(out_dir)
        .map_err(|err| format!("Failed to list {}: {err}", out_dir.display()))?
    {
        let entry = entry.map_err(|err| format!("Failed to read entry: {err}"))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .map_err(|err| format!("Failed to remove {}: {err}", path.display()))?;
        }
    }

    export_single_type::<player::UiEvent>(out_dir)?;
    export_single_type::<player::OverlayView>(out_dir)?;
    export_single_type::<player::TocItem>(out_dir)?;
    export_single_type::<player::MarkerView>(out_dir)?;
    export_single_type::<player::PlayerSnapshot>(out_dir)?;
    export_single_type::<player::Direction>(out_dir)?;
    export_single_type::<player::KeyInput>(out_dir)?;
    export_single_type::<player::Modifiers>(out_dir)?;
    export_single_type::<document::ElementHandle>(out_dir)?;

    let index_content = r#"export type { UiEvent } from "./UiEvent";
export type { OverlayView } from "./OverlayView";
export type { TocItem } from "./TocItem";
export type { MarkerView } from "./MarkerView";
export type { PlayerSnapshot } from "./PlayerSnapshot";
export type { Direction } from "./Direction";
export type { KeyInput } from "./KeyInput";
export type { Modifiers } from "./Modifiers";
export type { ElementHandle } from "./ElementHandle";
"#;

    fs::write(out_dir.join("index.ts"), index_content).map_err(|err| {
        format!(
            "Failed to write {}: {err}",
            out_dir.join("index.ts").display()
        )
    })?;

    Ok(())
}
