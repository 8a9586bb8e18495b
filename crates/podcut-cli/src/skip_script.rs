//! mpv Lua skip-script generation.
//!
//! Instead of re-rendering the audio, playback can jump over the remove
//! spans: a periodic timer checks the position and, once it enters
//! `[start, stop)`, seeks to `stop`. The media-name guard keeps the script
//! inert when mpv is playing something else.

use std::path::{Path, PathBuf};

use tracing::info;

use podcut_engine::CutPlan;

use crate::error::AppResult;

/// Escape a string for use inside a double-quoted Lua literal.
fn lua_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the Lua source for a skip script.
pub fn render_skip_script(plan: &CutPlan, media_name: &str) -> String {
    let mut lua = String::from("local skips = {\n");
    for (start, stop) in plan.skip_pairs() {
        lua.push_str(&format!("    {{ start = {start}, stop = {stop} }},\n"));
    }
    lua.push_str("}\n");

    let media_name = lua_escape(media_name);
    lua.push_str(&format!(
        r#"
local target_media = "{media_name}"

mp.add_periodic_timer(0.25, function()
    local path = mp.get_property("path")
    if not path then return end

    if not string.find(path, target_media, 1, true) then
        return
    end

    local pos = mp.get_property_number("time-pos")
    if not pos then return end

    for i, skip in ipairs(skips) do
        if pos >= skip.start and pos < skip.stop then
            mp.set_property_number("time-pos", skip.stop)
            mp.osd_message("Skipped ad")
            break
        end
    end
end)
"#
    ));
    lua
}

/// Write the skip script next to the other outputs and return its path.
pub fn write_skip_script(
    plan: &CutPlan,
    media_name: &str,
    output_dir: impl AsRef<Path>,
) -> AppResult<PathBuf> {
    let safe_stem: String = media_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let path = output_dir.as_ref().join(format!("{safe_stem}_skips.lua"));
    std::fs::write(&path, render_skip_script(plan, media_name))?;
    info!(path = %path.display(), "wrote skip script");
    Ok(path)
}
