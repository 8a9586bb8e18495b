//! Detection prompt construction.

use podcut_engine::AnalysisWindow;

/// Build the analysis prompt for one window.
///
/// The position note matters: the first window is told to expect pre-roll
/// ads before the intro, while later windows start mid-conversation and
/// should not label an "intro" at all.
pub fn build_prompt(window: &AnalysisWindow) -> String {
    let mut context_note = format!(
        "This is chunk {} of {}. ",
        window.index + 1,
        window.total
    );
    if window.is_first() {
        context_note.push_str(
            "Audio is the START of the file. Watch out for pre-roll ads before the intro. ",
        );
    } else {
        context_note.push_str("Audio starts mid-conversation. ");
    }

    format!(
        r#"You are an expert podcast editor.
I am providing you with a raw JSON transcript segment ({context_note}).

**Your goal:** Identify non-content segments (ads, intros, outros) to remove.

**Part 1: Semantic cues for removal**
* **Pre-roll ads:** Commercials playing immediately at 00:00 before the show starts.
* **Intro:** Theme music lyrics, "Welcome to the show".
* **Ads:** Phrases like "Sponsored by", "Use code", "Go to [website]", "Brought to you by". Any product pitch (VPN, mattress, casino, event) unrelated to the story.
* **Outro:** "Thanks for listening", "Rate and review".

**Part 2: Guidelines**
* Be aggressive in identifying ads. If it sounds like a commercial, mark it.
* Use the precise `start` and `end` timestamps provided in the input JSON.

**Output format:**
Return valid JSON containing ONLY the list of segments to remove.
{context_note}

{{
    "segments_to_remove": [
        {{"type": "intro", "start": 0.0, "end": 15.5}},
        {{"type": "ad", "start": 450.2, "end": 480.0}}
    ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(index: usize, total: usize) -> AnalysisWindow {
        AnalysisWindow {
            index,
            total,
            offset_secs: index as f64 * 540.0,
            end_secs: index as f64 * 540.0 + 600.0,
            segments: Vec::new(),
        }
    }

    #[test]
    fn test_first_window_warns_about_preroll() {
        let prompt = build_prompt(&window(0, 3));
        assert!(prompt.contains("chunk 1 of 3"));
        assert!(prompt.contains("pre-roll ads"));
    }

    #[test]
    fn test_later_window_starts_mid_conversation() {
        let prompt = build_prompt(&window(1, 3));
        assert!(prompt.contains("chunk 2 of 3"));
        assert!(prompt.contains("mid-conversation"));
        assert!(!prompt.contains("START of the file"));
    }
}
