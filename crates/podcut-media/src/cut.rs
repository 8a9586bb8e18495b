//! Trim-and-concatenate audio editing.
//!
//! The keep list drives a single ffmpeg filter graph: one `atrim` per kept
//! span with its timestamps rebased to zero, concatenated in list order, so
//! the output has a continuous timeline starting at 0.

use std::path::Path;
use tracing::info;

use podcut_models::TimeSpan;

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};

/// Build the `-filter_complex` graph for a keep list.
///
/// Each span becomes `[0:a]atrim=start=S:end=E,asetpts=PTS-STARTPTS[aN]`;
/// the labeled streams feed one `concat` in ascending time order.
pub fn build_filter_graph(keep: &[TimeSpan]) -> String {
    let mut graph = String::new();
    for (i, span) in keep.iter().enumerate() {
        graph.push_str(&format!(
            "[0:a]atrim=start={:.3}:end={:.3},asetpts=PTS-STARTPTS[a{}];",
            span.start, span.end, i
        ));
    }
    for i in 0..keep.len() {
        graph.push_str(&format!("[a{}]", i));
    }
    graph.push_str(&format!("concat=n={}:v=0:a=1[out]", keep.len()));
    graph
}

/// Cut the remove-spans out of `input` by re-rendering only the kept spans.
pub async fn apply_cut_list(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    keep: &[TimeSpan],
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if keep.is_empty() {
        return Err(MediaError::EmptyKeepList);
    }
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        kept_spans = keep.len(),
        "cutting audio"
    );

    FfmpegCommand::new(input, output)
        .filter_complex(build_filter_graph(keep))
        .map("[out]")
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: f64, end: f64) -> TimeSpan {
        TimeSpan::new(start, end).unwrap()
    }

    #[test]
    fn test_filter_graph_single_span() {
        let graph = build_filter_graph(&[span(0.0, 10.0)]);
        assert_eq!(
            graph,
            "[0:a]atrim=start=0.000:end=10.000,asetpts=PTS-STARTPTS[a0];[a0]concat=n=1:v=0:a=1[out]"
        );
    }

    #[test]
    fn test_filter_graph_concatenates_in_order() {
        let graph = build_filter_graph(&[span(0.0, 10.0), span(20.0, 30.5)]);
        assert!(graph.contains("atrim=start=0.000:end=10.000"));
        assert!(graph.contains("atrim=start=20.000:end=30.500"));
        assert!(graph.ends_with("[a0][a1]concat=n=2:v=0:a=1[out]"));
    }

    #[tokio::test]
    async fn test_empty_keep_list_is_refused() {
        let result = apply_cut_list("in.mp3", "out.mp3", &[]).await;
        assert!(matches!(result, Err(MediaError::EmptyKeepList)));
    }
}
