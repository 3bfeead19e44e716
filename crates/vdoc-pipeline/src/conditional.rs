//! Tag-conditional block filtering.
//!
//! Strips or removes blocks delimited by `#ifdef <label>` / `#endif <label>`
//! markers based on the active build tag. Blocks whose label equals the tag
//! lose only their marker lines; every other block is removed in its
//! entirety, markers and body. Matching is strictly label-scoped against
//! the nearest following close marker with the same label.

use std::path::Path;

use crate::error::PipelineError;
use crate::tag::BuildTag;

/// A parsed conditional marker line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker<'a> {
    /// `#ifdef <label>`
    Open(&'a str),
    /// `#endif <label>`
    Close(&'a str),
}

impl<'a> Marker<'a> {
    fn label(self) -> &'a str {
        match self {
            Self::Open(label) | Self::Close(label) => label,
        }
    }
}

/// Parse a line as a conditional marker.
///
/// Returns `None` for lines that don't carry a marker. A marker line with
/// content beyond its label is a [`PipelineError::MalformedDirective`].
fn parse_marker<'a>(line: &'a str, file: &Path) -> Result<Option<Marker<'a>>, PipelineError> {
    let trimmed = line.trim_start();
    let (open, rest) = if let Some(rest) = trimmed.strip_prefix("#ifdef") {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("#endif") {
        (false, rest)
    } else {
        return Ok(None);
    };

    // The keyword must be followed by whitespace and a label; anything else
    // is ordinary text (e.g. `#ifdefault` or a bare `#endif` in prose).
    if !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    let rest = rest.trim_start();
    let label = rest.split_whitespace().next().unwrap_or("");
    if label.is_empty() {
        return Ok(None);
    }
    if rest[label.len()..].trim_start().is_empty() {
        Ok(Some(if open {
            Marker::Open(label)
        } else {
            Marker::Close(label)
        }))
    } else {
        Err(PipelineError::MalformedDirective {
            file: file.to_path_buf(),
            line: line.trim().to_owned(),
        })
    }
}

/// Apply conditional filtering to a fully include-expanded buffer.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedDirective`] for marker lines with
/// trailing content, or [`PipelineError::UnmatchedDirective`] when a
/// marker has no same-label partner.
pub fn filter_conditionals(
    input: &str,
    tag: &BuildTag,
    file: &Path,
) -> Result<String, PipelineError> {
    let lines: Vec<&str> = input.lines().collect();
    let mut markers = Vec::with_capacity(lines.len());
    for line in &lines {
        markers.push(parse_marker(line, file)?);
    }

    let mut deleted = vec![false; lines.len()];

    // Blocks for the active tag: the markers go, the body stays.
    for i in 0..lines.len() {
        if deleted[i] {
            continue;
        }
        if let Some(Marker::Open(label)) = markers[i]
            && label == tag.as_str()
        {
            let close = (i + 1..lines.len()).find(|&j| {
                !deleted[j] && matches!(markers[j], Some(Marker::Close(l)) if l == label)
            });
            let Some(j) = close else {
                return Err(PipelineError::UnmatchedDirective {
                    file: file.to_path_buf(),
                    label: label.to_owned(),
                });
            };
            deleted[i] = true;
            deleted[j] = true;
        }
    }

    // Every remaining block belongs to another variant: remove it whole,
    // markers and body. Differently-labeled markers inside the removed
    // region are consumed with it.
    let mut i = 0;
    while i < lines.len() {
        if !deleted[i]
            && let Some(Marker::Open(label)) = markers[i]
        {
            let close = (i + 1..lines.len()).find(|&j| {
                !deleted[j] && matches!(markers[j], Some(Marker::Close(l)) if l == label)
            });
            let Some(j) = close else {
                return Err(PipelineError::UnmatchedDirective {
                    file: file.to_path_buf(),
                    label: label.to_owned(),
                });
            };
            for d in &mut deleted[i..=j] {
                *d = true;
            }
            i = j + 1;
            continue;
        }
        i += 1;
    }

    // A marker surviving both passes is a stray close.
    for (i, marker) in markers.iter().enumerate() {
        if !deleted[i]
            && let Some(marker) = marker
        {
            return Err(PipelineError::UnmatchedDirective {
                file: file.to_path_buf(),
                label: marker.label().to_owned(),
            });
        }
    }

    let kept: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|&(i, _)| !deleted[i])
        .map(|(_, line)| *line)
        .collect();
    let keep_newline = input.ends_with('\n') && !kept.is_empty();
    let mut output = kept.join("\n");
    if keep_newline {
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn filter(input: &str, tag: &str) -> Result<String, PipelineError> {
        filter_conditionals(input, &BuildTag::new(tag), Path::new("intro.rst"))
    }

    #[test]
    fn test_matching_block_is_unwrapped() {
        let output = filter("#ifdef freenas\nHello\n#endif freenas\n", "freenas").unwrap();
        assert_eq!(output, "Hello\n");
    }

    #[test]
    fn test_other_block_is_removed_entirely() {
        let output = filter("#ifdef truenas\nHello\n#endif truenas\n", "freenas").unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn test_sequential_blocks_of_different_labels() {
        let input = "\
before
#ifdef freenas
community
#endif freenas
#ifdef truenas
enterprise
#endif truenas
after
";
        let output = filter(input, "freenas").unwrap();
        assert_eq!(output, "before\ncommunity\nafter\n");
    }

    #[test]
    fn test_multiple_blocks_same_label() {
        let input = "\
#ifdef truenas
one
#endif truenas
kept
#ifdef truenas
two
#endif truenas
";
        let output = filter(input, "freenas").unwrap();
        assert_eq!(output, "kept\n");
    }

    #[test]
    fn test_indented_markers() {
        let input = "  #ifdef freenas\n  body\n  #endif freenas\n";
        let output = filter(input, "freenas").unwrap();
        assert_eq!(output, "  body\n");
    }

    #[test]
    fn test_unmatched_open_fails() {
        let err = filter("#ifdef foo\nHello\n", "freenas").unwrap_err();
        match err {
            PipelineError::UnmatchedDirective { label, .. } => assert_eq!(label, "foo"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unmatched_open_for_active_tag_fails() {
        let err = filter("#ifdef freenas\nHello\n", "freenas").unwrap_err();
        match err {
            PipelineError::UnmatchedDirective { label, .. } => assert_eq!(label, "freenas"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stray_close_fails() {
        let err = filter("Hello\n#endif foo\n", "freenas").unwrap_err();
        match err {
            PipelineError::UnmatchedDirective { label, .. } => assert_eq!(label, "foo"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_close_label_scoped_matching() {
        // The truenas close belonging to the inner block is consumed as
        // part of the removed region; the outer close still matches.
        let input = "\
#ifdef truenas
enterprise
#ifdef corenas
other
#endif corenas
#endif truenas
";
        let output = filter(input, "freenas").unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn test_marker_with_trailing_content_is_malformed() {
        let err = filter("#ifdef freenas extra words\n#endif freenas\n", "freenas").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedDirective { .. }));
    }

    #[test]
    fn test_close_with_trailing_content_is_malformed() {
        let err = filter("#ifdef freenas\n#endif freenas tail\n", "freenas").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedDirective { .. }));
    }

    #[test]
    fn test_prose_mentions_are_not_markers() {
        let input = "Use #ifdef blocks to vary output.\n#ifdefault is not a marker\n";
        let output = filter(input, "freenas").unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_no_markers_is_identity() {
        let input = "plain\ntext\n";
        assert_eq!(filter(input, "freenas").unwrap(), input);
    }

    #[test]
    fn test_private_build_label_is_ordinary_here() {
        // Brand aliasing lives in substitution; the filter matches labels
        // textually, so a bsg- block is removed under the truenas tag.
        let input = "#ifdef bsg-acme\nprivate\n#endif bsg-acme\n";
        assert_eq!(filter(input, "truenas").unwrap(), "");
        assert_eq!(filter(input, "bsg-acme").unwrap(), "private\n");
    }
}
