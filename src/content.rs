//! Content stream rendering for pages.

use crate::page::{TextRun, TextStyle};
use std::io::Write;

/// Renders the text runs of a page to an uncompressed PDF content stream.
///
/// Every run becomes its own text object positioned with `Td`, and is shown
/// with a single hex-string `Tj` so that both single-byte (WinAnsi) and
/// two-byte (Identity-H) encodings go through the same path.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_runs(
    runs: &[TextRun],
    font_resource: &str,
    style: TextStyle,
) -> Result<Vec<u8>, std::io::Error> {
    if runs.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    write!(&mut content, "q\n")?;
    write!(&mut content, "/{} {} Tf\n", font_resource, style.size)?;
    style.colour.write_fill(&mut content)?;

    for run in runs.iter() {
        write!(&mut content, "BT\n")?;
        write!(&mut content, "{} {} Td\n", run.coords.0, run.coords.1)?;
        write!(&mut content, "<")?;
        for byte in run.encoded.iter() {
            write!(&mut content, "{byte:02x}")?;
        }
        write!(&mut content, "> Tj\n")?;
        write!(&mut content, "ET\n")?;
    }

    write!(&mut content, "Q\n")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, Pt};
    use pretty_assertions::assert_eq;

    fn style() -> TextStyle {
        TextStyle {
            size: Pt(12.0),
            colour: colours::BLACK,
        }
    }

    #[test]
    fn empty_pages_have_empty_content() {
        assert!(render_runs(&[], "F0", style()).unwrap().is_empty());
    }

    #[test]
    fn runs_become_positioned_text_objects() {
        let runs = vec![
            TextRun {
                text: "Hi".into(),
                coords: (Pt(10.0), Pt(800.0)),
                encoded: b"Hi".to_vec(),
            },
            TextRun {
                text: "日".into(),
                coords: (Pt(10.0), Pt(783.5)),
                encoded: vec![0x12, 0x34],
            },
        ];
        let rendered = String::from_utf8(render_runs(&runs, "F0", style()).unwrap()).unwrap();
        assert_eq!(
            rendered,
            "q\n/F0 12 Tf\n0 g\nBT\n10 800 Td\n<4869> Tj\nET\nBT\n10 783.5 Td\n<1234> Tj\nET\nQ\n"
        );
    }
}
