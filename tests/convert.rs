use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use txt2pdf::convert::{convert_with, generate, Fallback, FontChoice};
use txt2pdf::resolve::FontSearch;
use txt2pdf::{ConvertError, Settings};

fn no_fonts() -> FontSearch {
    FontSearch::new(Vec::<PathBuf>::new(), Vec::<PathBuf>::new())
}

fn settings_in(dir: &Path, input: &str) -> Settings {
    let path = dir.join("cli.txt");
    fs::write(&path, input).expect("can write input");
    Settings {
        input: path,
        output_dir: dir.join("out/PDF"),
        ..Settings::default()
    }
}

#[test]
fn converts_text_into_a_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        subject: Some("greetings".to_string()),
        ..settings_in(dir.path(), "Hello\n\nWorld\n")
    };

    let report = convert_with(&settings, &no_fonts()).unwrap();

    assert_eq!(report.output, dir.path().join("out/PDF/output.pdf"));
    assert_eq!(report.pages, 1);
    assert_eq!(report.lines, 2);
    assert_eq!(
        report.font,
        FontChoice::Builtin {
            font: txt2pdf::BuiltinFont::Helvetica,
            fallback: Fallback::NotFound,
        }
    );

    let bytes = fs::read(&report.output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 1"));
    assert!(text.contains("/Title (cli.txt)"));
    assert!(text.contains("/Subject (greetings)"));
}

#[test]
fn overwrites_an_existing_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path(), &vec!["line"; 100].join("\n"));
    fs::create_dir_all(&settings.output_dir).unwrap();
    fs::write(settings.output_path(), b"stale").unwrap();

    let report = convert_with(&settings, &no_fonts()).unwrap();
    assert_eq!(report.pages, 3);
    let bytes = fs::read(settings.output_path()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn missing_input_is_reported_and_nothing_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        input: dir.path().join("nope.txt"),
        output_dir: dir.path().join("PDF"),
        ..Settings::default()
    };

    let err = convert_with(&settings, &no_fonts()).unwrap_err();
    assert!(matches!(err, ConvertError::InputNotFound { .. }));
    assert!(!settings.output_dir.exists());
}

#[test]
fn invalid_utf8_input_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("binary.txt");
    fs::write(&input, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    let settings = Settings {
        input,
        output_dir: dir.path().join("PDF"),
        ..Settings::default()
    };

    let err = convert_with(&settings, &no_fonts()).unwrap_err();
    assert!(matches!(err, ConvertError::InputUnreadable { .. }));
}

#[test]
fn output_directory_that_cannot_be_created_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), "text");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    settings.output_dir = blocker.join("PDF");

    let err = convert_with(&settings, &no_fonts()).unwrap_err();
    assert!(matches!(err, ConvertError::DirectoryCreateFailed { .. }));
}

#[test]
fn unusable_font_in_search_path_still_converts() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts");
    fs::create_dir_all(&fonts).unwrap();
    fs::write(fonts.join("NotoSansJP-Regular.ttf"), b"garbage").unwrap();
    let search = FontSearch::new([&fonts], txt2pdf::resolve::CANDIDATE_FONTS.iter().copied());
    let settings = settings_in(dir.path(), "こんにちは\n世界");

    let report = convert_with(&settings, &search).unwrap();
    assert!(matches!(
        report.font,
        FontChoice::Builtin {
            fallback: Fallback::LoadFailed { .. },
            ..
        }
    ));
    assert_eq!(report.lines, 2);
    assert!(report.output.is_file());
}

#[test]
fn generation_is_repeatable() {
    let content = lipsum::lipsum(3000).replace(". ", ".\n\n").replace(", ", ",\n");
    let settings = Settings::default();

    let layout = |content: &str| {
        let generated = generate(content, &settings, &no_fonts()).unwrap();
        let pages = generated.document.page_count();
        let runs: Vec<_> = generated
            .document
            .pages()
            .flat_map(|page| page.runs.iter().map(|run| (run.coords, run.text.clone())))
            .collect();
        (pages, runs)
    };

    let first = layout(&content);
    let second = layout(&content);
    assert!(first.0 >= 2);
    assert_eq!(first, second);
}

#[test]
fn embeds_a_font_found_on_the_search_path() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let search = FontSearch::new([&fixtures], ["TxtTest-Regular.ttf"]);
    let content = "Hello\tHello\n\n日本 x";

    let generated = generate(content, &Settings::default(), &search).unwrap();
    assert_eq!(
        generated.font,
        FontChoice::Embedded {
            path: fixtures.join("TxtTest-Regular.ttf")
        }
    );

    let runs: Vec<Vec<u8>> = generated
        .document
        .pages()
        .flat_map(|page| page.runs.iter().map(|run| run.encoded.clone()))
        .collect();
    assert_eq!(
        runs,
        vec![
            vec![0, 2, 0, 3, 0, 4, 0, 4, 0, 5, 0, 1, 0, 2, 0, 3, 0, 4, 0, 4, 0, 5],
            vec![0, 6, 0, 7, 0, 1, 0, 8],
        ]
    );

    let bytes = generated.document.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    for key in [
        "/Type0",
        "/CIDFontType2",
        "/Identity-H",
        "/FontFile2",
        "/ToUnicode",
        "/TxtTest-Regular",
    ] {
        assert!(text.contains(key), "missing {key}");
    }
    assert!(!text.contains("/Helvetica"));
}

#[test]
fn empty_input_still_produces_one_page() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path(), "");

    let report = convert_with(&settings, &no_fonts()).unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.lines, 0);
}
