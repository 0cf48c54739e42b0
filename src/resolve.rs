//! Finding a font file that can render the input's script.
//!
//! A [FontSearch] is a list of directories and a list of candidate file names,
//! both in order of preference. Directories take precedence: every candidate is
//! tried in the first directory before moving on to the next, so a weaker
//! candidate in `./fonts` wins over the preferred one in the system font
//! directory.
//!
//! [FontSearch::platform] starts with the project-local `./font` and
//! `./fonts`. Setting `TXT2PDF_FONT_DIR` puts that directory in front of
//! them, so it overrides the project-local fonts as well as the system ones.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// Environment variable naming an extra font directory searched before all others
pub const FONT_DIR_ENV: &str = "TXT2PDF_FONT_DIR";

/// Font files to look for, most preferred first: Noto Sans JP regular, its
/// variable and other weights, broader CJK / generic Noto, then Zen Old Mincho
pub const CANDIDATE_FONTS: &[&str] = &[
    "static/NotoSansJP-Regular.ttf",
    "NotoSansJP-Regular.ttf",
    "NotoSansJP-VariableFont_wght.ttf",
    "static/NotoSansJP-Medium.ttf",
    "static/NotoSansJP-Light.ttf",
    "static/NotoSansJP-Bold.ttf",
    "static/NotoSansJP-SemiBold.ttf",
    "static/NotoSansJP-ExtraLight.ttf",
    "static/NotoSansJP-ExtraBold.ttf",
    "static/NotoSansJP-Thin.ttf",
    "static/NotoSansJP-Black.ttf",
    "NotoSansJP-Medium.ttf",
    "NotoSansJP-Light.ttf",
    "NotoSansJP-Bold.ttf",
    "NotoSansJP-SemiBold.ttf",
    "NotoSansCJK-Regular.ttf",
    "NotoSansCJK.ttf",
    "NotoSansJP.ttf",
    "NotoSans-Regular.ttf",
    "ZenOldMincho-Regular.ttf",
    "ZenOldMincho-Medium.ttf",
    "ZenOldMincho-SemiBold.ttf",
    "ZenOldMincho-Bold.ttf",
    "ZenOldMincho-Black.ttf",
];

/// An ordered (directory × file name) search for a font file
#[derive(Debug, Clone, PartialEq)]
pub struct FontSearch {
    directories: Vec<PathBuf>,
    candidates: Vec<PathBuf>,
}

impl FontSearch {
    pub fn new<D, C>(directories: D, candidates: C) -> FontSearch
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
        C: IntoIterator,
        C::Item: Into<PathBuf>,
    {
        FontSearch {
            directories: directories.into_iter().map(Into::into).collect(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// The default search: `$TXT2PDF_FONT_DIR` if set, the project-local
    /// `./font` and `./fonts`, then the user's and the system's font
    /// directories for this platform, probing for [CANDIDATE_FONTS]
    pub fn platform() -> FontSearch {
        FontSearch::new(
            default_directories(env_path(FONT_DIR_ENV)),
            CANDIDATE_FONTS.iter().copied(),
        )
    }

    /// Same candidates, different directories
    pub fn with_directories<D>(self, directories: D) -> FontSearch
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
    {
        FontSearch {
            directories: directories.into_iter().map(Into::into).collect(),
            candidates: self.candidates,
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Every path the search will check, in order
    pub fn combinations(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.directories.iter().flat_map(move |dir| {
            self.candidates
                .iter()
                .map(move |candidate| dir.join(candidate))
        })
    }

    /// The first combination that is an existing file, or [None] when
    /// nothing matched. Only checks existence; the file is not opened.
    pub fn resolve(&self) -> Option<PathBuf> {
        let found = self.combinations().find(|path| {
            let exists = is_font_file(path);
            trace!(path = %path.display(), exists, "checked font candidate");
            exists
        });
        if let Some(path) = &found {
            debug!(path = %path.display(), "resolved font");
        }
        found
    }
}

impl Default for FontSearch {
    fn default() -> Self {
        FontSearch::platform()
    }
}

fn default_directories(override_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut directories: Vec<PathBuf> = override_dir.into_iter().collect();
    directories.push(PathBuf::from("./font"));
    directories.push(PathBuf::from("./fonts"));
    directories.extend(user_font_dirs());
    directories.extend(system_font_dirs());
    directories
}

fn is_font_file(path: &Path) -> bool {
    path.metadata().map(|meta| meta.is_file()).unwrap_or(false)
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
}

#[cfg(not(windows))]
fn home_dir() -> Option<PathBuf> {
    env_path("HOME").or_else(|| env_path("USERPROFILE"))
}

#[cfg(target_os = "macos")]
fn user_font_dirs() -> Vec<PathBuf> {
    home_dir()
        .map(|home| vec![home.join("Library/Fonts")])
        .unwrap_or_default()
}

#[cfg(target_os = "macos")]
fn system_font_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
    ]
}

#[cfg(windows)]
fn user_font_dirs() -> Vec<PathBuf> {
    env_path("LOCALAPPDATA")
        .map(|local| vec![local.join("Microsoft").join("Windows").join("Fonts")])
        .unwrap_or_default()
}

#[cfg(windows)]
fn system_font_dirs() -> Vec<PathBuf> {
    env_path("WINDIR")
        .or_else(|| env_path("SystemRoot"))
        .map(|root| vec![root.join("Fonts")])
        .unwrap_or_default()
}

#[cfg(not(any(target_os = "macos", windows)))]
fn user_font_dirs() -> Vec<PathBuf> {
    home_dir()
        .map(|home| vec![home.join(".local/share/fonts"), home.join(".fonts")])
        .unwrap_or_default()
}

#[cfg(not(any(target_os = "macos", windows)))]
fn system_font_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/share/fonts/truetype/noto"),
        PathBuf::from("/usr/share/fonts/opentype/noto"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"font").unwrap();
    }

    #[test]
    fn nothing_found_is_none() {
        let root = tempfile::tempdir().unwrap();
        let search = FontSearch::new(
            [root.path().join("a"), root.path().join("b")],
            CANDIDATE_FONTS.iter().copied(),
        );
        assert_eq!(search.resolve(), None);
    }

    #[test]
    fn empty_search_is_none() {
        let search = FontSearch::new(Vec::<PathBuf>::new(), CANDIDATE_FONTS.iter().copied());
        assert_eq!(search.resolve(), None);
    }

    #[test]
    fn preferred_candidate_wins_within_a_directory() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("ZenOldMincho-Regular.ttf"));
        touch(&root.path().join("NotoSansJP-Regular.ttf"));
        touch(&root.path().join("static/NotoSansJP-Regular.ttf"));

        let search = FontSearch::new([root.path()], CANDIDATE_FONTS.iter().copied());
        assert_eq!(
            search.resolve(),
            Some(root.path().join("static/NotoSansJP-Regular.ttf"))
        );
    }

    #[test]
    fn earlier_directory_beats_better_candidate() {
        let root = tempfile::tempdir().unwrap();
        let first = root.path().join("font");
        let second = root.path().join("fonts");
        touch(&first.join("ZenOldMincho-Black.ttf"));
        touch(&second.join("static/NotoSansJP-Regular.ttf"));

        let search = FontSearch::new([&first, &second], CANDIDATE_FONTS.iter().copied());
        assert_eq!(search.resolve(), Some(first.join("ZenOldMincho-Black.ttf")));
    }

    #[test]
    fn directories_named_like_fonts_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("NotoSansJP-Regular.ttf")).unwrap();
        touch(&root.path().join("NotoSans-Regular.ttf"));

        let search = FontSearch::new([root.path()], CANDIDATE_FONTS.iter().copied());
        assert_eq!(search.resolve(), Some(root.path().join("NotoSans-Regular.ttf")));
    }

    #[test]
    fn combinations_iterate_directories_outermost() {
        let search = FontSearch::new(["a", "b"], ["x.ttf", "y.ttf"]);
        let combos: Vec<PathBuf> = search.combinations().collect();
        assert_eq!(
            combos,
            vec![
                Path::new("a").join("x.ttf"),
                Path::new("a").join("y.ttf"),
                Path::new("b").join("x.ttf"),
                Path::new("b").join("y.ttf"),
            ]
        );
    }

    #[test]
    fn platform_search_starts_with_project_directories() {
        let search = FontSearch::platform();
        let dirs = search.directories();
        let local = dirs
            .iter()
            .position(|dir| dir == Path::new("./font"))
            .unwrap();
        assert_eq!(dirs[local + 1], PathBuf::from("./fonts"));
        assert!(local <= 1);
        assert_eq!(search.candidates().len(), CANDIDATE_FONTS.len());
        assert_eq!(search.candidates()[0], PathBuf::from("static/NotoSansJP-Regular.ttf"));
    }

    #[test]
    fn font_dir_override_goes_before_project_directories() {
        let dirs = default_directories(Some(PathBuf::from("/opt/fonts")));
        assert_eq!(dirs[0], PathBuf::from("/opt/fonts"));
        assert_eq!(dirs[1], PathBuf::from("./font"));
        assert_eq!(dirs[2], PathBuf::from("./fonts"));

        let dirs = default_directories(None);
        assert_eq!(dirs[0], PathBuf::from("./font"));
    }

    #[test]
    fn replacing_directories_keeps_candidates() {
        let search = FontSearch::new(["a"], ["x.ttf"]).with_directories(["b", "c"]);
        assert_eq!(search.directories(), &[PathBuf::from("b"), PathBuf::from("c")]);
        assert_eq!(search.candidates(), &[PathBuf::from("x.ttf")]);
    }
}
