//! Local build manifest.
//!
//! The manifest is the list of output basenames the local toolchain serves:
//! style outputs (`main.css`) and script outputs (`app.js`). It is computed
//! once at start and drives both tag injection and the strip patterns.

use std::fs;
use std::io;
use std::path::Path;

/// Ordered sets of local output basenames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildManifest {
    styles: Vec<String>,
    scripts: Vec<String>,
}

impl BuildManifest {
    /// Build a manifest from basenames supplied by an external collaborator.
    ///
    /// Style names must end in `.css`, script names in `.js`; anything else is
    /// ignored. Duplicates are dropped, first occurrence wins.
    pub fn new<S, J>(styles: S, scripts: J) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            styles: dedup(styles.into_iter().map(Into::into).filter(|s| s.ends_with(".css"))),
            scripts: dedup(scripts.into_iter().map(Into::into).filter(|s| s.ends_with(".js"))),
        }
    }

    /// Discover entries from the source tree.
    ///
    /// Every `*.scss` in `styles_dir` becomes `<stem>.css`, every `*.js` in
    /// `scripts_dir` is kept as is. Partials (leading `_`) are skipped and a
    /// missing directory contributes nothing.
    pub fn discover(styles_dir: &Path, scripts_dir: &Path) -> io::Result<Self> {
        let styles = entries_with_extension(styles_dir, "scss")?
            .into_iter()
            .map(|f| format!("{}.css", &f[..f.len() - ".scss".len()]));
        let scripts = entries_with_extension(scripts_dir, "js")?;
        Ok(Self::new(styles, scripts))
    }

    /// Style output basenames, e.g. `main.css`.
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Script output basenames, e.g. `app.js`.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Style basenames without the `.css` extension.
    pub fn style_stems(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.trim_end_matches(".css"))
    }

    /// Script basenames without the `.js` extension.
    pub fn script_stems(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(|s| s.trim_end_matches(".js"))
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.scripts.is_empty()
    }
}

fn dedup(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn entries_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<String>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "Source directory missing, no entries");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let suffix = format!(".{}", extension);
    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(&suffix) && name.len() > suffix.len() && !name.starts_with('_') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
