//! Rewrite rule construction.
//!
//! Rules are compiled once at start from the blank-mode flag and the build
//! manifest. Nothing here mutates after construction, so the set is shared
//! across request tasks behind an `Arc` without locking.

use regex::Regex;

use crate::config::{AssetConfig, RewriteConfig};
use crate::manifest::BuildManifest;

/// Local tags inserted into every proxied document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalAssetInjection {
    /// Dev-client scripts, inserted before `</head>` first.
    pub client_tags: Vec<String>,
    /// One stylesheet link per manifest style, inserted before `</head>`.
    pub style_tags: Vec<String>,
    /// One module script per manifest script, inserted before `</body>`.
    pub script_tags: Vec<String>,
}

impl LocalAssetInjection {
    pub fn from_manifest(manifest: &BuildManifest, assets: &AssetConfig) -> Self {
        let client_tags = assets
            .client_scripts
            .iter()
            .map(|src| script_tag(src))
            .collect();
        let style_tags = manifest
            .style_stems()
            .map(|stem| {
                format!(
                    r#"<link rel="stylesheet" href="{}{}.{}">"#,
                    assets.style_href_prefix, stem, assets.style_source_extension
                )
            })
            .collect();
        let script_tags = manifest
            .scripts()
            .iter()
            .map(|name| script_tag(&format!("{}{}", assets.script_src_prefix, name)))
            .collect();

        Self {
            client_tags,
            style_tags,
            script_tags,
        }
    }
}

fn script_tag(src: &str) -> String {
    format!(r#"<script type="module" src="{}"></script>"#, src)
}

/// The compiled rule set applied to every proxied document.
#[derive(Debug, Clone)]
pub struct RewriteRuleSet {
    /// Removes the platform's CDN stylesheet; present only in blank mode.
    pub(crate) cdn_strip: Option<Regex>,
    /// Removes published `<link>` tags shadowing a local style.
    pub(crate) link_strip: Option<Regex>,
    /// Removes published `<script>` elements shadowing a local script.
    pub(crate) script_strip: Option<Regex>,
    pub(crate) injection: LocalAssetInjection,
    pub(crate) head_close: Regex,
    pub(crate) body_close: Regex,
}

impl RewriteRuleSet {
    /// Compile the rules for one process lifetime.
    pub fn compile(
        blank_mode: bool,
        manifest: &BuildManifest,
        assets: &AssetConfig,
        rewrite: &RewriteConfig,
    ) -> Result<Self, regex::Error> {
        if manifest.is_empty() {
            tracing::warn!("Build manifest is empty, no local assets will be injected");
        }

        let cdn_strip = if blank_mode {
            Some(cdn_pattern(&rewrite.cdn_prefix)?)
        } else {
            None
        };
        let stems: Vec<&str> = manifest.style_stems().collect();
        let link_strip = published_link_pattern(&rewrite.published_segment, &stems)?;
        let stems: Vec<&str> = manifest.script_stems().collect();
        let script_strip = published_script_pattern(&rewrite.published_segment, &stems)?;

        Ok(Self {
            cdn_strip,
            link_strip,
            script_strip,
            injection: LocalAssetInjection::from_manifest(manifest, assets),
            head_close: Regex::new(r"(?i)</head\s*>")?,
            body_close: Regex::new(r"(?i)</body\s*>")?,
        })
    }

    /// Rules with the default asset layout and CDN/segment parameters.
    pub fn with_defaults(blank_mode: bool, manifest: &BuildManifest) -> Result<Self, regex::Error> {
        Self::compile(
            blank_mode,
            manifest,
            &AssetConfig::default(),
            &RewriteConfig::default(),
        )
    }

    pub fn blank_mode(&self) -> bool {
        self.cdn_strip.is_some()
    }

    pub fn injection(&self) -> &LocalAssetInjection {
        &self.injection
    }
}

fn cdn_pattern(cdn_prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?i)<link\b[^>]*?\shref\s*=\s*["']{}[^"']+["'][^>]*>"#,
        regex::escape(cdn_prefix)
    ))
}

/// Alternation of escaped basenames, or `None` when there is nothing to match.
fn alternation(stems: &[&str]) -> Option<String> {
    if stems.is_empty() {
        return None;
    }
    Some(
        stems
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

/// Attribute value: anything up to the segment, optional subdirectories,
/// the basename with optional `.min`, the extension, then an optional
/// query or hash before the closing quote.
fn published_url(segment: &str, names: &str, extension: &str) -> String {
    format!(
        r#"["'][^"'>]*?{}(?:[^"'>]*/)?(?:{})(?:\.min)?\.{}(?:[?#][^"'>]*)?["']"#,
        regex::escape(segment),
        names,
        extension
    )
}

fn published_link_pattern(segment: &str, stems: &[&str]) -> Result<Option<Regex>, regex::Error> {
    let Some(names) = alternation(stems) else {
        return Ok(None);
    };
    Regex::new(&format!(
        r#"(?i)<link\b[^>]*?\shref\s*=\s*{}[^>]*>"#,
        published_url(segment, &names, "css")
    ))
    .map(Some)
}

fn published_script_pattern(segment: &str, stems: &[&str]) -> Result<Option<Regex>, regex::Error> {
    let Some(names) = alternation(stems) else {
        return Ok(None);
    };
    Regex::new(&format!(
        r#"(?is)<script\b[^>]*?\ssrc\s*=\s*{}[^>]*>.*?</script\s*>"#,
        published_url(segment, &names, "js")
    ))
    .map(Some)
}
