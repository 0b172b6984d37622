// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Asset classification and local naming.
//!
//! [`AssetNamer`] owns the pass-wide counter. Every name it hands out has the
//! form `stem_<n><ext>` with `n` shared by all asset kinds, so two assets
//! with the same base name never land on the same file.

use super::layout::SiteLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// The element kinds whose references get localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// `<img src>`
    Image,
    /// `<script src>`
    Script,
    /// `<link href>`
    StylesheetLink,
}

impl AssetKind {
    /// Processing order within a pass. Counter values are assigned in this order.
    pub const ALL: [AssetKind; 3] = [Self::Image, Self::Script, Self::StylesheetLink];

    /// Element name matched in the DOM.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Image => "img",
            Self::Script => "script",
            Self::StylesheetLink => "link",
        }
    }

    /// Attribute holding the asset URL.
    pub fn attr(self) -> &'static str {
        match self {
            Self::Image | Self::Script => "src",
            Self::StylesheetLink => "href",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Script => write!(f, "script"),
            Self::StylesheetLink => write!(f, "stylesheet"),
        }
    }
}

/// A reference to an asset found on the page, before it has a local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub kind: AssetKind,
    /// Attribute the URL was read from.
    pub attr: &'static str,
    /// The attribute value as written in the page.
    pub original: String,
    /// `original` resolved against the page URL.
    pub resolved: Url,
}

impl AssetReference {
    /// Resolve `raw` against the page URL.
    ///
    /// Returns `None` when the value does not resolve to an http(s) URL
    /// (`data:`, `javascript:`, malformed values).
    pub fn resolve(kind: AssetKind, page_url: &Url, raw: &str) -> Option<Self> {
        let resolved = page_url.join(raw).ok()?;
        if !matches!(resolved.scheme(), "http" | "https") {
            return None;
        }
        Some(Self {
            kind,
            attr: kind.attr(),
            original: raw.to_string(),
            resolved,
        })
    }

    /// Last path segment of the resolved URL, if it is non-empty.
    pub fn base_name(&self) -> Option<&str> {
        self.resolved
            .path_segments()?
            .last()
            .filter(|segment| !segment.is_empty())
    }
}

/// A localized asset: where it is stored and how the page refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// `stem_<n><ext>`
    pub file_name: String,
    /// Path of the downloaded file.
    pub path: PathBuf,
    /// `<host>/<file_name>`, written back into the DOM.
    pub local_ref: String,
}

/// How script extensions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptNaming {
    /// Scripts follow the same rule as every other asset.
    KeepExtension,
    /// Every script is stored as `.js`, extension or not.
    ForceJs,
}

/// Hands out collision-free local names for one mirroring pass.
#[derive(Debug)]
pub struct AssetNamer {
    counter: u32,
    script_naming: ScriptNaming,
}

impl AssetNamer {
    pub fn new(script_naming: ScriptNaming) -> Self {
        Self {
            counter: 0,
            script_naming,
        }
    }

    /// The value the next assigned name will carry.
    pub fn next_index(&self) -> u32 {
        self.counter
    }

    /// Assign a local name to `reference`, or `None` if it is not a file.
    ///
    /// The counter only advances when a name is returned.
    pub fn assign(&mut self, reference: &AssetReference, layout: &SiteLayout) -> Option<AssetRecord> {
        let base = reference.base_name()?;
        let (stem, ext) = split_extension(base);

        let ext = match (reference.kind, self.script_naming) {
            (AssetKind::Script, ScriptNaming::ForceJs) => ".js",
            _ if ext.is_empty() => return None,
            _ => ext,
        };

        let file_name = format!(
            "{}_{}{}",
            sanitize_component(stem),
            self.counter,
            sanitize_component(ext)
        );
        self.counter += 1;

        Some(AssetRecord {
            path: layout.asset_path(&file_name),
            local_ref: layout.local_ref(&file_name),
            file_name,
        })
    }
}

/// Split a file name into stem and extension.
///
/// The extension starts at the last `.`, unless that dot belongs to a run of
/// leading dots: `.htaccess` has no extension, `jquery.min.js` splits into
/// `jquery.min` and `.js`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}

/// Replace characters that are unsafe in file names or relative URLs.
pub(crate) fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' | '#' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}
