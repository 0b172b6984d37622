// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mutable HTML document backed by scraper's tree.
//!
//! Elements are addressed by `(tag, index)`: the index-th element with that
//! name in document order. Rewriting an attribute never adds or removes
//! elements, so an index stays valid for the whole pass.

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full page with scripting disabled.
    ///
    /// `<noscript>` content is then parsed as markup, so fallback images
    /// inside it are counted and localized like any other element.
    pub fn parse(source: &str) -> Self {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let html = html5ever::parse_document(Html::new_document(), opts).one(source);
        Self { html }
    }

    fn elements(&self, tag: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(tag) {
            Ok(sel) => self.html.select(&sel).collect(),
            Err(e) => {
                warn!("invalid tag selector {tag}: {e:?}");
                Vec::new()
            }
        }
    }

    /// Number of `<tag>` elements.
    pub fn count(&self, tag: &str) -> usize {
        self.elements(tag).len()
    }

    /// Value of `attr` on every `<tag>` element, in document order.
    pub fn attr_values(&self, tag: &str, attr: &str) -> Vec<Option<String>> {
        self.elements(tag)
            .into_iter()
            .map(|el| el.value().attr(attr).map(str::to_string))
            .collect()
    }

    /// Overwrite an existing attribute on the `index`-th `<tag>` element.
    ///
    /// Returns `false` if the element or the attribute does not exist.
    pub fn set_attr(&mut self, tag: &str, index: usize, attr: &str, value: &str) -> bool {
        let Some(id) = self.elements(tag).get(index).map(|el| el.id()) else {
            return false;
        };
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };
        let Node::Element(element) = node.value() else {
            return false;
        };

        match element
            .attrs
            .iter_mut()
            .find(|(name, _)| &*name.local == attr)
        {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        self.html.html()
    }
}
