// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Responsive image candidate lists (`srcset`).

/// One `<url> [descriptor]` entry of a `srcset` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    /// Width or density descriptor (`480w`, `2x`), empty when absent.
    pub descriptor: String,
}

impl Candidate {
    pub fn new(url: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Split a `srcset` value into candidates. Empty entries are dropped.
pub fn parse(srcset: &str) -> Vec<Candidate> {
    srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_ascii_whitespace();
            let url = parts.next()?;
            let descriptor = parts.collect::<Vec<_>>().join(" ");
            Some(Candidate::new(url, descriptor))
        })
        .collect()
}

/// Join candidates back into a `srcset` value.
pub fn join(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| {
            if c.descriptor.is_empty() {
                c.url.clone()
            } else {
                format!("{} {}", c.url, c.descriptor)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_density_descriptors() {
        assert_eq!(
            parse("a.jpg 1x, b.jpg 2x"),
            vec![Candidate::new("a.jpg", "1x"), Candidate::new("b.jpg", "2x")]
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_missing_descriptor() {
        assert_eq!(
            parse("  small.png ,\n large.png   800w ,"),
            vec![Candidate::new("small.png", ""), Candidate::new("large.png", "800w")]
        );
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_join() {
        let list = vec![
            Candidate::new("example.com/a_0.jpg", "1x"),
            Candidate::new("example.com/b_1.jpg", ""),
        ];
        assert_eq!(join(&list), "example.com/a_0.jpg 1x, example.com/b_1.jpg");
    }
}
