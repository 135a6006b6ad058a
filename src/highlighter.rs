use regex::RegexBuilder;
use serde::Serialize;

use crate::glossary::Glossary;

/// A renderable piece of memo prose: either plain text or a glossary term
/// carrying its definition as hover content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fragment {
    Text {
        text: String,
    },
    Term {
        /// The matched surface form, original casing preserved.
        text: String,
        /// The registered glossary key the match belongs to.
        term: String,
        definition: String,
    },
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text { text } | Fragment::Term { text, .. } => text,
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Fragment::Term { .. })
    }
}

/// Wrap every whole-word, case-insensitive occurrence of a known glossary
/// term in an annotated fragment.
///
/// Terms are applied in glossary insertion order, and each matcher only runs
/// over the plain-text fragments produced so far — fragments annotated by an
/// earlier term are passed through untouched. When surface forms overlap,
/// the first-registered term wins.
pub fn highlight(text: &str, glossary: &Glossary) -> Vec<Fragment> {
    if text.is_empty() || glossary.is_empty() {
        return vec![Fragment::Text {
            text: text.to_string(),
        }];
    }

    let mut fragments = vec![Fragment::Text {
        text: text.to_string(),
    }];

    for (term, definition) in glossary.iter() {
        // The term is escaped so that it always matches literally.
        let pattern = format!(r"\b{}\b", regex::escape(term));
        let Ok(matcher) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            continue;
        };

        let mut next = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let Fragment::Text { text: segment } = fragment else {
                next.push(fragment);
                continue;
            };

            let mut cursor = 0;
            for found in matcher.find_iter(&segment) {
                if found.start() > cursor {
                    next.push(Fragment::Text {
                        text: segment[cursor..found.start()].to_string(),
                    });
                }
                next.push(Fragment::Term {
                    text: found.as_str().to_string(),
                    term: term.to_string(),
                    definition: definition.to_string(),
                });
                cursor = found.end();
            }
            if cursor < segment.len() {
                next.push(Fragment::Text {
                    text: segment[cursor..].to_string(),
                });
            }
        }
        fragments = next;
    }

    fragments
}
