use std::collections::HashMap;

use crate::models::GlossaryDefinition;

/// Insertion-ordered, case-insensitive term → definition cache.
///
/// Keys are normalized to lowercase. Entries are only ever added — the bulk
/// `merge` path never overwrites an existing definition, while `upsert`
/// (single-term explain) may refresh one. Iteration order is insertion
/// order, which fixes the priority of overlapping terms in the highlighter.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    order: Vec<String>,
    entries: HashMap<String, String>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.entries.get(&term.to_lowercase()).map(String::as_str)
    }

    /// Add every definition whose key is not already present, preserving the
    /// incoming order for new keys. Existing entries keep their value.
    /// Returns the number of entries actually added.
    pub fn merge(&mut self, definitions: Vec<GlossaryDefinition>) -> usize {
        let mut added = 0;
        for definition in definitions {
            let key = definition.term.to_lowercase();
            if self.entries.contains_key(&key) {
                continue;
            }
            self.order.push(key.clone());
            self.entries.insert(key, definition.definition);
            added += 1;
        }
        added
    }

    /// Set or overwrite a single entry. A refreshed key keeps its original
    /// position in the insertion order.
    pub fn upsert(&mut self, term: &str, definition: String) {
        let key = term.to_lowercase();
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, definition);
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().filter_map(|key| {
            self.entries
                .get(key)
                .map(|definition| (key.as_str(), definition.as_str()))
        })
    }

    /// Entries sorted alphabetically by term, for the glossary listing.
    pub fn sorted_entries(&self) -> Vec<GlossaryDefinition> {
        let mut entries: Vec<GlossaryDefinition> = self
            .iter()
            .map(|(term, definition)| GlossaryDefinition {
                term: term.to_string(),
                definition: definition.to_string(),
            })
            .collect();
        entries.sort_by(|a, b| a.term.cmp(&b.term));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(term: &str, text: &str) -> GlossaryDefinition {
        GlossaryDefinition {
            term: term.to_string(),
            definition: text.to_string(),
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut glossary = Glossary::new();
        glossary.upsert("Dyspareunie", "douleur lors des rapports".to_string());
        assert_eq!(
            glossary.lookup("DYSPAREUNIE"),
            Some("douleur lors des rapports")
        );
        assert_eq!(glossary.lookup("inconnu"), None);
    }

    #[test]
    fn merge_never_overwrites_existing_keys() {
        let mut glossary = Glossary::new();
        glossary.merge(vec![definition("candida", "a yeast")]);
        let added = glossary.merge(vec![
            definition("Candida", "something else"),
            definition("leucorrhées", "pertes vaginales"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(glossary.lookup("candida"), Some("a yeast"));
        assert_eq!(glossary.len(), 2);
    }

    #[test]
    fn upsert_refreshes_in_place() {
        let mut glossary = Glossary::new();
        glossary.upsert("a", "first".to_string());
        glossary.upsert("b", "second".to_string());
        glossary.upsert("A", "updated".to_string());

        assert_eq!(glossary.lookup("a"), Some("updated"));
        let order: Vec<&str> = glossary.iter().map(|(term, _)| term).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut glossary = Glossary::new();
        glossary.merge(vec![
            definition("zeta", "z"),
            definition("alpha", "a"),
        ]);
        glossary.upsert("milieu", "m".to_string());

        let order: Vec<&str> = glossary.iter().map(|(term, _)| term).collect();
        assert_eq!(order, vec!["zeta", "alpha", "milieu"]);

        let sorted: Vec<String> = glossary
            .sorted_entries()
            .into_iter()
            .map(|entry| entry.term)
            .collect();
        assert_eq!(sorted, vec!["alpha", "milieu", "zeta"]);
    }
}
