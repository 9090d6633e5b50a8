//! Static method-dependency scanning.
//!
//! Infers behavioral "calls" dependencies by lexically scanning method source
//! text for mentions of sibling class names. Matching is whole-word,
//! case-sensitive, and textual, so it stays a heuristic: aliased or
//! dynamically-built names are missed, and only the word boundary guards
//! against coincidental substrings. The scanner sits behind a trait so the
//! heuristic can be swapped out or disabled without touching the classifier.

use log::warn;

use armature_core::model::{Edge, Multiplicity, Relation, RelationshipType};

use crate::{registry::PointerRegistry, schema::ClassSchema};

/// A source of behavioral dependency edges for one class.
pub trait DependencyScanner {
    /// Scans one class against the full candidate set and returns its
    /// "calls" dependency edges. Implementations must never emit an edge
    /// from a class to itself and at most one edge per target.
    fn scan(
        &self,
        class: &ClassSchema,
        candidates: &[&ClassSchema],
        registry: &PointerRegistry,
    ) -> Vec<Edge>;
}

/// Whole-word lexical scanner over method bodies.
#[derive(Debug, Default)]
pub struct LexicalScanner;

impl LexicalScanner {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyScanner for LexicalScanner {
    fn scan(
        &self,
        class: &ClassSchema,
        candidates: &[&ClassSchema],
        registry: &PointerRegistry,
    ) -> Vec<Edge> {
        let Some(source_ptr) = registry.class_ptr(&class.name) else {
            warn!(class = class.name; "Class missing from registry, skipping dependency scan");
            return Vec::new();
        };

        // If any method body is unavailable the whole class is skipped for
        // scanning; the rest of the pipeline still processes it.
        if class.methods.iter().any(|method| method.body.is_none()) {
            warn!(class = class.name; "Method source unavailable, skipping dependency scan");
            return Vec::new();
        }

        let mut edges = Vec::new();
        let mut satisfied: Vec<&str> = Vec::new();

        for method in &class.methods {
            let body = method.body.as_deref().unwrap_or_default();
            for candidate in candidates {
                if candidate.name == class.name || satisfied.contains(&candidate.name.as_str()) {
                    continue;
                }
                if !contains_word(body, &candidate.name) {
                    continue;
                }
                let Some(target_ptr) = registry.class_ptr(&candidate.name) else {
                    continue;
                };
                edges.push(Edge::new(
                    Relation::new(
                        RelationshipType::Dependency,
                        "calls",
                        Multiplicity::ONE_TO_ONE,
                    ),
                    source_ptr,
                    target_ptr,
                ));
                satisfied.push(&candidate.name);
            }
        }

        edges
    }
}

/// True when `word` occurs in `haystack` as a standalone token, i.e. not
/// flanked by identifier characters.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    for (index, _) in haystack.match_indices(word) {
        let before = haystack[..index].chars().next_back();
        let after = haystack[index + word.len()..].chars().next();
        if before.is_none_or(|c| !is_identifier_char(c)) && after.is_none_or(|c| !is_identifier_char(c))
        {
            return true;
        }
    }
    false
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
