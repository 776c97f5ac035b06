use std::collections::BTreeSet;

use serde::Serialize;

use cifstack_core::LayerStack;

use crate::cif::contact_family;

/// Layer names a layout refers to, found by scanning its raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerInventory {
    /// Names from `L <name>;` declarations, in order of first appearance.
    pub declared_layers: Vec<String>,
    /// Contact families from `4N <token>`, digits removed.
    pub contact_families: BTreeSet<String>,
}

impl LayerInventory {
    pub fn scan(text: &str) -> Self {
        let mut inventory = Self::default();

        for (idx, _) in text.match_indices("L ") {
            let rest = &text[idx + 2..];
            let word_len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            if word_len == 0 || !rest[word_len..].starts_with(';') {
                continue;
            }
            let name = &rest[..word_len];
            if !inventory.declared_layers.iter().any(|l| l == name) {
                inventory.declared_layers.push(name.to_string());
            }
        }

        for (idx, _) in text.match_indices("4N ") {
            let rest = &text[idx + 3..];
            let token_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let family = contact_family(&rest[..token_len]);
            if !family.is_empty() {
                inventory.contact_families.insert(family);
            }
        }

        log::info!(
            "Inventory: {} declared layers, {} contact families",
            inventory.declared_layers.len(),
            inventory.contact_families.len()
        );
        inventory
    }

    /// Names found in the layout that `layers` does not know, declared layers
    /// first.
    pub fn unregistered(&self, layers: &LayerStack) -> Vec<&str> {
        self.declared_layers
            .iter()
            .chain(self.contact_families.iter())
            .map(String::as_str)
            .filter(|name| !layers.contains(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "\
DS 1 1 1;
L NA;
P 0 0 10 0 10 10;
L M1;
4N C1 5 5;
L NA;
4N TN12 1 1;
4N C2 7 7;
L POLY;
DF;
";

    #[test]
    fn test_declared_layers_in_first_seen_order() {
        let inv = LayerInventory::scan(LAYOUT);
        assert_eq!(inv.declared_layers, vec!["NA", "M1", "POLY"]);
    }

    #[test]
    fn test_contact_families_sorted_and_unique() {
        let inv = LayerInventory::scan(LAYOUT);
        let families: Vec<&str> = inv.contact_families.iter().map(String::as_str).collect();
        assert_eq!(families, vec!["C", "TN"]);
    }

    #[test]
    fn test_declaration_needs_terminator() {
        let inv = LayerInventory::scan("L M1\nL M2 ;\nL M3;");
        assert_eq!(inv.declared_layers, vec!["M3"]);
    }

    #[test]
    fn test_unregistered_names() {
        let inv = LayerInventory::scan(LAYOUT);
        let stack = LayerStack::cif_default();
        assert_eq!(inv.unregistered(&stack), vec!["POLY"]);
    }
}
