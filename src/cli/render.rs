//! Rendering of people and descendant trees for terminal display.

use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Person, TreeNode};

/// Tabular listing header, aligned with [`table_row`].
pub fn table_header() -> String {
    format!(
        "{:>4}  {:<28} {:<12} {:<12} {:<20} {:<6}",
        "ID", "Name", "Born", "Died", "Birthplace", "Gender"
    )
}

/// One aligned listing row.
pub fn table_row(person: &Person) -> String {
    format!(
        "{:>4}  {:<28} {:<12} {:<12} {:<20} {:<6}",
        person.id,
        person.name,
        person.born().unwrap_or_else(|| "-".to_string()),
        person.died().unwrap_or_else(|| "-".to_string()),
        person.birth_city.as_deref().unwrap_or("-"),
        person.gender.map(|g| g.as_str()).unwrap_or("-"),
    )
}

/// Comma-separated names with IDs, e.g. "John (1), Mary (2)".
pub fn name_list(people: &[&Person]) -> String {
    people
        .iter()
        .map(|p| format!("{} ({})", p.name, p.id))
        .join(", ")
}

/// Conversion of a descendant tree into a printable `termtree::Tree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        let mut label = self.person.to_string();
        for spouse in &self.spouses {
            label.push_str(&format!(" ⚭ {}", spouse.name));
        }
        if self.truncated {
            label.push_str(" (already shown)");
        }

        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(label).with_leaves(leaves)
    }
}
