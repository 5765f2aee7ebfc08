//! Relationship graph: entity storage, edge maintenance, derived queries.
//!
//! People are stored in a map keyed by their persistent ID; all cross-entity
//! references are ID values, never direct pointers, so entities can be
//! removed and their edges scrubbed at runtime.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use itertools::Itertools;
use tracing::instrument;

use crate::domain::entities::{Person, PersonDraft, PersonId, PersonUpdate};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::validate;

/// A person's resolved relationships, as returned by [`FamilyTree::details`].
///
/// Edge lists are resolved to live entities; IDs that no longer resolve are
/// dropped silently.
#[derive(Debug)]
pub struct PersonDetails<'a> {
    pub person: &'a Person,
    pub parents: Vec<&'a Person>,
    pub spouses: Vec<&'a Person>,
    pub children: Vec<&'a Person>,
    pub siblings: Vec<&'a Person>,
}

/// Node of the descendant tree built by [`FamilyTree::build_tree`].
///
/// A person already expanded elsewhere in the same traversal reappears as a
/// leaf with `truncated` set and nothing populated, which is what breaks
/// infinite recursion on cyclic edge data.
#[derive(Debug)]
pub struct TreeNode<'a> {
    pub person: &'a Person,
    pub spouses: Vec<&'a Person>,
    pub children: Vec<TreeNode<'a>>,
    pub truncated: bool,
}

/// Manages the collection of people and their relationships.
#[derive(Debug)]
pub struct FamilyTree {
    people: BTreeMap<PersonId, Person>,
    next_id: PersonId,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            people: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a tree from persisted parts. Used by the storage layer.
    pub fn from_parts(next_id: PersonId, people: Vec<Person>) -> Self {
        Self {
            people: people.into_iter().map(|p| (p.id, p)).collect(),
            next_id,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn next_id(&self) -> PersonId {
        self.next_id
    }

    /// All people in storage order (ascending ID).
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Validate all fields, assign the next ID and store the person.
    /// Nothing is stored when any field fails validation.
    #[instrument(level = "debug", skip(self))]
    pub fn create_person(&mut self, draft: PersonDraft) -> DomainResult<&Person> {
        let id = self.next_id;
        let person = build_person(id, &draft)?;
        self.people.insert(id, person);
        self.next_id += 1;
        Ok(&self.people[&id])
    }

    /// Update the supplied fields, validating each independently before
    /// assignment. Passing an empty string clears date/gender/city fields.
    #[instrument(level = "debug", skip(self))]
    pub fn update_person(&mut self, id: PersonId, update: PersonUpdate) -> DomainResult<&Person> {
        let person = self
            .people
            .get_mut(&id)
            .ok_or(DomainError::PersonNotFound { role: "Person", id })?;

        if let Some(name) = update.name.as_deref() {
            person.name = validate::validate_name(name)?;
        }
        if let Some(year) = update.birth_year {
            person.birth_year = validate::validate_year(Some(year), "birth_year")?;
        }
        if let Some(raw) = update.birth_date.as_deref() {
            person.birth_date = validate::validate_date(Some(raw), "birth_date")?;
        }
        if let Some(year) = update.death_year {
            person.death_year = validate::validate_death_year(Some(year), person.birth_year)?;
        }
        if let Some(raw) = update.death_date.as_deref() {
            person.death_date = validate::validate_death_date(
                Some(raw),
                person.birth_date,
                person.birth_year,
                "death_date",
            )?;
        }
        if let Some(raw) = update.gender.as_deref() {
            person.gender = validate::validate_gender(Some(raw))?;
        }
        if let Some(raw) = update.birth_city.as_deref() {
            person.birth_city = validate::validate_city(Some(raw))?;
        }

        Ok(&*person)
    }

    pub fn get_person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Case-insensitive substring search, in storage order.
    pub fn find_by_name(&self, query: &str) -> Vec<&Person> {
        let needle = query.to_lowercase();
        self.people
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Add a mirrored parent-child edge. Idempotent.
    #[instrument(level = "debug", skip(self))]
    pub fn link_parent_child(
        &mut self,
        parent_id: PersonId,
        child_id: PersonId,
    ) -> DomainResult<(&Person, &Person)> {
        if parent_id == child_id {
            return Err(DomainError::SelfRelationship {
                relationship: "parent-child",
            });
        }
        self.require(parent_id, "Parent")?;
        self.require(child_id, "Child")?;

        if let Some(parent) = self.people.get_mut(&parent_id) {
            push_unique(&mut parent.child_ids, child_id);
        }
        if let Some(child) = self.people.get_mut(&child_id) {
            push_unique(&mut child.parent_ids, parent_id);
        }

        Ok((&self.people[&parent_id], &self.people[&child_id]))
    }

    /// Add a symmetric spouse edge. Idempotent.
    #[instrument(level = "debug", skip(self))]
    pub fn link_spouse(
        &mut self,
        person1_id: PersonId,
        person2_id: PersonId,
    ) -> DomainResult<(&Person, &Person)> {
        if person1_id == person2_id {
            return Err(DomainError::SelfRelationship {
                relationship: "spouse",
            });
        }
        self.require(person1_id, "First person")?;
        self.require(person2_id, "Second person")?;

        if let Some(person1) = self.people.get_mut(&person1_id) {
            push_unique(&mut person1.spouse_ids, person2_id);
        }
        if let Some(person2) = self.people.get_mut(&person2_id) {
            push_unique(&mut person2.spouse_ids, person1_id);
        }

        Ok((&self.people[&person1_id], &self.people[&person2_id]))
    }

    /// Remove a person, scrubbing their ID from every other entity's edge
    /// lists first. Returns the detached entity.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_person(&mut self, id: PersonId) -> DomainResult<Person> {
        if !self.people.contains_key(&id) {
            return Err(DomainError::PersonNotFound { role: "Person", id });
        }

        for other in self.people.values_mut() {
            other.parent_ids.retain(|&pid| pid != id);
            other.child_ids.retain(|&cid| cid != id);
            other.spouse_ids.retain(|&sid| sid != id);
        }

        self.people
            .remove(&id)
            .ok_or(DomainError::PersonNotFound { role: "Person", id })
    }

    /// All people sorted by name; equal names keep storage order.
    pub fn all_sorted_by_name(&self) -> Vec<&Person> {
        self.people
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect()
    }

    /// Resolve a person's relationships, including derived siblings.
    pub fn details(&self, id: PersonId) -> DomainResult<PersonDetails<'_>> {
        let person = self.require(id, "Person")?;
        Ok(PersonDetails {
            person,
            parents: self.resolve(&person.parent_ids),
            spouses: self.resolve(&person.spouse_ids),
            children: self.resolve(&person.child_ids),
            siblings: self.siblings(person),
        })
    }

    /// Build the descendant forest for display.
    ///
    /// With `root_id` the forest contains just that subtree; otherwise every
    /// parentless person is a root. When nobody is parentless (cyclic or
    /// dangling-parent data) the first person in storage order becomes the
    /// sole root so the graph is still reachable.
    #[instrument(level = "debug", skip(self))]
    pub fn build_tree(&self, root_id: Option<PersonId>) -> DomainResult<Vec<TreeNode<'_>>> {
        if self.people.is_empty() {
            return Ok(Vec::new());
        }

        let roots: Vec<&Person> = match root_id {
            Some(id) => vec![self.require(id, "Person")?],
            None => {
                let parentless: Vec<&Person> = self
                    .people
                    .values()
                    .filter(|p| p.parent_ids.is_empty())
                    .collect();
                if parentless.is_empty() {
                    self.people.values().take(1).collect()
                } else {
                    parentless
                }
            }
        };

        // One visited set spans all roots: a person reachable from two
        // subtrees is expanded exactly once and truncated afterwards.
        let mut visited = HashSet::new();
        Ok(roots
            .into_iter()
            .map(|root| self.descend(root, &mut visited))
            .collect())
    }

    fn descend<'a>(&'a self, person: &'a Person, visited: &mut HashSet<PersonId>) -> TreeNode<'a> {
        if !visited.insert(person.id) {
            return TreeNode {
                person,
                spouses: Vec::new(),
                children: Vec::new(),
                truncated: true,
            };
        }

        let spouses = self.resolve(&person.spouse_ids);
        let children = person
            .child_ids
            .iter()
            .filter_map(|cid| self.people.get(cid))
            .map(|child| self.descend(child, visited))
            .collect();

        TreeNode {
            person,
            spouses,
            children,
            truncated: false,
        }
    }

    fn require(&self, id: PersonId, role: &'static str) -> DomainResult<&Person> {
        self.people
            .get(&id)
            .ok_or(DomainError::PersonNotFound { role, id })
    }

    fn resolve(&self, ids: &[PersonId]) -> Vec<&Person> {
        ids.iter().filter_map(|id| self.people.get(id)).collect()
    }

    /// Union of all parents' other children, deduplicated.
    fn siblings(&self, person: &Person) -> Vec<&Person> {
        let mut sibling_ids: BTreeSet<PersonId> = BTreeSet::new();
        for parent in person.parent_ids.iter().filter_map(|pid| self.people.get(pid)) {
            sibling_ids.extend(parent.child_ids.iter().copied().filter(|&cid| cid != person.id));
        }
        sibling_ids
            .iter()
            .filter_map(|sid| self.people.get(sid))
            .collect()
    }
}

fn build_person(id: PersonId, draft: &PersonDraft) -> DomainResult<Person> {
    let name = validate::validate_name(&draft.name)?;
    let birth_year = validate::validate_year(draft.birth_year, "birth_year")?;
    let birth_date = validate::validate_date(draft.birth_date.as_deref(), "birth_date")?;
    let death_year = validate::validate_death_year(draft.death_year, birth_year)?;
    let death_date = validate::validate_death_date(
        draft.death_date.as_deref(),
        birth_date,
        birth_year,
        "death_date",
    )?;
    let gender = validate::validate_gender(draft.gender.as_deref())?;
    let birth_city = validate::validate_city(draft.birth_city.as_deref())?;

    Ok(Person {
        id,
        name,
        birth_year,
        death_year,
        gender,
        birth_date,
        death_date,
        birth_city,
        parent_ids: Vec::new(),
        spouse_ids: Vec::new(),
        child_ids: Vec::new(),
    })
}

/// Idempotent edge insertion.
fn push_unique(list: &mut Vec<PersonId>, id: PersonId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
