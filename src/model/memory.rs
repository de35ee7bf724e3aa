//! In-memory model: an arena of objects typed by class name, linked by the
//! relations of a small schema.
//!
//! Containment is exclusive: an object has at most one container, and
//! containing it elsewhere detaches it first. A non-containment relation
//! paired with a containment via [`MemoryModel::set_inverse`] is derived
//! from the containment and cannot be written directly.

use crate::error::{ModelPathError, Result};
use crate::graph::traversal::{ModelProvider, RelationInfo, RelationValue};
use crate::bail_invalid;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static NEXT_SCHEMA: AtomicU32 = AtomicU32::new(0);

/// Handle of an object in a [`MemoryModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a relation in a [`MemoryModel`]'s schema.
///
/// Compared by owning schema and slot; displays as the relation name.
/// A handle is only accepted by the model that created it (and its clones).
#[derive(Clone)]
pub struct Relation {
    schema: u32,
    slot: u32,
    name: Arc<str>,
}

impl Relation {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.slot == other.slot
    }
}

impl Eq for Relation {}

impl std::hash::Hash for Relation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.schema.hash(state);
        self.slot.hash(state);
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Relation({})", self.name)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Schema entry for one relation
#[derive(Debug, Clone)]
pub struct RelationDef {
    pub name: Arc<str>,
    pub containment: bool,
    pub many: bool,
    inverse: Option<u32>,
    /// Class the relation applies to; `None` applies to every class
    owner: Option<String>,
}

impl RelationDef {
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    fn applies_to(&self, class: &str) -> bool {
        self.owner.as_deref().is_none_or(|owner| owner == class)
    }
}

#[derive(Debug, Clone)]
struct Schema {
    id: u32,
    relations: Vec<RelationDef>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            id: NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed),
            relations: Vec::new(),
        }
    }
}

impl Schema {
    /// Slot of a handle issued by this schema under the same name
    fn slot_of(&self, relation: &Relation) -> Result<usize> {
        let slot = relation.slot as usize;
        let owned = relation.schema == self.id
            && self
                .relations
                .get(slot)
                .is_some_and(|def| def.name == relation.name);
        if !owned {
            return Err(ModelPathError::unknown_relation(relation));
        }
        Ok(slot)
    }

    fn def(&self, relation: &Relation) -> Result<&RelationDef> {
        let slot = self.slot_of(relation)?;
        Ok(&self.relations[slot])
    }

    fn def_mut(&mut self, relation: &Relation) -> Result<&mut RelationDef> {
        let slot = self.slot_of(relation)?;
        Ok(&mut self.relations[slot])
    }

    fn handle(&self, slot: u32) -> Relation {
        Relation {
            schema: self.id,
            slot,
            name: Arc::clone(&self.relations[slot as usize].name),
        }
    }

    /// Non-containment relation whose inverse is a containment
    fn is_container_ref(&self, def: &RelationDef) -> bool {
        !def.containment
            && def
                .inverse
                .and_then(|slot| self.relations.get(slot as usize))
                .is_some_and(|inverse| inverse.containment)
    }
}

#[derive(Debug, Clone)]
struct ObjectData {
    class: String,
    /// Container and the containment slot holding this object
    container: Option<(ObjectId, u32)>,
    values: HashMap<u32, Vec<ObjectId>>,
}

/// Arena-backed model implementing [`ModelProvider`]
#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    schema: Schema,
    objects: Vec<ObjectData>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation to the schema. Names are unique.
    pub fn define_relation(
        &mut self,
        name: &str,
        containment: bool,
        many: bool,
    ) -> Result<Relation> {
        if name.is_empty() {
            bail_invalid!("relation name", "(empty)");
        }
        if self.relation_by_name(name).is_some() {
            bail_invalid!("relation name", format!("{} is already defined", name));
        }
        let slot = self.schema.relations.len() as u32;
        self.schema.relations.push(RelationDef {
            name: Arc::from(name),
            containment,
            many,
            inverse: None,
            owner: None,
        });
        Ok(self.schema.handle(slot))
    }

    /// Declare `a` and `b` as each other's inverse.
    ///
    /// When one side is a containment, the other must be a single-valued
    /// non-containment relation: it then reads as the object's container.
    pub fn set_inverse(&mut self, a: &Relation, b: &Relation) -> Result<()> {
        let def_a = self.schema.def(a)?;
        let def_b = self.schema.def(b)?;
        if def_a.containment && def_b.containment {
            bail_invalid!(
                "inverse",
                format!("{} and {} are both containments", a, b)
            );
        }
        for (containment, opposite) in [(def_a, def_b), (def_b, def_a)] {
            if containment.containment && opposite.many {
                bail_invalid!(
                    "inverse",
                    format!(
                        "container relation {} of {} must be single-valued",
                        opposite.name, containment.name
                    )
                );
            }
        }

        // Re-pairing releases the previous partners of both sides.
        let previous = [def_a.inverse, def_b.inverse];
        for slot in previous.into_iter().flatten() {
            if let Some(partner) = self.schema.relations.get_mut(slot as usize) {
                partner.inverse = None;
            }
        }
        self.schema.def_mut(a)?.inverse = Some(b.slot);
        self.schema.def_mut(b)?.inverse = Some(a.slot);
        Ok(())
    }

    /// Limit a relation to objects of one class
    pub fn restrict_relation(&mut self, relation: &Relation, class: &str) -> Result<()> {
        self.schema.def_mut(relation)?.owner = Some(class.to_string());
        Ok(())
    }

    pub fn relation_by_name(&self, name: &str) -> Option<Relation> {
        self.schema
            .relations
            .iter()
            .position(|def| &*def.name == name)
            .map(|slot| self.schema.handle(slot as u32))
    }

    pub fn relation_def(&self, relation: &Relation) -> Result<&RelationDef> {
        self.schema.def(relation)
    }

    pub fn create_object(&mut self, class: impl Into<String>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(ObjectData {
            class: class.into(),
            container: None,
            values: HashMap::new(),
        });
        id
    }

    pub fn class_of(&self, id: ObjectId) -> Result<&str> {
        Ok(&self.object(id)?.class)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Set (or clear) a single-valued relation
    pub fn set_single(
        &mut self,
        id: ObjectId,
        relation: &Relation,
        target: Option<ObjectId>,
    ) -> Result<()> {
        let def = self.writable_def(id, relation)?;
        if def.many {
            bail_invalid!(
                "single value",
                format!("{} is multi-valued", relation)
            );
        }
        let containment = def.containment;
        if let Some(target) = target {
            self.object(target)?;
        }

        if containment {
            if let Some(child) = target {
                self.check_containable(id, child)?;
            }
            let previous = self.object(id)?.values.get(&relation.slot).cloned();
            for child in previous.into_iter().flatten() {
                self.detach(child);
            }
            if let Some(child) = target {
                return self.contain(id, relation, child);
            }
        }

        let data = self.object_mut(id)?;
        match target {
            Some(target) => {
                data.values.insert(relation.slot, vec![target]);
            }
            None => {
                data.values.remove(&relation.slot);
            }
        }
        Ok(())
    }

    /// Append to a multi-valued relation
    pub fn add_to(&mut self, id: ObjectId, relation: &Relation, target: ObjectId) -> Result<()> {
        let def = self.writable_def(id, relation)?;
        if !def.many {
            bail_invalid!(
                "list value",
                format!("{} is single-valued", relation)
            );
        }
        if def.containment {
            return self.contain(id, relation, target);
        }
        self.object(target)?;
        self.object_mut(id)?
            .values
            .entry(relation.slot)
            .or_default()
            .push(target);
        Ok(())
    }

    /// Remove the first occurrence of `target`. Returns whether it was present.
    pub fn remove_from(
        &mut self,
        id: ObjectId,
        relation: &Relation,
        target: ObjectId,
    ) -> Result<bool> {
        let containment = self.writable_def(id, relation)?.containment;
        let Some(values) = self.object_mut(id)?.values.get_mut(&relation.slot) else {
            return Ok(false);
        };
        let Some(position) = values.iter().position(|n| *n == target) else {
            return Ok(false);
        };
        values.remove(position);
        if containment {
            self.object_mut(target)?.container = None;
        }
        Ok(true)
    }

    /// Make `child` a direct content of `parent` through `relation`,
    /// detaching it from any previous container.
    pub fn contain(&mut self, parent: ObjectId, relation: &Relation, child: ObjectId) -> Result<()> {
        let def = self.writable_def(parent, relation)?;
        if !def.containment {
            bail_invalid!(
                "containment",
                format!("{} is not a containment relation", relation)
            );
        }
        let many = def.many;
        self.check_containable(parent, child)?;

        self.detach(child);
        if !many {
            let previous = self.object(parent)?.values.get(&relation.slot).cloned();
            for occupant in previous.into_iter().flatten() {
                self.detach(occupant);
            }
        }
        self.object_mut(parent)?
            .values
            .entry(relation.slot)
            .or_default()
            .push(child);
        self.object_mut(child)?.container = Some((parent, relation.slot));
        Ok(())
    }

    fn object(&self, id: ObjectId) -> Result<&ObjectData> {
        self.objects
            .get(id.0 as usize)
            .ok_or_else(|| ModelPathError::unknown_object(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData> {
        self.objects
            .get_mut(id.0 as usize)
            .ok_or_else(|| ModelPathError::unknown_object(id))
    }

    /// Definition of a relation that applies to `id`
    fn applicable_def(&self, id: ObjectId, relation: &Relation) -> Result<&RelationDef> {
        let class = &self.object(id)?.class;
        let def = self.schema.def(relation)?;
        if !def.applies_to(class) {
            return Err(ModelPathError::not_applicable(relation, id));
        }
        Ok(def)
    }

    fn writable_def(&self, id: ObjectId, relation: &Relation) -> Result<&RelationDef> {
        let def = self.applicable_def(id, relation)?;
        if self.schema.is_container_ref(def) {
            bail_invalid!(
                "write",
                format!("{} is derived from its containment", relation)
            );
        }
        Ok(def)
    }

    /// `child` exists and is not `parent` or one of its containers
    fn check_containable(&self, parent: ObjectId, child: ObjectId) -> Result<()> {
        self.object(child)?;
        if self.is_ancestor_or_self(child, parent) {
            bail_invalid!(
                "containment",
                format!("{} cannot contain its own container {}", parent, child)
            );
        }
        Ok(())
    }

    fn detach(&mut self, child: ObjectId) {
        let Some(data) = self.objects.get_mut(child.0 as usize) else {
            return;
        };
        let Some((parent, slot)) = data.container.take() else {
            return;
        };
        if let Some(values) = self
            .objects
            .get_mut(parent.0 as usize)
            .and_then(|p| p.values.get_mut(&slot))
        {
            values.retain(|n| *n != child);
        }
    }

    fn is_ancestor_or_self(&self, candidate: ObjectId, of: ObjectId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self
                .objects
                .get(id.0 as usize)
                .and_then(|data| data.container)
                .map(|(parent, _)| parent);
        }
        false
    }
}

impl ModelProvider for MemoryModel {
    type Node = ObjectId;
    type Relation = Relation;

    fn outgoing_relations(&self, node: &ObjectId) -> Result<Vec<RelationInfo<Relation>>> {
        let class = &self.object(*node)?.class;
        Ok(self
            .schema
            .relations
            .iter()
            .enumerate()
            .filter(|(_, def)| def.applies_to(class))
            .map(|(slot, def)| RelationInfo {
                relation: self.schema.handle(slot as u32),
                many: def.many,
                containment: def.containment,
                container: self.schema.is_container_ref(def),
            })
            .collect())
    }

    fn relation_value(
        &self,
        node: &ObjectId,
        relation: &Relation,
    ) -> Result<RelationValue<ObjectId>> {
        let def = self.applicable_def(*node, relation)?;
        let data = self.object(*node)?;

        if self.schema.is_container_ref(def) {
            let container = data
                .container
                .filter(|(_, slot)| Some(*slot) == def.inverse)
                .map(|(parent, _)| parent);
            return Ok(RelationValue::Single(container));
        }

        let values = data.values.get(&relation.slot);
        if def.many {
            Ok(RelationValue::Many(values.cloned().unwrap_or_default()))
        } else {
            Ok(RelationValue::Single(
                values.and_then(|v| v.first().copied()),
            ))
        }
    }

    fn container_of(&self, node: &ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.object(*node)?.container.map(|(parent, _)| parent))
    }

    fn containment_relation_of(&self, node: &ObjectId) -> Result<Option<Relation>> {
        Ok(self
            .object(*node)?
            .container
            .map(|(_, slot)| self.schema.handle(slot)))
    }

    fn inverse_of(&self, relation: &Relation) -> Result<Option<Relation>> {
        Ok(self
            .schema
            .def(relation)?
            .inverse
            .map(|slot| self.schema.handle(slot)))
    }

    fn all_nodes_of(&self, root: &ObjectId) -> Result<Vec<ObjectId>> {
        let mut nodes = Vec::new();
        let mut stack = vec![*root];
        while let Some(id) = stack.pop() {
            let data = self.object(id)?;
            nodes.push(id);
            let mut children: Vec<ObjectId> = self
                .schema
                .relations
                .iter()
                .enumerate()
                .filter(|(_, def)| def.containment)
                .filter_map(|(slot, _)| data.values.get(&(slot as u32)))
                .flatten()
                .copied()
                .collect();
            // Pre-order: first child is expanded first.
            children.reverse();
            stack.extend(children);
        }
        Ok(nodes)
    }
}
