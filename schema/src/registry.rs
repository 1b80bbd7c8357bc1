//! Session-scoped store of canonical component schemas
//!
//! Components live in an append-only arena indexed by `ComponentId`. Insertion
//! is two-phase: `reserve` registers a placeholder for a type identity before
//! its schema is built, `populate` fills it in afterwards. A self-referential
//! type that reaches its own name while being built finds the placeholder and
//! links to it instead of recursing.
//!
//! Because every slot created while building a component is newer than that
//! component's placeholder, a failed build is undone by truncating the arena
//! back to a `RegistryCheckpoint`.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{ComponentId, ComponentRef, Schema};
use crate::type_descriptor::TypeName;

/// Outcome of `ComponentRegistry::reserve`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// A new placeholder was created for the identity
    Reserved(ComponentId),
    /// The identity already had a slot (possibly still a placeholder)
    Existing(ComponentId),
}

impl Reservation {
    /// The slot, regardless of whether it was just created
    pub const fn id(self) -> ComponentId {
        match self {
            Self::Reserved(id) | Self::Existing(id) => id,
        }
    }
}

/// Arena length captured before a conversion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryCheckpoint(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum ComponentSlot {
    Reserved,
    Populated(Schema),
}

#[derive(Debug, Clone)]
struct ComponentEntry {
    type_name:      TypeName,
    component_name: String,
    slot:           ComponentSlot,
}

/// Canonical schema per type identity for one conversion session
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries:         Vec<ComponentEntry>,
    by_type:         HashMap<TypeName, ComponentId>,
    component_names: HashSet<String>,
}

impl AsMut<Self> for ComponentRegistry {
    fn as_mut(&mut self) -> &mut Self { self }
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self { Self::default() }

    /// Register a placeholder for `type_name` unless it already has a slot
    pub fn reserve(&mut self, type_name: &TypeName) -> Reservation {
        if let Some(&id) = self.by_type.get(type_name) {
            return Reservation::Existing(id);
        }

        let id = ComponentId(self.entries.len());
        let component_name = self.unique_component_name(type_name);
        debug!(
            type_name = %type_name,
            component = %component_name,
            id = id.index(),
            "Reserved component slot"
        );

        self.component_names.insert(component_name.clone());
        self.by_type.insert(type_name.clone(), id);
        self.entries.push(ComponentEntry {
            type_name: type_name.clone(),
            component_name,
            slot: ComponentSlot::Reserved,
        });

        Reservation::Reserved(id)
    }

    /// Fill a reserved slot with its finished schema
    pub fn populate(&mut self, id: ComponentId, schema: Schema) -> Result<()> {
        let Some(entry) = self.entries.get_mut(id.index()) else {
            return Err(Error::RegistryConflict(format!(
                "populate called for unknown component slot {}",
                id.index()
            ))
            .into());
        };

        if matches!(entry.slot, ComponentSlot::Populated(_)) {
            return Err(Error::RegistryConflict(format!(
                "component '{}' for '{}' is already populated",
                entry.component_name, entry.type_name
            ))
            .into());
        }

        entry.slot = ComponentSlot::Populated(schema);
        Ok(())
    }

    /// Finished schema for a slot; `None` while still a placeholder
    pub fn get(&self, id: ComponentId) -> Option<&Schema> {
        match &self.entries.get(id.index())?.slot {
            ComponentSlot::Populated(schema) => Some(schema),
            ComponentSlot::Reserved => None,
        }
    }

    /// Slot registered for a type identity
    pub fn lookup(&self, type_name: &TypeName) -> Option<ComponentId> {
        self.by_type.get(type_name).copied()
    }

    /// Whether the slot exists but has not been populated yet
    pub fn is_reserved(&self, id: ComponentId) -> bool {
        self.entries
            .get(id.index())
            .is_some_and(|entry| entry.slot == ComponentSlot::Reserved)
    }

    /// Name the component is published under
    pub fn component_name(&self, id: ComponentId) -> Option<&str> {
        self.entries
            .get(id.index())
            .map(|entry| entry.component_name.as_str())
    }

    /// A `Reference` schema linking to the slot
    pub fn reference(&self, id: ComponentId) -> Option<Schema> {
        self.component_name(id).map(|name| {
            Schema::reference(ComponentRef {
                id,
                name: name.to_string(),
            })
        })
    }

    /// Capture the current arena length
    pub fn checkpoint(&self) -> RegistryCheckpoint { RegistryCheckpoint(self.entries.len()) }

    /// Discard every slot created after `checkpoint`
    pub fn rollback(&mut self, checkpoint: RegistryCheckpoint) {
        if checkpoint.0 >= self.entries.len() {
            return;
        }

        for entry in self.entries.drain(checkpoint.0..) {
            debug!(
                type_name = %entry.type_name,
                component = %entry.component_name,
                "Discarded component slot"
            );
            self.by_type.remove(&entry.type_name);
            self.component_names.remove(&entry.component_name);
        }
    }

    /// Number of slots, placeholders included
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether no slot exists
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Populated components in registration order as `(component name, schema)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.entries.iter().filter_map(|entry| match &entry.slot {
            ComponentSlot::Populated(schema) => Some((entry.component_name.as_str(), schema)),
            ComponentSlot::Reserved => None,
        })
    }

    /// Return the existing component for `type_name`, or build it with `factory`
    ///
    /// An existing slot is returned immediately, even while it is still a
    /// placeholder. Otherwise a placeholder is reserved before `factory` runs,
    /// so recursive requests for the same identity inside `factory` link to it.
    /// If `factory` produces nothing or fails, the registry is rolled back to
    /// its state before the reservation.
    ///
    /// Generic over the context so callers can hand themselves to `factory`
    /// while the registry lives inside them.
    pub fn get_or_create<C, F>(ctx: &mut C, type_name: &TypeName, factory: F) -> Result<Option<Schema>>
    where
        C: AsMut<Self> + ?Sized,
        F: FnOnce(&mut C, ComponentId) -> Result<Option<Schema>>,
    {
        let checkpoint = ctx.as_mut().checkpoint();
        let id = match ctx.as_mut().reserve(type_name) {
            Reservation::Existing(id) => return Ok(ctx.as_mut().reference(id)),
            Reservation::Reserved(id) => id,
        };

        match factory(ctx, id) {
            Ok(Some(schema)) => {
                let registry = ctx.as_mut();
                registry.populate(id, schema)?;
                Ok(registry.reference(id))
            }
            Ok(None) => {
                ctx.as_mut().rollback(checkpoint);
                Ok(None)
            }
            Err(report) => {
                ctx.as_mut().rollback(checkpoint);
                Err(report)
            }
        }
    }

    /// Short type name, suffixed with a counter when another type already uses it
    fn unique_component_name(&self, type_name: &TypeName) -> String {
        let base = type_name.short_name();
        if !self.component_names.contains(base) {
            return base.to_string();
        }

        (1..)
            .map(|suffix| format!("{base}{suffix}"))
            .find(|candidate| !self.component_names.contains(candidate))
            .unwrap_or_else(|| type_name.to_string())
    }
}
