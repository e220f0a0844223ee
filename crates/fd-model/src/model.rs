//! Core composition data structures.

use fd_core::{AdapterId, CompId, InputId, OutputId};

/// Upstream end of a wire, as seen from a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSource {
    /// A component's output slot.
    Output(OutputId),
    /// An adapter (possibly the tail of a longer chain).
    Adapter(AdapterId),
}

/// Downstream end of a wire, as seen from a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotTarget {
    /// A component's input slot.
    Input(InputId),
    /// An adapter (possibly the head of a longer chain).
    Adapter(AdapterId),
}

/// A named input slot owned by a component.
///
/// An input has at most one upstream source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot {
    pub id: InputId,
    pub name: String,
    pub comp: CompId,
    pub source: Option<SlotSource>,
}

/// A named output slot owned by a component.
///
/// An output may fan out to any number of downstream targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSlot {
    pub id: OutputId,
    pub name: String,
    pub comp: CompId,
    pub targets: Vec<SlotTarget>,
}

/// A processing component with ordered named input and output slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    /// Input slot IDs in declaration order.
    pub inputs: Vec<InputId>,
    /// Output slot IDs in declaration order.
    pub outputs: Vec<OutputId>,
}

/// A single-input/single-output transform inserted between two slots.
///
/// Graph code treats adapters as unlabeled pass-through nodes; the name
/// exists only for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    pub id: AdapterId,
    pub name: String,
    pub source: Option<SlotSource>,
    pub targets: Vec<SlotTarget>,
}

/// The composition: a validated, immutable collection of components,
/// adapters, and slot wiring.
///
/// Slots live in flat arenas indexed by their IDs; components reference
/// their slots by ID so that slot identity (not slot name) drives wiring
/// resolution downstream.
#[derive(Debug, Clone)]
pub struct Composition {
    pub(crate) components: Vec<Component>,
    pub(crate) adapters: Vec<Adapter>,
    pub(crate) inputs: Vec<InputSlot>,
    pub(crate) outputs: Vec<OutputSlot>,
}

impl Composition {
    /// Return all components in declaration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Return all adapters in declaration order.
    pub fn adapters(&self) -> &[Adapter] {
        &self.adapters
    }

    /// Return all input slots.
    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    /// Return all output slots.
    pub fn outputs(&self) -> &[OutputSlot] {
        &self.outputs
    }

    /// Get a component by ID (returns None if ID out of bounds).
    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.index() as usize)
    }

    /// Get an adapter by ID (returns None if ID out of bounds).
    pub fn adapter(&self, id: AdapterId) -> Option<&Adapter> {
        self.adapters.get(id.index() as usize)
    }

    /// Get an input slot by ID (returns None if ID out of bounds).
    pub fn input(&self, id: InputId) -> Option<&InputSlot> {
        self.inputs.get(id.index() as usize)
    }

    /// Get an output slot by ID (returns None if ID out of bounds).
    pub fn output(&self, id: OutputId) -> Option<&OutputSlot> {
        self.outputs.get(id.index() as usize)
    }

    /// Iterate a component's input slots in declaration order.
    pub fn comp_inputs(&self, id: CompId) -> impl Iterator<Item = &InputSlot> {
        self.component(id)
            .map(|c| c.inputs.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.inputs[i.index() as usize])
    }

    /// Iterate a component's output slots in declaration order.
    pub fn comp_outputs(&self, id: CompId) -> impl Iterator<Item = &OutputSlot> {
        self.component(id)
            .map(|c| c.outputs.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&o| &self.outputs[o.index() as usize])
    }
}
