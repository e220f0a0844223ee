//! Incremental composition builder.

use fd_core::{AdapterId, CompId, FdResult, InputId, OutputId};

use crate::error::ModelError;
use crate::model::{Adapter, Component, Composition, InputSlot, OutputSlot, SlotSource, SlotTarget};
use crate::validate;

/// Builder for constructing a composition incrementally.
///
/// Use `add_component` and `add_adapter` to declare nodes, the `connect*`
/// methods to wire slots and adapters, then call `build()` to validate and
/// freeze everything into an immutable `Composition`.
#[derive(Debug, Default)]
pub struct CompositionBuilder {
    components: Vec<Component>,
    adapters: Vec<Adapter>,
    inputs: Vec<InputSlot>,
    outputs: Vec<OutputSlot>,
    next_comp_id: u32,
    next_adapter_id: u32,
    next_input_id: u32,
    next_output_id: u32,
}

impl CompositionBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component with the given ordered input and output slot names.
    ///
    /// Creates one slot per name and attaches them to the component.
    /// Returns the component ID.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        inputs: &[&str],
        outputs: &[&str],
    ) -> CompId {
        let comp_id = CompId::from_index(self.next_comp_id);
        self.next_comp_id += 1;

        let mut input_ids = Vec::with_capacity(inputs.len());
        for slot_name in inputs {
            let id = InputId::from_index(self.next_input_id);
            self.next_input_id += 1;
            self.inputs.push(InputSlot {
                id,
                name: (*slot_name).into(),
                comp: comp_id,
                source: None,
            });
            input_ids.push(id);
        }

        let mut output_ids = Vec::with_capacity(outputs.len());
        for slot_name in outputs {
            let id = OutputId::from_index(self.next_output_id);
            self.next_output_id += 1;
            self.outputs.push(OutputSlot {
                id,
                name: (*slot_name).into(),
                comp: comp_id,
                targets: Vec::new(),
            });
            output_ids.push(id);
        }

        self.components.push(Component {
            id: comp_id,
            name: name.into(),
            inputs: input_ids,
            outputs: output_ids,
        });

        comp_id
    }

    /// Add an adapter and return its ID. Adapters start unwired.
    pub fn add_adapter(&mut self, name: impl Into<String>) -> AdapterId {
        let id = AdapterId::from_index(self.next_adapter_id);
        self.next_adapter_id += 1;
        self.adapters.push(Adapter {
            id,
            name: name.into(),
            source: None,
            targets: Vec::new(),
        });
        id
    }

    /// Wire a component output slot directly to a component input slot.
    pub fn connect(&mut self, from: (CompId, &str), to: (CompId, &str)) -> FdResult<()> {
        let out = self.find_output(from.0, from.1)?;
        let inp = self.find_input(to.0, to.1)?;

        let input = &mut self.inputs[inp.index() as usize];
        if input.source.is_some() {
            return Err(ModelError::InputAlreadyWired { input: inp }.into());
        }
        input.source = Some(SlotSource::Output(out));
        self.outputs[out.index() as usize]
            .targets
            .push(SlotTarget::Input(inp));
        Ok(())
    }

    /// Wire a component output slot into an adapter.
    pub fn feed_adapter(&mut self, from: (CompId, &str), adapter: AdapterId) -> FdResult<()> {
        let out = self.find_output(from.0, from.1)?;
        let ad = self.check_adapter(adapter)?;

        let rec = &mut self.adapters[ad.index() as usize];
        if rec.source.is_some() {
            return Err(ModelError::AdapterAlreadyWired { adapter: ad }.into());
        }
        rec.source = Some(SlotSource::Output(out));
        self.outputs[out.index() as usize]
            .targets
            .push(SlotTarget::Adapter(ad));
        Ok(())
    }

    /// Chain one adapter into another (`from` feeds `to`).
    pub fn chain_adapters(&mut self, from: AdapterId, to: AdapterId) -> FdResult<()> {
        let from = self.check_adapter(from)?;
        let to = self.check_adapter(to)?;

        let downstream = &mut self.adapters[to.index() as usize];
        if downstream.source.is_some() {
            return Err(ModelError::AdapterAlreadyWired { adapter: to }.into());
        }
        downstream.source = Some(SlotSource::Adapter(from));
        self.adapters[from.index() as usize]
            .targets
            .push(SlotTarget::Adapter(to));
        Ok(())
    }

    /// Wire an adapter into a component input slot.
    pub fn connect_adapter(&mut self, adapter: AdapterId, to: (CompId, &str)) -> FdResult<()> {
        let ad = self.check_adapter(adapter)?;
        let inp = self.find_input(to.0, to.1)?;

        let input = &mut self.inputs[inp.index() as usize];
        if input.source.is_some() {
            return Err(ModelError::InputAlreadyWired { input: inp }.into());
        }
        input.source = Some(SlotSource::Adapter(ad));
        self.adapters[ad.index() as usize]
            .targets
            .push(SlotTarget::Input(inp));
        Ok(())
    }

    /// Wire an output slot to an input slot through a chain of adapters.
    ///
    /// An empty chain is equivalent to `connect`.
    pub fn connect_via(
        &mut self,
        from: (CompId, &str),
        chain: &[AdapterId],
        to: (CompId, &str),
    ) -> FdResult<()> {
        match chain {
            [] => self.connect(from, to),
            [first, rest @ ..] => {
                self.feed_adapter(from, *first)?;
                let mut prev = *first;
                for &next in rest {
                    self.chain_adapters(prev, next)?;
                    prev = next;
                }
                self.connect_adapter(prev, to)
            }
        }
    }

    /// Build and validate the composition, returning an immutable `Composition`.
    pub fn build(self) -> FdResult<Composition> {
        validate::validate_structure(&self.components, &self.adapters, &self.inputs, &self.outputs)?;

        Ok(Composition {
            components: self.components,
            adapters: self.adapters,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }

    fn find_input(&self, comp: CompId, name: &str) -> FdResult<InputId> {
        let rec = self
            .components
            .get(comp.index() as usize)
            .ok_or(ModelError::UnknownComponent { comp })?;
        rec.inputs
            .iter()
            .copied()
            .find(|&i| self.inputs[i.index() as usize].name == name)
            .ok_or_else(|| {
                ModelError::UnknownSlot {
                    comp,
                    name: name.into(),
                    side: "input",
                }
                .into()
            })
    }

    fn find_output(&self, comp: CompId, name: &str) -> FdResult<OutputId> {
        let rec = self
            .components
            .get(comp.index() as usize)
            .ok_or(ModelError::UnknownComponent { comp })?;
        rec.outputs
            .iter()
            .copied()
            .find(|&o| self.outputs[o.index() as usize].name == name)
            .ok_or_else(|| {
                ModelError::UnknownSlot {
                    comp,
                    name: name.into(),
                    side: "output",
                }
                .into()
            })
    }

    fn check_adapter(&self, adapter: AdapterId) -> FdResult<AdapterId> {
        if (adapter.index() as usize) < self.adapters.len() {
            Ok(adapter)
        } else {
            Err(ModelError::UnknownAdapter { adapter }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("Source", &[], &["Out"]);
        let c2 = builder.add_component("Sink", &["In"], &[]);

        assert_eq!(c1.index(), 0);
        assert_eq!(c2.index(), 1);
        assert_eq!(builder.components.len(), 2);
        assert_eq!(builder.inputs.len(), 1);
        assert_eq!(builder.outputs.len(), 1);
    }

    #[test]
    fn builder_connect_direct() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("Source", &[], &["Out"]);
        let c2 = builder.add_component("Sink", &["In"], &[]);
        builder.connect((c1, "Out"), (c2, "In")).unwrap();

        let comp = builder.build().unwrap();
        let input = comp.comp_inputs(c2).next().unwrap();
        let out_id = comp.comp_outputs(c1).next().unwrap().id;
        assert_eq!(input.source, Some(SlotSource::Output(out_id)));
        assert_eq!(
            comp.output(out_id).unwrap().targets,
            vec![SlotTarget::Input(input.id)]
        );
    }

    #[test]
    fn builder_connect_via_chain() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("Source", &[], &["Out"]);
        let c2 = builder.add_component("Sink", &["In"], &[]);
        let a1 = builder.add_adapter("Scale");
        let a2 = builder.add_adapter("Shift");
        builder.connect_via((c1, "Out"), &[a1, a2], (c2, "In")).unwrap();

        let comp = builder.build().unwrap();
        let out_id = comp.comp_outputs(c1).next().unwrap().id;
        assert_eq!(comp.adapter(a1).unwrap().source, Some(SlotSource::Output(out_id)));
        assert_eq!(comp.adapter(a2).unwrap().source, Some(SlotSource::Adapter(a1)));
        let input = comp.comp_inputs(c2).next().unwrap();
        assert_eq!(input.source, Some(SlotSource::Adapter(a2)));
    }

    #[test]
    fn builder_rejects_double_wiring() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("A", &[], &["Out"]);
        let c2 = builder.add_component("B", &[], &["Out"]);
        let c3 = builder.add_component("C", &["In"], &[]);
        builder.connect((c1, "Out"), (c3, "In")).unwrap();
        assert!(builder.connect((c2, "Out"), (c3, "In")).is_err());
    }

    #[test]
    fn builder_rejects_unknown_slot() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("A", &[], &["Out"]);
        let c2 = builder.add_component("B", &["In"], &[]);
        assert!(builder.connect((c1, "Missing"), (c2, "In")).is_err());
        assert!(builder.connect((c1, "Out"), (c2, "Missing")).is_err());
    }
}
