//! Composition validation logic.

use std::collections::HashSet;

use fd_core::FdResult;

use crate::error::ModelError;
use crate::model::{Adapter, Component, InputSlot, OutputSlot, SlotSource, SlotTarget};

/// Validate the composition structure: all references exist, both ends of
/// every wire agree, and slot names are unique per component side.
pub(crate) fn validate_structure(
    components: &[Component],
    adapters: &[Adapter],
    inputs: &[InputSlot],
    outputs: &[OutputSlot],
) -> FdResult<()> {
    // IDs are handed out contiguously by the builder; check anyway so a
    // hand-assembled composition cannot smuggle in holes.
    for (i, comp) in components.iter().enumerate() {
        if comp.id.index() as usize != i {
            return Err(ModelError::UnknownComponent { comp: comp.id }.into());
        }
    }
    for (i, ad) in adapters.iter().enumerate() {
        if ad.id.index() as usize != i {
            return Err(ModelError::UnknownAdapter { adapter: ad.id }.into());
        }
    }

    // Slot name uniqueness per component side
    for comp in components {
        let mut seen = HashSet::new();
        for &i in &comp.inputs {
            let name = &inputs[i.index() as usize].name;
            if !seen.insert(name) {
                return Err(ModelError::DuplicateSlotName {
                    comp: comp.id,
                    name: name.clone(),
                }
                .into());
            }
        }
        let mut seen = HashSet::new();
        for &o in &comp.outputs {
            let name = &outputs[o.index() as usize].name;
            if !seen.insert(name) {
                return Err(ModelError::DuplicateSlotName {
                    comp: comp.id,
                    name: name.clone(),
                }
                .into());
            }
        }
    }

    // Every input source must claim the input back as a target
    for input in inputs {
        match input.source {
            None => {}
            Some(SlotSource::Output(o)) => {
                let out = outputs
                    .get(o.index() as usize)
                    .ok_or(ModelError::InconsistentWiring {
                        what: "input sourced from non-existent output",
                    })?;
                if !out.targets.contains(&SlotTarget::Input(input.id)) {
                    return Err(ModelError::InconsistentWiring {
                        what: "output does not list its consumer input",
                    }
                    .into());
                }
            }
            Some(SlotSource::Adapter(a)) => {
                let ad = adapters
                    .get(a.index() as usize)
                    .ok_or(ModelError::InconsistentWiring {
                        what: "input sourced from non-existent adapter",
                    })?;
                if !ad.targets.contains(&SlotTarget::Input(input.id)) {
                    return Err(ModelError::InconsistentWiring {
                        what: "adapter does not list its consumer input",
                    }
                    .into());
                }
            }
        }
    }

    // Every adapter source must claim the adapter back as a target
    for ad in adapters {
        match ad.source {
            None => {}
            Some(SlotSource::Output(o)) => {
                let out = outputs
                    .get(o.index() as usize)
                    .ok_or(ModelError::InconsistentWiring {
                        what: "adapter sourced from non-existent output",
                    })?;
                if !out.targets.contains(&SlotTarget::Adapter(ad.id)) {
                    return Err(ModelError::InconsistentWiring {
                        what: "output does not list its consumer adapter",
                    }
                    .into());
                }
            }
            Some(SlotSource::Adapter(a)) => {
                let upstream = adapters
                    .get(a.index() as usize)
                    .ok_or(ModelError::InconsistentWiring {
                        what: "adapter sourced from non-existent adapter",
                    })?;
                if !upstream.targets.contains(&SlotTarget::Adapter(ad.id)) {
                    return Err(ModelError::InconsistentWiring {
                        what: "upstream adapter does not list its downstream adapter",
                    }
                    .into());
                }
            }
        }
    }

    // Every target must claim its producer back as the source
    for out in outputs {
        for trg in &out.targets {
            check_target_source(*trg, SlotSource::Output(out.id), adapters, inputs)?;
        }
    }
    for ad in adapters {
        for trg in &ad.targets {
            check_target_source(*trg, SlotSource::Adapter(ad.id), adapters, inputs)?;
        }
    }

    Ok(())
}

fn check_target_source(
    target: SlotTarget,
    expected: SlotSource,
    adapters: &[Adapter],
    inputs: &[InputSlot],
) -> FdResult<()> {
    let actual = match target {
        SlotTarget::Input(i) => inputs
            .get(i.index() as usize)
            .ok_or(ModelError::InconsistentWiring {
                what: "target input does not exist",
            })?
            .source,
        SlotTarget::Adapter(a) => adapters
            .get(a.index() as usize)
            .ok_or(ModelError::InconsistentWiring {
                what: "target adapter does not exist",
            })?
            .source,
    };
    if actual != Some(expected) {
        return Err(ModelError::InconsistentWiring {
            what: "target does not claim its source back",
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompositionBuilder;

    #[test]
    fn valid_composition_passes() {
        let mut builder = CompositionBuilder::new();
        let c1 = builder.add_component("A", &[], &["Out"]);
        let c2 = builder.add_component("B", &["In"], &[]);
        let a1 = builder.add_adapter("Ad");
        builder.connect_via((c1, "Out"), &[a1], (c2, "In")).unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn duplicate_slot_names_rejected() {
        let mut builder = CompositionBuilder::new();
        builder.add_component("A", &["In", "In"], &[]);
        assert!(builder.build().is_err());
    }
}
