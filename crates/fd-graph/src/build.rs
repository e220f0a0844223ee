//! Graph extraction: discovery, chain collapse, and edge resolution.

use std::collections::{HashMap, HashSet};

use fd_core::{AdapterId, CompId, FdResult, OutputId};
use fd_model::{Composition, SlotSource, SlotTarget};

use crate::edge::{Edge, EdgeKey, NodeRef};
use crate::error::GraphError;
use crate::graph::Graph;

/// Result of tracing an input backward through its adapter chain.
struct InputTrace {
    /// The producing output slot, if the chain terminates at one.
    terminal: Option<OutputId>,
    /// Number of adapters traversed.
    hops: usize,
    /// Adapters visited, in traversal order.
    adapters: Vec<AdapterId>,
}

pub(crate) fn build(composition: &Composition, excluded: &HashSet<CompId>) -> FdResult<Graph> {
    for &comp in excluded {
        if composition.component(comp).is_none() {
            return Err(GraphError::UnknownExcluded { comp }.into());
        }
    }

    let output_map = map_outputs(composition);

    let mut components = HashSet::new();
    let mut adapters = HashSet::new();
    let mut direct = HashMap::new();

    // Discovery and chain collapse. Adapters join the set for every trace,
    // whether or not the trace yields an edge.
    for comp in composition.components() {
        if excluded.contains(&comp.id) {
            continue;
        }
        components.insert(comp.id);

        for (i, input) in composition.comp_inputs(comp.id).enumerate() {
            let trace = trace_input(composition, input.source);
            adapters.extend(trace.adapters.iter().copied());

            let Some(out) = trace.terminal else { continue };
            let Some(&(comp2, ii)) = output_map.get(&out) else {
                continue;
            };
            if excluded.contains(&comp2) {
                continue;
            }
            let out_name = composition.output(out).map(|o| o.name.clone());
            insert(
                &mut direct,
                Edge {
                    source: NodeRef::Component(comp2),
                    out_slot: out_name,
                    out_index: ii,
                    target: NodeRef::Component(comp.id),
                    in_slot: Some(input.name.clone()),
                    in_index: i,
                    hops: trace.hops,
                },
            );
        }

        for output in composition.comp_outputs(comp.id) {
            trace_output(composition, &output.targets, &mut adapters);
        }
    }

    let mut edges = component_edges(composition, excluded, &adapters, &output_map);
    adapter_edges(composition, &adapters, &mut edges);

    let mut simple: Vec<(CompId, CompId)> = direct
        .values()
        .filter_map(|e: &Edge| match (e.source, e.target) {
            (NodeRef::Component(s), NodeRef::Component(t)) => Some((s, t)),
            _ => None,
        })
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    simple.sort_unstable();

    Ok(Graph {
        components,
        adapters,
        edges: freeze(edges),
        direct_edges: freeze(direct),
        simple_edges: simple,
    })
}

/// Boundary and direct component edges for the expanded view.
fn component_edges(
    composition: &Composition,
    excluded: &HashSet<CompId>,
    adapters: &HashSet<AdapterId>,
    output_map: &HashMap<OutputId, (CompId, usize)>,
) -> HashMap<EdgeKey, Edge> {
    let mut edges = HashMap::new();

    for comp in composition.components() {
        if excluded.contains(&comp.id) {
            continue;
        }

        for (i, input) in composition.comp_inputs(comp.id).enumerate() {
            match input.source {
                Some(SlotSource::Adapter(a)) if adapters.contains(&a) => {
                    insert(
                        &mut edges,
                        Edge {
                            source: NodeRef::Adapter(a),
                            out_slot: None,
                            out_index: 0,
                            target: NodeRef::Component(comp.id),
                            in_slot: Some(input.name.clone()),
                            in_index: i,
                            hops: 0,
                        },
                    );
                }
                // Resolution is by output-slot identity, never by name:
                // two components may well use identical slot names.
                Some(SlotSource::Output(out)) => {
                    let Some(&(comp2, ii)) = output_map.get(&out) else {
                        continue;
                    };
                    if excluded.contains(&comp2) {
                        continue;
                    }
                    let out_name = composition.output(out).map(|o| o.name.clone());
                    insert(
                        &mut edges,
                        Edge {
                            source: NodeRef::Component(comp2),
                            out_slot: out_name,
                            out_index: ii,
                            target: NodeRef::Component(comp.id),
                            in_slot: Some(input.name.clone()),
                            in_index: i,
                            hops: 0,
                        },
                    );
                }
                _ => {}
            }
        }

        for (i, output) in composition.comp_outputs(comp.id).enumerate() {
            for trg in &output.targets {
                if let SlotTarget::Adapter(a) = trg {
                    if adapters.contains(a) {
                        insert(
                            &mut edges,
                            Edge {
                                source: NodeRef::Component(comp.id),
                                out_slot: Some(output.name.clone()),
                                out_index: i,
                                target: NodeRef::Adapter(*a),
                                in_slot: None,
                                in_index: 0,
                                hops: 0,
                            },
                        );
                    }
                }
            }
        }
    }

    edges
}

/// Interior adapter-to-adapter edges for chains of length >= 2.
fn adapter_edges(
    composition: &Composition,
    adapters: &HashSet<AdapterId>,
    edges: &mut HashMap<EdgeKey, Edge>,
) {
    for ad in composition.adapters() {
        if !adapters.contains(&ad.id) {
            continue;
        }
        if let Some(SlotSource::Adapter(src)) = ad.source {
            if adapters.contains(&src) {
                insert(
                    edges,
                    Edge {
                        source: NodeRef::Adapter(src),
                        out_slot: None,
                        out_index: 0,
                        target: NodeRef::Adapter(ad.id),
                        in_slot: None,
                        in_index: 0,
                        hops: 0,
                    },
                );
            }
        }
        for trg in &ad.targets {
            if let SlotTarget::Adapter(t) = trg {
                if adapters.contains(t) {
                    insert(
                        edges,
                        Edge {
                            source: NodeRef::Adapter(ad.id),
                            out_slot: None,
                            out_index: 0,
                            target: NodeRef::Adapter(*t),
                            in_slot: None,
                            in_index: 0,
                            hops: 0,
                        },
                    );
                }
            }
        }
    }
}

/// Precompute output slot -> (owning component, slot index), once per build.
fn map_outputs(composition: &Composition) -> HashMap<OutputId, (CompId, usize)> {
    let mut map = HashMap::with_capacity(composition.outputs().len());
    for comp in composition.components() {
        for (i, output) in composition.comp_outputs(comp.id).enumerate() {
            map.insert(output.id, (comp.id, i));
        }
    }
    map
}

/// Walk an input's source backward through consecutive adapters.
///
/// Iterative, with a visited set: cyclic adapter wiring is not expected,
/// but a cycle must end the trace as a dead end rather than spin. A chain
/// whose upstream adapter has no source is likewise a dead end; adapters
/// visited up to that point are still reported.
fn trace_input(composition: &Composition, source: Option<SlotSource>) -> InputTrace {
    let mut hops = 0;
    let mut visited = Vec::new();
    let mut seen = HashSet::new();
    let mut cur = source;

    loop {
        match cur {
            None => {
                return InputTrace {
                    terminal: None,
                    hops,
                    adapters: visited,
                };
            }
            Some(SlotSource::Output(out)) => {
                return InputTrace {
                    terminal: Some(out),
                    hops,
                    adapters: visited,
                };
            }
            Some(SlotSource::Adapter(a)) => {
                if !seen.insert(a) {
                    return InputTrace {
                        terminal: None,
                        hops,
                        adapters: visited,
                    };
                }
                visited.push(a);
                hops += 1;
                cur = composition.adapter(a).and_then(|ad| ad.source);
            }
        }
    }
}

/// Walk forward from an output's targets, collecting adapters along the way.
fn trace_output(
    composition: &Composition,
    targets: &[SlotTarget],
    adapters: &mut HashSet<AdapterId>,
) {
    let mut stack: Vec<AdapterId> = targets
        .iter()
        .filter_map(|t| match t {
            SlotTarget::Adapter(a) => Some(*a),
            SlotTarget::Input(_) => None,
        })
        .collect();

    // Visited set local to this walk: an adapter already discovered by an
    // earlier trace must still be walked through here, or adapters hanging
    // off it stay hidden.
    let mut seen = HashSet::new();

    while let Some(a) = stack.pop() {
        if !seen.insert(a) {
            continue;
        }
        adapters.insert(a);
        if let Some(ad) = composition.adapter(a) {
            for trg in &ad.targets {
                if let SlotTarget::Adapter(next) = trg {
                    stack.push(*next);
                }
            }
        }
    }
}

/// Keyed insertion: an edge with an existing key replaces the stored edge.
fn insert(edges: &mut HashMap<EdgeKey, Edge>, edge: Edge) {
    edges.insert(edge.key(), edge);
}

/// Freeze a keyed edge map into a deterministically ordered list.
fn freeze(edges: HashMap<EdgeKey, Edge>) -> Vec<Edge> {
    let mut list: Vec<(EdgeKey, Edge)> = edges.into_iter().collect();
    list.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    list.into_iter().map(|(_, e)| e).collect()
}
