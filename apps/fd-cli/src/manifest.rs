//! Composition manifests: the YAML front end to the composition builder.
//!
//! A manifest declares components (with ordered slot name lists), adapters,
//! and links. A link endpoint is written `Component.Slot`; the optional
//! `via` list threads the link through a chain of adapters in order.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use fd_core::{AdapterId, CompId};
use fd_model::{Composition, CompositionBuilder};
use serde::Deserialize;

use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub adapters: Vec<String>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkSpec {
    pub from: String,
    #[serde(default)]
    pub via: Vec<String>,
    pub to: String,
}

/// A manifest resolved into a frozen composition plus display metadata.
pub struct ResolvedManifest {
    pub composition: Composition,
    pub comp_names: HashMap<CompId, String>,
    pub adapter_names: HashMap<AdapterId, String>,
    pub excluded: HashSet<CompId>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Resolve names, wire everything up, and freeze the composition.
    pub fn resolve(self) -> CliResult<ResolvedManifest> {
        let mut builder = CompositionBuilder::new();
        let mut comps: HashMap<String, CompId> = HashMap::new();
        let mut adapters: HashMap<String, AdapterId> = HashMap::new();

        for comp in &self.components {
            if comps.contains_key(&comp.name) {
                return Err(CliError::Manifest(format!(
                    "duplicate component name '{}'",
                    comp.name
                )));
            }
            let inputs: Vec<&str> = comp.inputs.iter().map(String::as_str).collect();
            let outputs: Vec<&str> = comp.outputs.iter().map(String::as_str).collect();
            let id = builder.add_component(comp.name.clone(), &inputs, &outputs);
            comps.insert(comp.name.clone(), id);
        }

        for name in &self.adapters {
            if adapters.contains_key(name) {
                return Err(CliError::Manifest(format!(
                    "duplicate adapter name '{}'",
                    name
                )));
            }
            adapters.insert(name.clone(), builder.add_adapter(name.clone()));
        }

        for link in &self.links {
            let (from_comp, from_slot) = parse_endpoint(&link.from)?;
            let (to_comp, to_slot) = parse_endpoint(&link.to)?;
            let from_id = lookup(&comps, from_comp, "component")?;
            let to_id = lookup(&comps, to_comp, "component")?;

            let mut chain = Vec::with_capacity(link.via.len());
            for name in &link.via {
                chain.push(lookup(&adapters, name, "adapter")?);
            }

            builder.connect_via((from_id, from_slot), &chain, (to_id, to_slot))?;
        }

        let mut excluded = HashSet::new();
        for name in &self.exclude {
            excluded.insert(lookup(&comps, name, "component")?);
        }

        let composition = builder.build()?;
        let comp_names = comps.into_iter().map(|(n, id)| (id, n)).collect();
        let adapter_names = adapters.into_iter().map(|(n, id)| (id, n)).collect();

        Ok(ResolvedManifest {
            composition,
            comp_names,
            adapter_names,
            excluded,
        })
    }
}

fn parse_endpoint(s: &str) -> CliResult<(&str, &str)> {
    s.split_once('.')
        .filter(|(comp, slot)| !comp.is_empty() && !slot.is_empty())
        .ok_or_else(|| {
            CliError::Manifest(format!(
                "link endpoint '{}' is not of the form Component.Slot",
                s
            ))
        })
}

fn lookup<T: Copy>(map: &HashMap<String, T>, name: &str, what: &str) -> CliResult<T> {
    map.get(name)
        .copied()
        .ok_or_else(|| CliError::Manifest(format!("unknown {} '{}'", what, name)))
}
