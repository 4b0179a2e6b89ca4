//! mavros_bridge_launch library
//!
//! [`bridge::generate_launch_description`] composes the launch description
//! for one simulated agent. [`LaunchResolver`] evaluates a description
//! against launch arguments and produces the `record.json` consumed by the
//! process supervisor.

pub mod actions;
pub mod bridge;
pub mod description;
pub mod error;
pub mod package;
pub mod params;
pub mod record;
pub mod substitution;

use actions::DeclareArgumentAction;
use description::{LaunchDescription, LaunchEntity};
use error::{GenerationError, Result};
use params::load_param_file_data;
use record::{CommandGenerator, NodeRecord, RecordJson};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use substitution::{resolve_substitutions, LaunchContext};

/// Evaluates launch descriptions into node records
pub struct LaunchResolver {
    context: LaunchContext,
    cli_args: HashMap<String, String>,
    declared: HashSet<String>,
    records: Vec<NodeRecord>,
    file_data: BTreeMap<String, String>,
    exec_counts: HashMap<String, usize>,
}

impl LaunchResolver {
    pub fn new(cli_args: HashMap<String, String>, mut context: LaunchContext) -> Self {
        // CLI args are visible as configurations even before their declaration
        for (k, v) in &cli_args {
            context.set_configuration(k.clone(), v.clone());
        }

        Self {
            context,
            cli_args,
            declared: HashSet::new(),
            records: Vec::new(),
            file_data: BTreeMap::new(),
            exec_counts: HashMap::new(),
        }
    }

    pub fn context(&self) -> &LaunchContext {
        &self.context
    }

    pub fn resolve(&mut self, description: &LaunchDescription) -> Result<()> {
        for entity in description.entities() {
            match entity {
                LaunchEntity::DeclareArgument(arg) => self.declare_argument(arg)?,
                LaunchEntity::Node(node) => {
                    let executable = resolve_substitutions(&node.executable, &self.context)?;
                    let count = self.exec_counts.entry(executable.clone()).or_insert(0);
                    *count += 1;
                    let exec_name = format!("{}-{}", executable, count);

                    let record =
                        CommandGenerator::generate_node_record(node, &self.context, exec_name)?;
                    log::debug!("Generated record for {}: {:?}", executable, record.cmd);
                    self.collect_param_files(&record);
                    self.records.push(record);
                }
            }
        }

        let mut unused: Vec<&String> = self
            .cli_args
            .keys()
            .filter(|name| !self.declared.contains(*name))
            .collect();
        unused.sort();
        for name in unused {
            log::warn!("Launch argument '{}' is not declared by the launch description", name);
        }

        Ok(())
    }

    fn declare_argument(&mut self, arg: &DeclareArgumentAction) -> Result<()> {
        self.declared.insert(arg.name.clone());

        if self.context.get_configuration(&arg.name).is_some() {
            return Ok(());
        }

        match &arg.default {
            Some(default) => {
                let value = resolve_substitutions(default, &self.context)?;
                log::debug!("Argument {} defaults to '{}'", arg.name, value);
                self.context.set_configuration(arg.name.clone(), value);
                Ok(())
            }
            None => Err(GenerationError::MissingArgument(arg.name.clone())),
        }
    }

    fn collect_param_files(&mut self, record: &NodeRecord) {
        for path in &record.params_files {
            if self.file_data.contains_key(path) {
                continue;
            }
            match load_param_file_data(Path::new(path)) {
                Ok(content) => {
                    self.file_data.insert(path.clone(), content);
                }
                Err(e) => {
                    log::warn!("Failed to load parameter file {}: {}", path, e);
                }
            }
        }
    }

    pub fn into_record_json(self) -> RecordJson {
        RecordJson {
            node: self.records,
            file_data: self.file_data,
            ..RecordJson::new()
        }
    }
}

/// Resolve a launch description and generate record.json
pub fn resolve_launch_description(
    description: &LaunchDescription,
    cli_args: HashMap<String, String>,
    context: LaunchContext,
) -> Result<RecordJson> {
    let mut resolver = LaunchResolver::new(cli_args, context);
    resolver.resolve(description)?;
    Ok(resolver.into_record_json())
}
