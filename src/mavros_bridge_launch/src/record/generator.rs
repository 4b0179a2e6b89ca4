//! Command-line and record generation

use crate::actions::{NodeAction, ParameterEntry};
use crate::error::GenerationError;
use crate::record::types::NodeRecord;
use crate::substitution::{absolute_namespace, resolve_substitutions, LaunchContext};

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(
        node: &NodeAction,
        context: &LaunchContext,
        exec_name: String,
    ) -> Result<NodeRecord, GenerationError> {
        let cmd = Self::generate_node_command(node, context)?;

        let package = resolve_substitutions(&node.package, context)?;
        let executable = resolve_substitutions(&node.executable, context)?;

        let name = match &node.name {
            Some(name_subs) => resolve_substitutions(name_subs, context)?,
            None => executable.clone(),
        };

        let namespace = Self::resolve_namespace(node, context)?;

        let mut params = Vec::new();
        let mut params_files = Vec::new();
        for entry in &node.parameters {
            match entry {
                ParameterEntry::Inline { name, value } => {
                    params.push((name.clone(), value.resolve(context)?));
                }
                ParameterEntry::File(path_subs) => {
                    params_files.push(resolve_substitutions(path_subs, context)?);
                }
            }
        }

        let remaps = node
            .remappings
            .iter()
            .map(|r| {
                let from = resolve_substitutions(&r.from, context)?;
                let to = resolve_substitutions(&r.to, context)?;
                Ok((from, to))
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let args = Self::resolve_arguments(node, context)?;

        Ok(NodeRecord {
            executable,
            package: Some(package),
            name: Some(name),
            namespace: Some(namespace),
            exec_name: Some(exec_name),
            params,
            params_files,
            remaps,
            ros_args: None,
            args: if args.is_empty() { None } else { Some(args) },
            cmd,
            env: None,
            respawn: Some(false),
            respawn_delay: None,
            global_params: None,
            output: Some(node.output.as_str().to_string()),
        })
    }

    pub fn generate_node_command(
        node: &NodeAction,
        context: &LaunchContext,
    ) -> Result<Vec<String>, GenerationError> {
        let mut cmd = Vec::new();

        // 1. Resolve executable path
        let package = resolve_substitutions(&node.package, context)?;
        let executable = resolve_substitutions(&node.executable, context)?;
        cmd.push(Self::resolve_executable_path(&package, &executable, context));

        // 2. Positional arguments precede the ROS arguments
        cmd.extend(Self::resolve_arguments(node, context)?);

        // 3. ROS args delimiter
        cmd.push("--ros-args".to_string());

        // 4. Node name, only when set explicitly
        if let Some(name_subs) = &node.name {
            cmd.push("-r".to_string());
            cmd.push(format!(
                "__node:={}",
                resolve_substitutions(name_subs, context)?
            ));
        }

        // 5. Namespace
        cmd.push("-r".to_string());
        cmd.push(format!("__ns:={}", Self::resolve_namespace(node, context)?));

        // 6. Remappings
        for remap in &node.remappings {
            let from = resolve_substitutions(&remap.from, context)?;
            let to = resolve_substitutions(&remap.to, context)?;
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", from, to));
        }

        // 7. Parameters and parameter files, in declaration order
        for entry in &node.parameters {
            match entry {
                ParameterEntry::Inline { name, value } => {
                    let value = value.resolve(context)?;
                    cmd.push("-p".to_string());
                    cmd.push(format!("{}:={}", name, quote_param_value(&value)));
                }
                ParameterEntry::File(path_subs) => {
                    cmd.push("--params-file".to_string());
                    cmd.push(resolve_substitutions(path_subs, context)?);
                }
            }
        }

        Ok(cmd)
    }

    fn resolve_arguments(
        node: &NodeAction,
        context: &LaunchContext,
    ) -> Result<Vec<String>, GenerationError> {
        node.arguments
            .iter()
            .map(|arg| resolve_substitutions(arg, context).map_err(GenerationError::from))
            .collect()
    }

    fn resolve_namespace(
        node: &NodeAction,
        context: &LaunchContext,
    ) -> Result<String, GenerationError> {
        match &node.namespace {
            Some(ns_subs) => Ok(absolute_namespace(&resolve_substitutions(
                ns_subs, context,
            )?)),
            None => Ok("/".to_string()),
        }
    }

    fn resolve_executable_path(package: &str, executable: &str, context: &LaunchContext) -> String {
        match context.find_executable(package, executable) {
            Some(path) => path.to_string_lossy().into_owned(),
            None => {
                let path = context.expected_executable_path(package, executable);
                log::warn!(
                    "Executable {} not found in package {}; using {}",
                    executable,
                    package,
                    path.display()
                );
                path.to_string_lossy().into_owned()
            }
        }
    }
}

/// An empty value would parse as YAML null; quote it to keep it a string
fn quote_param_value(value: &str) -> String {
    if value.is_empty() {
        "''".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{OutputMode, ParameterValue};
    use crate::substitution::Substitution;
    use tempfile::TempDir;

    fn context() -> LaunchContext {
        LaunchContext::with_prefixes(vec!["/opt/ros/humble".into()])
    }

    #[test]
    fn test_generate_simple_command() {
        let node = NodeAction::new("demo_nodes_cpp", "talker");
        let cmd = CommandGenerator::generate_node_command(&node, &context()).unwrap();

        assert_eq!(cmd[0], "/opt/ros/humble/lib/demo_nodes_cpp/talker");
        assert_eq!(cmd[1], "--ros-args");
        assert!(!cmd.iter().any(|c| c.starts_with("__node:=")));
        assert!(cmd.contains(&"__ns:=/".to_string()));
    }

    #[test]
    fn test_generate_command_with_name() {
        let mut node = NodeAction::new("demo", "node");
        node.name = Some(vec![Substitution::text("my_node")]);
        let cmd = CommandGenerator::generate_node_command(&node, &context()).unwrap();
        assert!(cmd.contains(&"__node:=my_node".to_string()));
    }

    #[test]
    fn test_arguments_precede_ros_args() {
        let node = NodeAction::new("tf2_ros", "static_transform_publisher").with_arguments(vec![
            vec![Substitution::text("1")],
            vec![Substitution::text("world")],
        ]);
        let cmd = CommandGenerator::generate_node_command(&node, &context()).unwrap();
        assert_eq!(&cmd[1..4], &["1", "world", "--ros-args"]);
    }

    #[test]
    fn test_generate_command_with_params() {
        let node = NodeAction::new("demo", "node").with_parameters(vec![
            ParameterEntry::inline("rate", ParameterValue::text("10.0")),
            ParameterEntry::File(vec![Substitution::text("/tmp/params.yaml")]),
            ParameterEntry::inline("url", ParameterValue::text("")),
        ]);
        let cmd = CommandGenerator::generate_node_command(&node, &context()).unwrap();

        let rate = cmd.iter().position(|c| c == "rate:=10.0").unwrap();
        let file = cmd.iter().position(|c| c == "/tmp/params.yaml").unwrap();
        let url = cmd.iter().position(|c| c == "url:=''").unwrap();
        assert_eq!(cmd[rate - 1], "-p");
        assert_eq!(cmd[file - 1], "--params-file");
        assert!(rate < file && file < url);
    }

    #[test]
    fn test_generate_command_with_remaps_and_namespace() {
        let node = NodeAction::new("demo", "node")
            .with_namespace("mavros")
            .with_remapping("chatter", vec![Substitution::text("/chat")]);
        let cmd = CommandGenerator::generate_node_command(&node, &context()).unwrap();

        assert!(cmd.contains(&"__ns:=/mavros".to_string()));
        assert!(cmd.contains(&"chatter:=/chat".to_string()));
    }

    #[test]
    fn test_generate_node_record() {
        let node = NodeAction::new("mavros", "mavros_node")
            .with_output(OutputMode::Screen)
            .with_namespace("mavros")
            .with_parameters(vec![
                ParameterEntry::inline("tgt_component", ParameterValue::Integer(1)),
                ParameterEntry::File(vec![Substitution::text("/cfg/px4_config.yaml")]),
            ]);

        let record =
            CommandGenerator::generate_node_record(&node, &context(), "mavros_node-1".to_string())
                .unwrap();

        assert_eq!(record.executable, "mavros_node");
        assert_eq!(record.package.as_deref(), Some("mavros"));
        assert_eq!(record.name.as_deref(), Some("mavros_node"));
        assert_eq!(record.namespace.as_deref(), Some("/mavros"));
        assert_eq!(record.exec_name.as_deref(), Some("mavros_node-1"));
        assert_eq!(record.output.as_deref(), Some("screen"));
        assert_eq!(record.param("tgt_component"), Some("1"));
        assert_eq!(record.params_files, vec!["/cfg/px4_config.yaml"]);
        assert_eq!(record.args, None);
    }

    #[test]
    fn test_executable_found_in_prefix() {
        let prefix = TempDir::new().unwrap();
        let lib_dir = prefix.path().join("lib/mavros");
        std::fs::create_dir_all(&lib_dir).unwrap();
        std::fs::write(lib_dir.join("mavros_node"), b"").unwrap();

        let context = LaunchContext::with_prefixes(vec![
            "/nonexistent/prefix".into(),
            prefix.path().to_path_buf(),
        ]);
        let node = NodeAction::new("mavros", "mavros_node");
        let cmd = CommandGenerator::generate_node_command(&node, &context).unwrap();
        assert_eq!(cmd[0], lib_dir.join("mavros_node").to_string_lossy());
    }

    #[test]
    fn test_unresolved_configuration_fails() {
        let node = NodeAction::new("demo", "node")
            .with_arguments(vec![vec![Substitution::configuration("missing")]]);
        let result = CommandGenerator::generate_node_command(&node, &context());
        assert!(matches!(result, Err(GenerationError::Substitution(_))));
    }
}
