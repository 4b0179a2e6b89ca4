//! mavros_bridge_launch CLI

use clap::{Parser, Subcommand};
use mavros_bridge_launch::{
    bridge::{generate_launch_description, AgentLayout},
    substitution::LaunchContext,
    LaunchResolver,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "mavros_bridge_launch")]
#[command(about = "Launch record generator for a PX4 SITL agent bridged through MAVROS", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the launch description and write record.json
    Record {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,

        /// Install prefixes searched for packages, first match wins
        #[arg(long, env = "AMENT_PREFIX_PATH", value_delimiter = ':')]
        prefix: Vec<PathBuf>,
    },

    /// List the declared launch arguments
    Args,

    /// Print frame names, ports and system id of an agent
    Layout {
        #[arg(short, long, default_value_t = 0)]
        drone_id: u16,
    },
}

fn parse_launch_arg(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.split(":=").collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(format!("Invalid launch argument format: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Record {
            args,
            output,
            prefix,
        } => {
            let prefixes: Vec<PathBuf> = prefix
                .into_iter()
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            let context = if prefixes.is_empty() {
                LaunchContext::new()
            } else {
                LaunchContext::with_prefixes(prefixes)
            };
            let cli_args: HashMap<String, String> = args.into_iter().collect();
            record_and_write(cli_args, context, &output)
        }
        Commands::Args => {
            print_arguments();
            Ok(())
        }
        Commands::Layout { drone_id } => {
            println!("{}", AgentLayout::new(drone_id));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_arguments() {
    let description = generate_launch_description();
    println!("Declared arguments:");
    for arg in description.declared_arguments() {
        match arg.default_text() {
            Some(default) => println!("  {} (default: '{}')", arg.name, default),
            None => println!("  {} (required)", arg.name),
        }
        if let Some(description) = &arg.description {
            println!("      {}", description);
        }
    }
}

fn record_and_write(
    cli_args: HashMap<String, String>,
    context: LaunchContext,
    output: &Path,
) -> mavros_bridge_launch::error::Result<()> {
    let description = generate_launch_description();

    let mut resolver = LaunchResolver::new(cli_args, context);
    resolver.resolve(&description)?;
    let layout = AgentLayout::from_context(resolver.context());
    let record = resolver.into_record_json();

    record.write_to_file(output)?;

    log::info!("Generated record.json: {}", output.display());
    log::info!(
        "  {} nodes, {} parameter files loaded",
        record.node.len(),
        record.file_data.len()
    );
    match layout {
        Some(layout) => {
            log::info!(
                "  agent {}: fcu {}, tgt_system {}, odom {}",
                layout.drone_id,
                layout.endpoint,
                layout.tgt_system,
                layout.odom_topic
            );
            if !layout.endpoint.is_routable() {
                log::warn!(
                    "FCU ports of agent {} exceed 65535; the bridge cannot bind them",
                    layout.drone_id
                );
            }
        }
        None => log::debug!("drone_id is not an integer in 0..=65535; skipping layout summary"),
    }

    Ok(())
}
