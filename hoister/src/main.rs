//! The main module contains the code to process the command line for the hoister program and
//! run the struct hoisting transformation, the node query, or the node kind listing.

mod hoisting;
mod kinds_info;
mod querying;

use crate::hoisting::hoist_files;
use crate::kinds_info::display_kinds_info;
use crate::querying::query_files;
use chrono::Local;
use clap::{ArgGroup, Args, Parser, Subcommand};
use env_logger::TimestampPrecision;
use std::io::Write;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Promote nested anonymous structs in syntax trees to named types.")]
#[command(propagate_version = true)]
struct HoisterCommand {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    Hoist(HoistCLArgs),
    Query(QueryCLArgs),
    Kinds(KindsCLArgs),
}

/// Arguments for listing details about node kinds
#[derive(Args, Debug, Clone)]
#[command(group(
ArgGroup::new("info")
.required(true)
.args(["list", "describe"]),
))]
pub struct KindsCLArgs {
    /// List the node kinds
    #[arg(short, long)]
    pub list: bool,

    /// Describe the child slots of each node kind
    #[arg(short, long)]
    pub describe: bool,
}

/// Arguments for hoisting nested structs in JSON syntax trees or configuration files.
#[derive(Args, Debug, Clone)]
pub struct HoistCLArgs {
    /// Directory to store transformed syntax trees
    #[arg(short, long, default_value = "out")]
    pub output_directory: String,

    /// Input file(s) to transform, either JSON syntax trees or .hoist configuration files
    #[arg(short, long, required = true)]
    pub file_names: Vec<String>,

    /// Only hoist structs nested inside the named type
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Save the settings used to transform each file in a config (.hoist) file
    /// in the output directory
    #[arg(long)]
    pub save_config_files: bool,

    /// Write output to stdout instead of the directory given in `output_directory`.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for listing the nodes of one kind in JSON syntax trees.
#[derive(Args, Debug, Clone)]
pub struct QueryCLArgs {
    /// The node kind to look for, for example StructType
    #[arg(short, long, required = true)]
    pub kind: String,

    /// Input file(s) to search
    #[arg(short, long, required = true)]
    pub file_names: Vec<String>,
}

fn main() {
    let _ = env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .format_timestamp(Some(TimestampPrecision::Seconds))
        .try_init();

    let hoister_command = HoisterCommand::parse();
    match &hoister_command.command {
        Commands::Hoist(hoist_args) => {
            if let Err(e) = hoist_files(hoist_args.clone()) {
                println!("Unable to hoist structs: {}", e);
            }
        }
        Commands::Query(query_args) => {
            if let Err(e) = query_files(query_args.clone()) {
                println!("Unable to query nodes: {}", e);
            }
        }
        Commands::Kinds(kinds_args) => {
            display_kinds_info(kinds_args.clone());
        }
    }
}
