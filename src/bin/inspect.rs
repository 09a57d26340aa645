//! nodestore Inspector
//!
//! Prints the contents of a snapshot through the namespace formatters.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nodestore::{Config, FlushPolicy, NodeError, NodeId, NodeRef, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// nodestore Inspector
#[derive(Parser, Debug)]
#[command(name = "nodestore-inspect")]
#[command(about = "Dump the nodes and namespaces of a nodestore snapshot")]
#[command(version)]
struct Args {
    /// Data directory holding nodes.snapshot
    #[arg(short, long, default_value = "./nodestore_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every node with its name
    Nodes,

    /// Show a node's scalar value
    Value {
        /// Node name, decimal id or 0x-prefixed hex id
        node: String,
    },

    /// Show a node's altvals
    Alt { node: String },

    /// Show a node's supvals
    Sup { node: String },

    /// Show a node's charvals
    Char { node: String },

    /// Show a node's hash entries
    Hash { node: String },

    /// Show a node's blob for a tag
    Blob {
        node: String,

        /// Blob tag (a single character or a number)
        tag: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,nodestore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> nodestore::Result<()> {
    let snapshot = args.data_dir.join("nodes.snapshot");
    if !snapshot.exists() {
        return Err(NodeError::NotFound(format!(
            "no snapshot at {}",
            snapshot.display()
        )));
    }

    // Manual flushing: the inspector never writes
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .flush_policy(FlushPolicy::Manual)
        .build();
    let store = Store::open(config)?;

    let output = match args.command {
        Commands::Nodes => store.nodes().repr()?,
        Commands::Value { node } => store.value().repr(resolve(&store, &node)?)?,
        Commands::Alt { node } => store.alt().repr(resolve(&store, &node)?)?,
        Commands::Sup { node } => store.sup().repr(resolve(&store, &node)?)?,
        Commands::Char { node } => store.chars().repr(resolve(&store, &node)?)?,
        Commands::Hash { node } => store.hash().repr(resolve(&store, &node)?)?,
        Commands::Blob { node, tag } => {
            store.blob().repr(resolve(&store, &node)?, parse_tag(&tag)?)?
        }
    };

    println!("{}", output);
    store.close()
}

/// "0x1f" and "31" are identities, anything else is a name
fn resolve(store: &Store, node: &str) -> nodestore::Result<NodeId> {
    let parsed = match node.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => node.parse::<u64>().ok(),
    };
    let node_ref = match parsed {
        Some(id) => NodeRef::Id(NodeId(id)),
        None => NodeRef::from(node),
    };
    store.nodes().resolve(node_ref)
}

fn parse_tag(tag: &str) -> nodestore::Result<u8> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && !c.is_ascii_digit() => Ok(c as u8),
        _ => tag
            .parse::<u8>()
            .map_err(|_| NodeError::InvalidType(format!("bad blob tag {:?}", tag))),
    }
}
