use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List registered config entries.
    List(ListArgs),
    /// Show the schema stored under a key.
    Show(ShowArgs),
    /// Build a config node from a stored schema.
    Instantiate(InstantiateArgs),
    /// Print the JSON Schema of the catalog file format.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only list entries of this group.
    #[arg(short, long)]
    pub group: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Entry key: `group/name`, or `name` for a root entry.
    pub key: String,
}

#[derive(Clone, Debug, Args)]
pub struct InstantiateArgs {
    /// Entry key: `group/name`, or `name` for a root entry.
    pub key: String,

    /// Field value as `field=value`; the value is parsed as JSON, falling
    /// back to a plain string.
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}
