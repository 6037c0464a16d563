mod cache;
mod check;
mod schema;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stormscope_core::{CommandParser, IndexSource};
use stormscope_lsp::config::ServerConfig;

pub use cache::CacheCommands;

/// Parser program used when none is given.
pub const DEFAULT_PARSER_CMD: &str = "storm-parse";

#[derive(Parser)]
#[command(
    name = "stormscope",
    version,
    about = "Language intelligence for the Storm query language",
    long_about = "Stormscope analyzes Storm queries against a metadata index of library functions, \
                  form types, properties and commands. It serves diagnostics, completion, hover, \
                  document symbols and semantic highlighting over the Language Server Protocol."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the metadata index is cached and rebuilt from.
#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Directory holding the index cache (defaults to ~/.stormscope)
    #[arg(long, value_name = "DIR")]
    pub datadir: Option<PathBuf>,

    /// Runtime model dump (JSON) to build the index from
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Version of the running system; a cache built for another version is rebuilt
    #[arg(long, value_name = "VERSION")]
    pub system_version: Option<String>,
}

impl IndexArgs {
    pub fn source(&self) -> IndexSource {
        IndexSource {
            datadir: self.datadir.clone(),
            model: self.model.clone(),
            version: self.system_version.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    #[command(
        long_about = "Starts the language server on stdin/stdout. The metadata index is loaded from \
                            the cache after the client connects; initialization options and the \
                            client's `stormscope` settings override the flags given here."
    )]
    Lsp {
        #[command(flatten)]
        index: IndexArgs,

        /// Command that parses Storm source from stdin into a JSON syntax tree
        #[arg(long, value_name = "COMMAND", default_value = DEFAULT_PARSER_CMD)]
        parser_cmd: String,
    },
    /// Manage the metadata index cache
    #[command(subcommand)]
    Cache(CacheCommands),
    /// Analyze one query and print its diagnostics
    #[command(
        long_about = "Reads a JSON syntax tree (or Storm source, with --parser-cmd) and prints the \
                            diagnostics the language server would publish for it."
    )]
    Check {
        /// Query file: a JSON syntax tree, or source text when --parser-cmd is set
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        index: IndexArgs,

        /// Parse FILE as Storm source with this command
        #[arg(long, value_name = "COMMAND")]
        parser_cmd: Option<String>,

        /// Also print the semantic tokens
        #[arg(long)]
        tokens: bool,
    },
    /// Print the JSON schema of an interchange format
    Schema {
        #[arg(value_enum, default_value = "model")]
        format: schema::Format,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (component, to_stderr) = match &cli.command {
        Commands::Lsp { .. } => ("lsp", false),
        _ => ("cli", true),
    };
    let _guard = stormscope_core::logging::init_logging(component, to_stderr);

    match cli.command {
        Commands::Lsp { index, parser_cmd } => {
            let parser = Arc::new(CommandParser::new(&parser_cmd)?);
            let defaults = ServerConfig {
                datadir: index.datadir,
                model: index.model,
                system_version: index.system_version,
            };

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(stormscope_lsp::run_server(parser, defaults))
        }
        Commands::Cache(cmd) => cache::run(cmd),
        Commands::Check {
            file,
            index,
            parser_cmd,
            tokens,
        } => check::run(&file, &index, parser_cmd.as_deref(), tokens),
        Commands::Schema { format } => schema::run(format),
    }
}
