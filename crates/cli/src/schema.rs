use clap::ValueEnum;
use stormscope_api::models::SyntaxNode;
use stormscope_api::runtime::ModelDump;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    /// Runtime model dump consumed by `--model`
    Model,
    /// Syntax tree produced by the parser command
    Tree,
}

pub fn run(format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let schema = match format {
        Format::Model => schemars::schema_for!(ModelDump),
        Format::Tree => schemars::schema_for!(SyntaxNode),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
