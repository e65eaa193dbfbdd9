//! Print the OpenAPI document as JSON.

use clap::Parser;
use users_api::ApiDoc;
use utoipa::OpenApi;

/// Write the generated OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the Users API OpenAPI document")]
struct Args {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), serde_json::Error> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{json}");
    Ok(())
}
