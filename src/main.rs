//! prosedom - Render JSON rich-text documents as HTML

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use prosedom::schema::basic;
use prosedom::{DomSerializer, HtmlOptions, SerializeOptions, read_json_document};

#[derive(Parser)]
#[command(name = "prosedom")]
#[command(version, about = "Render JSON rich-text documents as HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    prosedom doc.json                 Print the document as HTML
    prosedom doc.json -o doc.html     Write the HTML to a file
    prosedom doc.json --xhtml         Close void elements (<br/>)")]
struct Cli {
    /// Input document (JSON, basic schema)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file; prints to stdout when omitted
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Fail on broken mark templates instead of dropping the wrapper
    #[arg(long)]
    strict_marks: bool,

    /// Print void elements XHTML style
    #[arg(long)]
    xhtml: bool,

    /// Print only the content of the top node
    #[arg(long)]
    fragment: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match render(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn render(cli: &Cli) -> prosedom::Result<()> {
    let schema = basic::schema();
    let doc = read_json_document(&schema, &cli.input)?;
    let serializer = DomSerializer::from_schema(&schema);

    let options = if cli.strict_marks {
        SerializeOptions::new().strict_marks()
    } else {
        SerializeOptions::new()
    };
    let html_options = HtmlOptions { xhtml: cli.xhtml };

    // The basic doc node has no template of its own; print its content.
    let html = if cli.fragment || !serializer.has_node_template(doc.type_name()) {
        serializer.fragment_to_html(doc.content(), &options, &html_options)?
    } else {
        serializer.node_to_html(&doc, &options, &html_options)?
    };

    match &cli.output {
        Some(path) => fs::write(path, html)?,
        None => println!("{html}"),
    }
    Ok(())
}
