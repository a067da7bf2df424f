//! Annomark: a two-way converter between annotation documents and inline
//! bracket markup.
//!
//! An annotation document is plain text plus labeled spans (denotations),
//! optional relations between them, and an optional entity-type
//! dictionary. The inline encoding embeds the same information directly
//! in the text:
//!
//! ```text
//! [Elon Musk][Person] is a member of the [PayPal Mafia][Organization].
//! ```
//!
//! Entity-type dictionaries travel as reference-style definition blocks
//! (`[Person]: https://example.com/Person`) separated from the body by a
//! blank line.
//!
//! # Modules
//!
//! - [`model`]: the document model (Document, Denotation, Relation, ...)
//! - [`resolve`]: span validation and conflict resolution
//! - [`dict`]: the entity-type dictionary, from config or from text
//! - [`encode`] / [`decode`]: the two conversion directions
//! - [`io_json`]: JSON readers and writers for documents
//! - [`error`]: error types for annomark operations
//!
//! # Example
//!
//! ```
//! use annomark::model::{Denotation, Document};
//!
//! let doc = Document {
//!     text: Some("Elon Musk is here.".into()),
//!     denotations: vec![Denotation::new(0, 9, "Person")],
//!     ..Default::default()
//! };
//! let annotated = annomark::encode(&doc)?;
//! assert_eq!(annotated, "[Elon Musk][Person] is here.");
//!
//! let decoded = annomark::decode(&annotated);
//! assert_eq!(decoded.text.as_deref(), Some("Elon Musk is here."));
//! # Ok::<(), annomark::AnnomarkError>(())
//! ```

pub mod decode;
pub mod dict;
pub mod encode;
pub mod error;
pub mod io_json;
pub mod model;
pub mod resolve;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use decode::decode;
pub use encode::encode;
pub use error::AnnomarkError;

/// The annomark CLI application.
#[derive(Parser)]
#[command(name = "annomark")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Encode a document JSON file into inline-annotated text.
    Encode(EncodeArgs),

    /// Decode inline-annotated text into a document JSON.
    Decode(DecodeArgs),
}

/// Arguments for the encode subcommand.
#[derive(clap::Args)]
struct EncodeArgs {
    /// Input document JSON file ('-' for stdin).
    input: PathBuf,

    /// Write the annotated text to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

/// Arguments for the decode subcommand.
#[derive(clap::Args)]
struct DecodeArgs {
    /// Input annotated text file ('-' for stdin).
    input: PathBuf,

    /// Write the document JSON to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

/// Run the annomark CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AnnomarkError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Encode(args)) => run_encode(args),
        Some(Commands::Decode(args)) => run_decode(args),
        None => {
            println!("annomark {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Converts between annotation documents and inline bracket markup.");
            println!();
            println!("Run 'annomark --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the encode subcommand.
fn run_encode(args: EncodeArgs) -> Result<(), AnnomarkError> {
    let doc = if args.input.as_os_str() == "-" {
        let json = read_stdin()?;
        io_json::from_json_str(&json).map_err(|source| AnnomarkError::DocumentParse {
            path: args.input.clone(),
            source,
        })?
    } else {
        io_json::read_document(&args.input)?
    };

    let annotated = encode(&doc)?;

    match args.output {
        Some(path) => std::fs::write(path, annotated).map_err(AnnomarkError::Io)?,
        None => println!("{}", annotated),
    }
    Ok(())
}

/// Execute the decode subcommand.
fn run_decode(args: DecodeArgs) -> Result<(), AnnomarkError> {
    let source = if args.input.as_os_str() == "-" {
        read_stdin()?
    } else {
        std::fs::read_to_string(&args.input).map_err(AnnomarkError::Io)?
    };

    let doc = decode(&source);

    match args.output {
        Some(path) => io_json::write_document(&path, &doc)?,
        None => {
            let json =
                io_json::to_json_string(&doc).map_err(|source| AnnomarkError::DocumentWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn read_stdin() -> Result<String, AnnomarkError> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(AnnomarkError::Io)?;
    Ok(buf)
}
