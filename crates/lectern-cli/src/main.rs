mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lectern",
    version,
    about = "Turn lecture transcripts and documents into structured study notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text from a PDF, DOCX, PPTX, TXT or MD file
    Extract {
        /// Path to the input file
        input_file: PathBuf,

        /// Override the MIME type used for file-kind detection
        #[arg(long, value_name = "MIME")]
        mime: Option<String>,

        /// Write extracted text to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print extraction progress to stderr
        #[arg(long)]
        progress: bool,
    },
    /// Generate study notes from a file or raw transcript text
    Notes {
        /// Path to the input file
        input_file: PathBuf,

        /// Note format: summary, bullets, concepts, qna or outline
        #[arg(short, long, default_value = "summary")]
        format: lectern_core::NoteFormat,

        /// Title for the transcript (defaults to the file stem)
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Print pipeline progress to stderr
        #[arg(long)]
        progress: bool,
    },
    /// List the available note formats
    Formats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            mime,
            out,
            progress,
        } => commands::extract::run(input_file, mime.as_deref(), out, progress),
        Commands::Notes {
            input_file,
            format,
            title,
            output,
            progress,
        } => commands::notes::run(input_file, format, title, &output, progress),
        Commands::Formats => {
            for format in lectern_core::NoteFormat::ALL {
                println!("{format}");
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
