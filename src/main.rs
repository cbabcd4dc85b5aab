use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdf_chat::commands::{ask, chat, ingest, show_status};
use pdf_chat::config::{run_interactive_config, show_config};

#[derive(Parser)]
#[command(name = "pdf-chat")]
#[command(about = "Chat with your PDF documents using local models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure Ollama connection and settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Ingest PDF documents into the vector store
    Ingest {
        /// Directory holding the PDF files (defaults to the configured docs directory)
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question to answer from the ingested documents
        question: String,
    },
    /// Start an interactive chat session with conversation memory
    Chat,
    /// Show Ollama connectivity and vector store status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Ingest { docs_dir } => {
            ingest(docs_dir).await?;
        }
        Commands::Ask { question } => {
            ask(question).await?;
        }
        Commands::Chat => {
            chat().await?;
        }
        Commands::Status => {
            show_status().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["pdf-chat", "chat"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Chat);
        }
    }

    #[test]
    fn ask_command_with_question() {
        let cli = Cli::try_parse_from(["pdf-chat", "ask", "What color is the sky?"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ask { question } = parsed.command {
                assert_eq!(question, "What color is the sky?");
            }
        }
    }

    #[test]
    fn ask_command_requires_question() {
        let cli = Cli::try_parse_from(["pdf-chat", "ask"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn ingest_command_with_docs_dir() {
        let cli = Cli::try_parse_from(["pdf-chat", "ingest", "--docs-dir", "papers"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ingest { docs_dir } = parsed.command {
                assert_eq!(docs_dir, Some(PathBuf::from("papers")));
            }
        }
    }

    #[test]
    fn ingest_command_default_docs_dir() {
        let cli = Cli::try_parse_from(["pdf-chat", "ingest"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ingest { docs_dir } = parsed.command {
                assert_eq!(docs_dir, None);
            }
        }
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["pdf-chat", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["pdf-chat", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["pdf-chat", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
