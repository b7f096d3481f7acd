//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::DEFAULT_OUTPUT_DIR;
use crate::converter::convert_directory_with;
use crate::error::Result;

/// OCGA to Akoma Ntoso - Convert the Georgia code archive to AKN XML.
#[derive(Parser)]
#[command(name = "ocga-akn")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every title file in a directory.
    Convert {
        /// Directory holding gov.ga.ocga.2018.title.<N>.xml files
        source: PathBuf,

        /// Output directory (default: rules-us-ga-akn/)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { source, output } => convert_command(&source, output.as_deref()),
    }
}

/// Execute the convert command.
fn convert_command(source: &Path, output: Option<&Path>) -> Result<()> {
    let output_dir = output.map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), Path::to_path_buf);

    println!(
        "{} {} into {}",
        style("Converting").bold(),
        style(source.display()).cyan(),
        style(output_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let report = convert_directory_with(source, &output_dir, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.index as u64);
        if let Some(name) = progress.file.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
    });
    pb.finish_and_clear();
    let report = report?;

    println!("  Titles processed: {}", report.titles_processed);
    println!("  Sections converted: {}", report.sections_converted);
    println!("  Files written: {}", report.files_written);
    if report.titles_failed > 0 {
        println!("  Failed: {}", style(report.titles_failed).yellow().bold());
    }

    println!();
    println!(
        "{} {}",
        style("Output:").green().bold(),
        report.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["ocga-akn", "convert", "/data/ocga"]);

        let Commands::Convert { source, output } = cli.command;
        assert_eq!(source, PathBuf::from("/data/ocga"));
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_convert_with_output() {
        let cli = Cli::parse_from(["ocga-akn", "convert", "/data/ocga", "--output", "out"]);

        let Commands::Convert { source, output } = cli.command;
        assert_eq!(source, PathBuf::from("/data/ocga"));
        assert_eq!(output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_requires_source() {
        assert!(Cli::try_parse_from(["ocga-akn", "convert"]).is_err());
    }
}
