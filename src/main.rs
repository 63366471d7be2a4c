use clap::{Parser, Subcommand};
use sheetsync::cli;
use sheetsync::error::SyncResult;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "sheetsync")]
#[command(about = "Excel workbook structure extraction, comparison and validation")]
#[command(long_about = "SheetSync - Manage Excel sheets with predefined structures

Extract a workbook's structure (header row, column names, inferred column
types), save it as a portable JSON/YAML file, and later check that the
workbook still matches it.

COMMANDS:
  extract   - Print a sheet's structure
  export    - Save the structure to a JSON or YAML file
  compare   - Diff the live structure against a saved one
  validate  - Check the structure against a JSON Schema
  dump      - Export sheet content as YAML annotated with the schema

EXAMPLES:
  sheetsync extract report.xlsx --header-row 3
  sheetsync export report.xlsx -o report.structure.json
  sheetsync compare report.xlsx report.structure.json
  sheetsync dump report.xlsx -o report.yaml")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a sheet's structure
    Extract {
        /// Path to the Excel file
        file: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based row containing the headers (default: 1)
        #[arg(long)]
        header_row: Option<u32>,
    },

    /// Save the structure to a JSON or YAML file
    Export {
        /// Path to the Excel file
        file: PathBuf,

        /// Output path (.json, .yaml or .yml)
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based row containing the headers (default: 1)
        #[arg(long)]
        header_row: Option<u32>,
    },

    #[command(long_about = "Diff the live workbook structure against a saved structure file.

Differences are reported per column (missing, extra, renamed, retyped)
plus a header-row check. Exits with status 1 when the structures differ.

By default the comparison extracts with the saved file's header row;
pass --header-row to override, or --no-adopt-header-row to extract with
header row 1 regardless of the saved file.")]
    /// Diff the live structure against a saved one
    Compare {
        /// Path to the Excel file
        file: PathBuf,

        /// Path to the saved structure file
        structure: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based row containing the headers (default: the saved file's)
        #[arg(long)]
        header_row: Option<u32>,

        /// Do not adopt the saved structure's header row for extraction
        #[arg(long)]
        no_adopt_header_row: bool,
    },

    /// Check the structure against a JSON Schema
    Validate {
        /// Path to the Excel file
        file: PathBuf,

        /// Path to the JSON Schema file
        #[arg(long)]
        schema: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based row containing the headers (default: 1)
        #[arg(long)]
        header_row: Option<u32>,
    },

    /// Export sheet content as YAML annotated with the schema
    Dump {
        /// Path to the Excel file
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based row containing the headers (default: 1)
        #[arg(long)]
        header_row: Option<u32>,
    },
}

fn main() -> SyncResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            sheet,
            header_row,
        } => cli::extract(file, sheet, header_row),

        Commands::Export {
            file,
            output,
            sheet,
            header_row,
        } => cli::export(file, output, sheet, header_row),

        Commands::Compare {
            file,
            structure,
            sheet,
            header_row,
            no_adopt_header_row,
        } => {
            let matching =
                cli::compare(file, structure, sheet, header_row, !no_adopt_header_row)?;
            if !matching {
                process::exit(1);
            }
            Ok(())
        }

        Commands::Validate {
            file,
            schema,
            sheet,
            header_row,
        } => {
            let valid = cli::validate(file, schema, sheet, header_row)?;
            if !valid {
                process::exit(1);
            }
            Ok(())
        }

        Commands::Dump {
            file,
            output,
            sheet,
            header_row,
        } => cli::dump(file, output, sheet, header_row),
    }
}
