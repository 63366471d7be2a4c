use crate::error::SyncResult;
use crate::sync::SheetSync;
use crate::types::StructureModel;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

fn open_sync(
    file: &PathBuf,
    sheet: Option<&str>,
    header_row: Option<u32>,
) -> SyncResult<SheetSync> {
    let mut sync = match header_row {
        Some(row) => SheetSync::open_with_header_row(file, row)?,
        None => SheetSync::open(file)?,
    };
    if let Some(name) = sheet {
        sync.select_sheet(name)?;
    }
    Ok(sync)
}

fn print_structure(structure: &StructureModel) {
    println!(
        "   Header row: {}",
        structure.header_row.to_string().bold()
    );
    if structure.columns.is_empty() {
        println!("   {}", "(blank sheet - no columns)".yellow());
        return;
    }
    for column in &structure.columns {
        let name = if column.name.is_empty() {
            "(unnamed)".dimmed().to_string()
        } else {
            column.name.cyan().to_string()
        };
        println!(
            "   {:>3}  {}  [{}]",
            column.index,
            name,
            column.inferred_type.to_string().bright_blue()
        );
    }
}

/// Execute the extract command: print the sheet's structure
pub fn extract(
    file: PathBuf,
    sheet: Option<String>,
    header_row: Option<u32>,
) -> SyncResult<()> {
    println!("{}", "📊 SheetSync - Structure".bold().green());
    println!("   File: {}", file.display());

    let mut sync = open_sync(&file, sheet.as_deref(), header_row)?;
    println!("   Sheet: {}\n", sync.sheet().bright_blue().bold());

    let structure = sync.extract_structure(None)?;
    print_structure(&structure);
    Ok(())
}

/// Execute the export command: persist the structure to JSON or YAML
pub fn export(
    file: PathBuf,
    output: PathBuf,
    sheet: Option<String>,
    header_row: Option<u32>,
) -> SyncResult<()> {
    println!("{}", "💾 SheetSync - Export structure".bold().green());
    println!("   File: {}", file.display());

    let mut sync = open_sync(&file, sheet.as_deref(), header_row)?;
    sync.export_structure(&output, None)?;

    println!("   {} {}", "Written:".green(), output.display());
    Ok(())
}

/// Execute the compare command. Returns whether the structures match so
/// the binary can exit nonzero on a mismatch.
pub fn compare(
    file: PathBuf,
    structure_file: PathBuf,
    sheet: Option<String>,
    header_row: Option<u32>,
    adopt_header_row: bool,
) -> SyncResult<bool> {
    println!("{}", "🔍 SheetSync - Compare structure".bold().green());
    println!("   File: {}", file.display());
    println!("   Against: {}\n", structure_file.display());

    let mut sync = open_sync(&file, sheet.as_deref(), header_row)?;
    // An explicit --header-row wins over adopting the saved one
    if adopt_header_row && header_row.is_none() {
        sync.load_structure(&structure_file)?;
    }
    let result = sync.compare_structure(&structure_file, header_row)?;

    if result.is_matching {
        println!("{}", "✅ Structure matches".bold().green());
    } else {
        println!(
            "{}",
            format!("❌ {} difference(s) found:", result.issues.len())
                .bold()
                .red()
        );
        for issue in &result.issues {
            println!("   - {}", issue);
        }
    }
    Ok(result.is_matching)
}

/// Execute the validate command against a JSON Schema file
pub fn validate(
    file: PathBuf,
    schema_file: PathBuf,
    sheet: Option<String>,
    header_row: Option<u32>,
) -> SyncResult<bool> {
    println!("{}", "🧪 SheetSync - Validate structure".bold().green());
    println!("   File: {}", file.display());
    println!("   Schema: {}\n", schema_file.display());

    let schema: serde_json::Value = serde_json::from_str(&fs::read_to_string(&schema_file)?)?;

    let mut sync = open_sync(&file, sheet.as_deref(), header_row)?;
    let (is_valid, issues) = sync.validate_structure(Some(&schema), None)?;

    if is_valid {
        println!("{}", "✅ Structure is valid".bold().green());
    } else {
        println!(
            "{}",
            format!("❌ {} validation issue(s):", issues.len()).bold().red()
        );
        for issue in &issues {
            println!("   - {}", issue);
        }
    }
    Ok(is_valid)
}

/// Execute the dump command: YAML content export with schema annotation
pub fn dump(
    file: PathBuf,
    output: PathBuf,
    sheet: Option<String>,
    header_row: Option<u32>,
) -> SyncResult<()> {
    println!("{}", "📤 SheetSync - YAML dump".bold().green());
    println!("   File: {}", file.display());

    let mut sync = open_sync(&file, sheet.as_deref(), header_row)?;
    sync.export_to_yaml(&output, None)?;

    println!("   {} {}", "Written:".green(), output.display());
    Ok(())
}
