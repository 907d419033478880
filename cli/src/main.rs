//! docsort CLI - split scanned mail bundles into named PDFs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsort::classify::{is_yymmdd, to_yymmdd, today_yymmdd, Resolver};
use docsort::{ClassifiedPage, CompanyList, Docsort, JsonFormat, Mode, ReviewPlan, SourceDocument};

/// Column holding company names in a spreadsheet list.
const DEFAULT_COLUMN: &str = "会社名";

#[derive(Parser)]
#[command(name = "docsort")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split scanned mail bundles into named PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an editable review plan with suggested classifications
    Suggest {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output plan file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        classify: ClassifyArgs,
    },

    /// Show the groups and file names a split would produce
    Preview {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Reviewed plan (suggestions are used if not specified)
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,

        /// Print the planned outputs as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        classify: ClassifyArgs,
    },

    /// Split the bundle and write one PDF per document
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Reviewed plan (suggestions are used if not specified)
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Extract outputs one at a time
        #[arg(long)]
        sequential: bool,

        /// Do not write the excluded-pages output
        #[arg(long)]
        no_excluded: bool,

        #[command(flatten)]
        classify: ClassifyArgs,
    },

    /// Show page count and the fields detected on each page
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        classify: ClassifyArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Company list (.xlsx/.xls/.ods, or text with one name per line)
    #[arg(long, value_name = "FILE", env = "DOCSORT_COMPANIES")]
    companies: Option<PathBuf>,

    /// Spreadsheet column holding company names
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COLUMN)]
    column: String,

    /// Date for the first envelope (YYMMDD, YYYY-MM-DD or "today")
    #[arg(long, value_name = "DATE")]
    date: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Suggest {
            input,
            output,
            classify,
        } => cmd_suggest(&input, output.as_deref(), &classify),
        Commands::Preview {
            input,
            plan,
            json,
            classify,
        } => cmd_preview(&input, plan.as_deref(), json, &classify),
        Commands::Split {
            input,
            plan,
            output,
            sequential,
            no_excluded,
            classify,
        } => cmd_split(
            &input,
            plan.as_deref(),
            output.as_deref(),
            sequential,
            no_excluded,
            &classify,
        ),
        Commands::Info { input, classify } => cmd_info(&input, &classify),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_docsort(args: &ClassifyArgs) -> Result<Docsort, Box<dyn std::error::Error>> {
    let mut docsort = Docsort::new();

    if let Some(path) = &args.companies {
        let companies = load_companies(path, &args.column)?;
        log::info!(
            "Loaded {} companies from {}",
            companies.len(),
            path.display()
        );
        docsort = docsort.with_companies(companies);
    }

    if let Some(date) = &args.date {
        docsort = docsort.with_default_date(parse_date(date)?);
    }

    Ok(docsort)
}

fn load_companies(path: &Path, column: &str) -> Result<CompanyList, Box<dyn std::error::Error>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(CompanyList::from_spreadsheet(path, column)?),
        _ => Ok(CompanyList::from_lines(&fs::read_to_string(path)?)),
    }
}

fn parse_date(value: &str) -> Result<String, Box<dyn std::error::Error>> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(today_yymmdd());
    }
    let date = if is_yymmdd(value) {
        value.to_string()
    } else {
        to_yymmdd(value)
    };
    if !is_yymmdd(&date) {
        return Err(format!("Invalid date '{}': expected YYMMDD or YYYY-MM-DD", value).into());
    }
    Ok(date)
}

/// Pages of `input` classified by the plan, or by suggestions without one.
fn classified_pages(
    docsort: &Docsort,
    source: &SourceDocument,
    plan: Option<&Path>,
) -> Result<Vec<ClassifiedPage>, Box<dyn std::error::Error>> {
    let pages = source.pages()?;
    match plan {
        Some(path) => Ok(ReviewPlan::load(path)?.apply(&pages)?),
        None => Ok(docsort.suggest(&pages)?),
    }
}

fn cmd_suggest(
    input: &Path,
    output: Option<&Path>,
    args: &ClassifyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let docsort = build_docsort(args)?;
    let source = docsort.open(input)?;
    let classified = docsort.suggest(&source.pages()?)?;
    let json = ReviewPlan::from_classified(&classified).to_json(JsonFormat::Pretty)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} pages)",
            "Saved to".green(),
            path.display(),
            classified.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_preview(
    input: &Path,
    plan: Option<&Path>,
    json: bool,
    args: &ClassifyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let docsort = build_docsort(args)?;
    let source = docsort.open(input)?;
    let classified = classified_pages(&docsort, &source, plan)?;
    let outputs = docsort.preview(&classified);

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    println!("{}", "Planned Outputs".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for output in &outputs {
        let name = if output.is_excluded {
            output.file_name.yellow()
        } else {
            output.file_name.normal()
        };
        println!(
            "{:>3}  {}  {}",
            output.id,
            name,
            format!("pages {:?}", output.page_numbers).dimmed()
        );
    }
    println!();
    println!(
        "{}: {} outputs from {} pages",
        "Total".bold(),
        outputs.len(),
        classified.len()
    );

    Ok(())
}

fn cmd_split(
    input: &Path,
    plan: Option<&Path>,
    output: Option<&Path>,
    sequential: bool,
    no_excluded: bool,
    args: &ClassifyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut docsort = build_docsort(args)?;
    if sequential {
        docsort = docsort.sequential();
    }
    if no_excluded {
        docsort = docsort.without_excluded();
    }

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_split", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let source = docsort.open(input)?;
    let classified = classified_pages(&docsort, &source, plan)?;
    let groups = docsort.group(&classified);
    let assembler = docsort.assembler();
    let planned = assembler.plan(&groups);

    let pb = ProgressBar::new(planned.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Extracting...");

    let assembly = assembler.assemble_planned(&source, planned, |document| {
        pb.set_message(document.file_name.clone());
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    for output in &assembly.outputs {
        fs::write(output_dir.join(&output.document.file_name), &output.data)?;
    }
    let manifest = assembly.manifest();
    fs::write(
        output_dir.join("manifest.json"),
        docsort::json::to_json(&manifest, JsonFormat::Pretty)?,
    )?;

    println!("\n{}", "Output files:".green().bold());
    for (i, output) in manifest.outputs.iter().enumerate() {
        let branch = if i + 1 == manifest.outputs.len() && manifest.failures.is_empty() {
            "└─"
        } else {
            "├─"
        };
        println!(
            "  {} {} {}",
            branch.dimmed(),
            output.file_name,
            format!("({} pages)", output.page_count()).dimmed()
        );
    }
    for failure in &manifest.failures {
        println!(
            "  {} {} {}",
            "├─".dimmed(),
            failure.file_name.red(),
            failure.error.dimmed()
        );
    }
    println!("\n{} {}", "Saved to".green(), output_dir.display());

    if !manifest.is_complete() {
        return Err(format!("{} outputs could not be extracted", manifest.failures.len()).into());
    }

    Ok(())
}

fn cmd_info(input: &Path, args: &ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let docsort = build_docsort(args)?;
    let source = docsort.open(input)?;
    let classified = docsort.suggest(&source.pages()?)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());
    println!("{}: {}", "Companies".bold(), docsort.companies().len());

    println!();
    println!("{}", "Detected Fields".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let resolver = Resolver::new(&classified);
    for (index, page) in classified.iter().enumerate() {
        let c = &page.classification;
        let resolved = resolver.resolved(index);
        let mode = match c.mode {
            Mode::Envelope => c.mode.as_str().green(),
            Mode::Document => c.mode.as_str().cyan(),
            Mode::Same => c.mode.as_str().dimmed(),
        };
        println!(
            "{:>4}  {:<8}  {} | {} | {} | {}",
            page.page_number(),
            mode,
            or_dash(&resolved.date),
            or_dash(&resolved.company_name),
            or_dash(&resolved.document_type),
            or_dash(&resolved.person_name)
        );
    }

    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn cmd_version() {
    println!("{} {}", "docsort".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Scanned mail bundle splitter");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/docsort".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("240105").unwrap(), "240105");
        assert_eq!(parse_date("2024-01-05").unwrap(), "240105");
        assert_eq!(parse_date("TODAY").unwrap().len(), 6);
        assert!(parse_date("2024/01/05").is_err());
        assert!(parse_date("241340").is_err());
    }

    #[test]
    fn test_load_companies_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companies.txt");
        fs::write(&path, "株式会社サンプル\n\nテスト工業\n株式会社サンプル\n").unwrap();
        let companies = load_companies(&path, DEFAULT_COLUMN).unwrap();
        assert_eq!(companies.as_slice(), &["株式会社サンプル", "テスト工業"]);
    }

    #[test]
    fn test_cli_parses_split() {
        let cli = Cli::try_parse_from([
            "docsort",
            "split",
            "bundle.pdf",
            "--plan",
            "plan.json",
            "-o",
            "out",
            "--sequential",
            "--date",
            "today",
        ])
        .unwrap();
        match cli.command {
            Commands::Split {
                sequential,
                no_excluded,
                plan,
                classify,
                ..
            } => {
                assert!(sequential);
                assert!(!no_excluded);
                assert_eq!(plan, Some(PathBuf::from("plan.json")));
                assert_eq!(classify.column, DEFAULT_COLUMN);
                assert_eq!(classify.date.as_deref(), Some("today"));
            }
            _ => panic!("expected split"),
        }
    }
}
