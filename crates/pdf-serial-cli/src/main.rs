mod logger;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use logger::CliLogger;
use pdf_serial::{
    BatchManifest, BatchPlan, BatchStatistics, Pass, PrintBackend, PrintOptions, SourceDocument,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pdfsp",
    about = "Print PDFs front/back with 2 pages per landscape sheet on a single-sided printer",
    after_help = "Run with --list-printers to find your exact printer name.",
    version
)]
struct Cli {
    /// Directory containing PDF files
    #[arg(required_unless_present = "list_printers")]
    directory: Option<PathBuf>,

    /// Side to print
    #[arg(value_enum, required_unless_present = "list_printers")]
    side: Option<SideArg>,

    /// Printer name (default: "EPSON L130 Series")
    #[arg(long)]
    printer: Option<String>,

    /// List all available printers and exit
    #[arg(long)]
    list_printers: bool,

    /// JSON options file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print backend
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Path to SumatraPDF
    #[arg(long)]
    sumatra: Option<PathBuf>,

    /// Print in colour instead of black & white
    #[arg(long)]
    color: bool,

    /// Print at actual size instead of fitting the sheet to the paper
    #[arg(long)]
    no_fit: bool,

    /// Record the batch on the front pass and check it on the back pass
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Keep rendered sheets in this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Show the plan and statistics only, don't print
    #[arg(long)]
    dry_run: bool,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Front,
    Back,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Sumatra,
    Spooler,
}

impl From<SideArg> for Pass {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Front => Self::Front,
            SideArg::Back => Self::Back,
        }
    }
}

impl From<BackendArg> for pdf_serial::BackendPreference {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Self::Auto,
            BackendArg::Sumatra => Self::Sumatra,
            BackendArg::Spooler => Self::Spooler,
        }
    }
}

impl Cli {
    async fn options(&self) -> Result<PrintOptions> {
        let mut options = match &self.config {
            Some(path) => PrintOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => PrintOptions::default(),
        };

        if let Some(printer) = &self.printer {
            options.printer = printer.clone();
        }
        if let Some(backend) = self.backend {
            options.backend = backend.into();
        }
        if let Some(sumatra) = &self.sumatra {
            options.sumatra_path = Some(sumatra.clone());
        }
        if self.color {
            options.monochrome = false;
        }
        if self.no_fit {
            options.fit_to_page = false;
        }
        if let Some(dir) = &self.save_dir {
            options.save_dir = Some(dir.clone());
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::init(CliLogger::level_for(cli.verbose, cli.quiet))?;

    if cli.list_printers {
        let printers = pdf_serial::list_printers().await?;
        println!("Available printers:");
        for printer in printers {
            println!("  - {}", printer);
        }
        return Ok(());
    }

    let options = cli.options().await?;
    let (Some(directory), Some(side)) = (&cli.directory, cli.side) else {
        anyhow::bail!("A directory and a side (front|back) are required");
    };
    let directory = pdf_serial::expand_home(directory);
    let pass = Pass::from(side);

    let documents = pdf_serial::discover_documents(&directory).await?;
    if pass == Pass::Back {
        if let Some(path) = &cli.manifest {
            check_manifest(path, &documents).await?;
        }
    }

    // Plan everything up front; an invalid document aborts before any job
    let batch = pdf_serial::align_batch(&documents, pass)?;
    let stats = pdf_serial::calculate_statistics(&batch);

    println!(
        "Found {} PDF file(s) in '{}'",
        documents.len(),
        directory.display()
    );
    println!("Printer  : {}", options.printer);
    println!("Side     : {}", pass);
    println!("Mode     : {}", options.mode_description());

    if cli.dry_run {
        // print_batch validates on a real run
        options.validate()?;
        print_plan(&batch);
        print_statistics(&stats);
        return Ok(());
    }

    let backend = pdf_serial::select_backend(&options)?;
    println!("Backend  : {}", backend.name());

    let reports = pdf_serial::print_batch(&documents, pass, &options, backend.as_ref()).await?;

    if pass == Pass::Front {
        if let Some(path) = &cli.manifest {
            BatchManifest::from_documents(&documents)
                .save(path)
                .await
                .with_context(|| format!("Failed to write manifest '{}'", path.display()))?;
            log::info!("Batch recorded in {}", path.display());
        }
    }

    for report in &reports {
        if let Some(artifact) = &report.artifact {
            println!("Saved {} → {}", report.document, artifact.display());
        }
    }
    print_statistics(&stats);
    println!("All done! {} job(s) sent.", reports.len());

    Ok(())
}

async fn check_manifest(path: &Path, documents: &[SourceDocument]) -> Result<()> {
    if !path.exists() {
        log::warn!(
            "Manifest '{}' not found; trusting the directory listing",
            path.display()
        );
        return Ok(());
    }

    let manifest = BatchManifest::load(path)
        .await
        .with_context(|| format!("Failed to read manifest '{}'", path.display()))?;
    manifest.verify(documents)?;
    log::info!("Batch matches the front pass manifest");
    Ok(())
}

fn print_plan(batch: &BatchPlan) {
    println!("Plan ({} pass):", batch.pass);
    for plan in &batch.plans {
        let sheets: Vec<String> = plan.sheets.iter().map(|s| format!("[{}]", s)).collect();
        println!(
            "  {} ({} pages): {}",
            plan.document,
            plan.page_count,
            sheets.join(" ")
        );
    }
}

fn print_statistics(stats: &BatchStatistics) {
    println!("Statistics:");
    println!("  Documents: {}", stats.documents);
    println!("  Source pages: {}", stats.source_pages);
    println!("  Physical sheets (both passes): {}", stats.physical_sheets);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Pages printed: {}", stats.pages_selected);
    println!("  Blank sheets added: {}", stats.blank_sheets);
}
