use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "Combine PDFs n-up with a TOC and bookmarks", version)]
struct Cli {
    /// Output PDF file
    #[arg(short, long)]
    output: PathBuf,

    /// Cover PDF prepended verbatim; also enables the table of contents
    #[arg(short, long)]
    cover: Option<PathBuf>,

    /// JSON manifest of input files and their n-up modes
    #[arg(short, long)]
    details: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = pdf_nup::load_manifest(&cli.details).await?;
    log::info!("{} input documents", inputs.len());

    let options = pdf_nup::AssemblyOptions {
        inputs,
        cover: cli.cover,
        output: cli.output.clone(),
    };
    pdf_nup::run(options).await?;

    println!("Combined → {}", cli.output.display());
    Ok(())
}
