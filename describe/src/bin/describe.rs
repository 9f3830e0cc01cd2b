use clap::Parser;
use hipe_commons::{
    find_datasets_files, parse_tsv, report, write_tsv, HipeConfigBuilder, HipeError,
};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Describes HIPE datasets, and optionally writes a masked copy for a blind test release.
#[derive(Debug, Parser)]
struct Args {
    /// Corpus files to describe.
    paths: Vec<PathBuf>,
    /// URL of a corpus to describe, instead of local files.
    #[arg(short, long, conflicts_with_all = ["paths", "release_dir"])]
    url: Option<String>,
    /// Release folder holding one sub-folder per language. Its datasets are described too.
    #[arg(short, long)]
    release_dir: Option<PathBuf>,
    /// Hide the NERC annotations (requires `--mask-nel`).
    #[arg(long, default_value_t = false)]
    mask_nerc: bool,
    /// Hide the entity links and the nested entities.
    #[arg(long, default_value_t = false)]
    mask_nel: bool,
    /// Write the (masked) documents to this file. Only the first corpus is written.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the descriptions as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

fn run(args: Args) -> Result<(), HipeError> {
    let config = HipeConfigBuilder::new()
        .mask_nerc(args.mask_nerc)
        .mask_nel(args.mask_nel)
        .parallel(args.parallel)
        .build();
    info!("Using configuration:\n {}", config);

    let mut paths = args.paths;
    if let Some(release_dir) = &args.release_dir {
        paths.extend(find_datasets_files(release_dir)?);
    }
    let inputs: Vec<(Option<PathBuf>, Option<&str>)> = if paths.is_empty() {
        vec![(None, args.url.as_deref())]
    } else {
        paths.into_iter().map(|p| (Some(p), None)).collect()
    };

    let mut output = args.output;
    if output.is_some() && inputs.len() > 1 {
        warn!(
            "{} corpora are described but only the first one is written to the output file",
            inputs.len()
        );
    }
    for (path, url) in inputs {
        let documents = parse_tsv(path.as_deref(), url, &config)?;
        let name = path
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| url.map(String::from))
            .unwrap_or_default();
        let description = report(name, &documents);
        if args.json {
            match serde_json::to_string(&description) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Could not serialize the description: {}", e),
            }
        } else {
            println!("{}", description);
        }
        if let Some(output_path) = output.take() {
            write_tsv(&documents, output_path)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
