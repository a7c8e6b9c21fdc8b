use clap::Parser;
use log::{error, info};
use neuroselect_core::cli::report::{ListingReport, SummaryReport};
use neuroselect_core::cli::{Cli, OutputFormat};
use neuroselect_core::convert::install_interrupt_handler;
use neuroselect_core::{
    ClassifierRules, Converter, ConverterOptions, IndexOptions, ListingRow, NeuroselectError,
    Orchestrator, OutputLayout, Result, SelectionRequest, SeriesSelector,
};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let rules = load_rules(&cli)?;
    let selector = SeriesSelector::new(
        rules,
        IndexOptions {
            parallel: cli.parallel,
        },
    )?;

    let converter = Converter::new(
        ConverterOptions {
            program: cli.converter.clone(),
            gzip: !cli.no_gzip,
            sidecar: !cli.no_json,
            timeout: None,
        }
        .with_timeout_secs(cli.timeout),
    );

    // The converter is only required when converting
    if !cli.list {
        converter.check_available()?;
    }

    info!("Scanning headers in {}", cli.input.display());
    let index = selector.scan(&cli.input)?;

    if cli.list {
        let rows = selector.listing(&index);
        return output_listing(&rows, cli.format);
    }

    let (bids_root, subject) = match (cli.bids_root, cli.subject) {
        (Some(root), Some(subject)) => (root, subject),
        _ => {
            return Err(NeuroselectError::ConfigError(
                "--bids-root and --subject are required unless --list is given".to_string(),
            ))
        }
    };
    let bids_root = std::path::absolute(&bids_root)?;

    let interrupt = install_interrupt_handler()?;
    let orchestrator = Orchestrator::new(
        converter.with_interrupt(interrupt),
        OutputLayout::new(bids_root, subject, cli.session),
    );

    let summary = selector.convert(
        &index,
        SelectionRequest {
            with_flair: cli.with_flair,
        },
        &orchestrator,
        |line| println!("{}", line),
    )?;

    println!("{}", SummaryReport::new(&summary));
    Ok(())
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

#[cfg(feature = "json")]
fn load_rules(cli: &Cli) -> Result<ClassifierRules> {
    match cli.rules {
        Some(ref path) => {
            info!("Loading classifier rules from {}", path.display());
            ClassifierRules::from_json_file(path)
        }
        None => Ok(ClassifierRules::default()),
    }
}

#[cfg(not(feature = "json"))]
fn load_rules(_cli: &Cli) -> Result<ClassifierRules> {
    Ok(ClassifierRules::default())
}

fn output_listing(rows: &[ListingRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", ListingReport::new(rows));
            Ok(())
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                println!("{}", serde_json::to_string_pretty(rows)?);
                Ok(())
            }
            #[cfg(not(feature = "json"))]
            {
                Err(NeuroselectError::ConfigError(
                    "JSON output requires the 'json' feature (cargo build --features json)"
                        .to_string(),
                ))
            }
        }
    }
}
