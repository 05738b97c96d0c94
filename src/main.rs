use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;

use surveyseg::pipeline::{run, AnalysisConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("SURVEYSEG_LOG", "warn,surveyseg=info"))
        .init();

    let matches = Command::new("surveyseg")
        .version(clap::crate_version!())
        .about("Exploratory K-means cluster analysis for survey rating data")
        .arg(
            Arg::new("input")
                .help("CSV file with a header row naming the variables")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed for every K-means fit")
                .value_parser(clap::value_parser!(u64))
                .default_value("1"),
        )
        .arg(
            Arg::new("restarts")
                .short('r')
                .long("restarts")
                .help("Independent K-means restarts per fit")
                .value_parser(clap::value_parser!(usize))
                .default_value("25"),
        )
        .arg(
            Arg::new("variable_clusters")
                .long("variable-clusters")
                .help("Cluster count for grouping the variables")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            Arg::new("segments")
                .short('s')
                .long("segments")
                .help("Segment count for the final student segmentation")
                .value_parser(clap::value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("sweep_min")
                .long("sweep-min")
                .help("Smallest segment count scored in the silhouette sweep")
                .value_parser(clap::value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("sweep_max")
                .long("sweep-max")
                .help("Largest segment count scored in the silhouette sweep")
                .value_parser(clap::value_parser!(usize))
                .default_value("20"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Standardize zero-variance columns to zero instead of failing")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = AnalysisConfig {
        input: matches
            .get_one::<PathBuf>("input")
            .expect("input is required")
            .clone(),
        seed: *matches.get_one::<u64>("seed").expect("defaulted"),
        restarts: *matches.get_one::<usize>("restarts").expect("defaulted"),
        variable_clusters: *matches
            .get_one::<usize>("variable_clusters")
            .expect("defaulted"),
        segments: *matches.get_one::<usize>("segments").expect("defaulted"),
        sweep: *matches.get_one::<usize>("sweep_min").expect("defaulted")
            ..=*matches.get_one::<usize>("sweep_max").expect("defaulted"),
        lenient_scaling: matches.get_flag("lenient"),
    };

    run(&config, io::stdout().lock())?;
    Ok(())
}
