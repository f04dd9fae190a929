use bigcluster_rs::config::{ClusterConfig, ConfigOverrides, CONFIG_PATH_ENV};
use bigcluster_rs::BigCluster;
use tracing_subscriber::EnvFilter;

fn parse_arg(flag: &str) -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == flag {
            return args.next();
        }
    }
    None
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|arg| arg == flag)
}

fn print_help() {
    eprintln!(
        r#"bigcluster - maximum k clustering of bit strings by Hamming spacing

USAGE:
    bigcluster [OPTIONS]

OPTIONS:
    -c, --config <FILE>       Path to config file (TOML)
    -i, --input <FILE>        Node file [default: clustering_big.txt]
    -s, --min-spacing <N>     Minimum spacing between clusters [default: 3]
        --sequential          Generate neighbors on a single thread
        --dedup-edges         Keep one orientation per edge
        --log <FILTER>        Log filter when RUST_LOG is unset [default: info]
    -h, --help                Print help

ENVIRONMENT:
    BIGCLUSTER_CONFIG         Path to config file
    BIGCLUSTER_INPUT          Node file
    BIGCLUSTER_MIN_SPACING    Minimum spacing

INPUT FORMAT:
    <node count> <bits per node>
    0 1 1 0 0 1 ...
    ...
"#
    );
}

fn main() -> anyhow::Result<()> {
    if has_flag("-h") || has_flag("--help") {
        print_help();
        return Ok(());
    }

    let mut overrides = ConfigOverrides::default();
    if let Some(input) = parse_arg("--input").or_else(|| parse_arg("-i")) {
        overrides.input = Some(input.into());
    }
    if let Some(spacing) = parse_arg("--min-spacing").or_else(|| parse_arg("-s")) {
        overrides.min_spacing = Some(spacing.parse()?);
    }
    if has_flag("--sequential") {
        overrides.parallel = Some(false);
    }
    if has_flag("--dedup-edges") {
        overrides.dedup_edges = Some(true);
    }
    overrides.log_filter = parse_arg("--log");

    // Load config: CLI > Env > File > Defaults
    let config_path = parse_arg("--config")
        .or_else(|| parse_arg("-c"))
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    let config = ClusterConfig::load(config_path.as_deref(), overrides)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let runner = BigCluster::new(config)?;
    let outcome = runner.run()?;

    eprintln!("Initialized clustering in {:?}", outcome.timings.load);
    eprintln!("Added relevant edges in {:?}", outcome.timings.discover);
    eprintln!("Calculated k in {:?}", outcome.timings.cluster);
    eprintln!("Total {:?}", outcome.timings.total());
    println!("{}", outcome.k);

    Ok(())
}
