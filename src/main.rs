use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use skyhook_linkgen::config::{GenerationSettings, StorageSettings, CHANNEL_ID};
use skyhook_linkgen::config_loader;
use skyhook_linkgen::links::FulfillmentStatus;
use skyhook_linkgen::orchestrator::generate_configs;
use skyhook_linkgen::output::{prepare_config_dir, FULFILLED_NM_REQUEST_FILE};
use skyhook_linkgen::registry::NodeRegistry;
use skyhook_linkgen::utils::{validate_nm_request, validate_range_config};

/// Generate genesis link configs for the Skyhook indirect channel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Range config of the physical network
    #[arg(long = "range")]
    range_config: PathBuf,

    /// Requested links from the network manager; generated from the range config when omitted
    #[arg(long)]
    nm_request: Option<PathBuf>,

    /// Where generated configs are stored
    #[arg(long, default_value = "./configs")]
    config_dir: PathBuf,

    /// Overwrite configs if they exist
    #[arg(long)]
    overwrite: bool,

    /// Disable server to server links
    #[arg(long = "disable-s2s")]
    disable_s2s: bool,

    /// Storage region written into link addresses
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// Bucket the creator fetches from
    #[arg(long, default_value = "<YOUR-BUCKET>/<YOUR-FETCH-OBJECT>")]
    fetch_bucket: String,

    /// Bucket the creator posts to
    #[arg(long, default_value = "<YOUR-BUCKET>/<YOUR-POST-OBJECT>")]
    post_bucket: String,

    /// Number of storage objects kept readable per link
    #[arg(long, default_value_t = 1)]
    open_objects: u32,

    /// Retry budget for fetch and post operations
    #[arg(long, default_value_t = 120)]
    max_tries: u32,
}

impl Args {
    fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            channel_id: CHANNEL_ID.to_string(),
            storage: StorageSettings {
                region: self.region.clone(),
                fetch_bucket: self.fetch_bucket.clone(),
                post_bucket: self.post_bucket.clone(),
                open_objects: self.open_objects,
                max_tries: self.max_tries,
            },
            disable_s2s: self.disable_s2s,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting genesis link generation for channel {}", CHANNEL_ID);
    info!("Range config: {:?}", args.range_config);
    info!("Config directory: {:?}", args.config_dir);

    let range_config = config_loader::load_range_config(&args.range_config)?;
    let registry = NodeRegistry::from_range_config(&range_config)
        .wrap_err("Range config validation failed")?;
    validate_range_config(&registry, true).wrap_err("Range config validation failed")?;

    let settings = args.settings();
    let nm_request = match &args.nm_request {
        Some(path) => config_loader::load_nm_request(path)?,
        None => config_loader::generate_nm_request(&registry, &settings.channel_id),
    };
    validate_nm_request(&nm_request, &registry).wrap_err("NM request validation failed")?;

    prepare_config_dir(&args.config_dir, args.overwrite)?;

    let report = generate_configs(&registry, &nm_request, &args.config_dir, &settings)?;

    if let FulfillmentStatus::Partial { .. } = report.status {
        info!(
            "Compare {:?} against the NM request to find links for other channels",
            args.config_dir.join(FULFILLED_NM_REQUEST_FILE)
        );
    }
    info!(
        "Genesis link generation complete: {} links created, {} of {} requests fulfilled",
        report.links_created, report.fulfilled, report.requested
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["skyhook-linkgen", "--range", "2x2.json"]);

        assert_eq!(args.range_config, PathBuf::from("2x2.json"));
        assert_eq!(args.config_dir, PathBuf::from("./configs"));
        assert_eq!(args.nm_request, None);
        assert!(!args.overwrite);
        assert_eq!(args.settings(), GenerationSettings::default());
    }

    #[test]
    fn test_full_args() {
        let args = Args::parse_from(&[
            "skyhook-linkgen",
            "--range", "2x2.json",
            "--nm-request", "request.json",
            "--config-dir", "out",
            "--overwrite",
            "--disable-s2s",
            "--region", "eu-west-1",
            "--fetch-bucket", "b/fetch",
            "--post-bucket", "b/post",
            "--open-objects", "3",
            "--max-tries", "9",
        ]);

        assert_eq!(args.nm_request, Some(PathBuf::from("request.json")));
        assert!(args.overwrite);

        let settings = args.settings();
        assert!(settings.disable_s2s);
        assert_eq!(settings.storage.region, "eu-west-1");
        assert_eq!(settings.storage.fetch_bucket, "b/fetch");
        assert_eq!(settings.storage.post_bucket, "b/post");
        assert_eq!(settings.storage.open_objects, 3);
        assert_eq!(settings.storage.max_tries, 9);
    }

    #[test]
    fn test_range_required() {
        assert!(Args::try_parse_from(&["skyhook-linkgen"]).is_err());
    }
}
