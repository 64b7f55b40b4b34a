use brand_logo_fetcher::{CommonsClient, Config, LogoPipeline, WikidataClient};
use clap::Parser;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = Config::parse();
    config.validate()?;

    println!("Brand Logo Fetcher");
    println!("==================\n");
    config.print_summary();

    let http = config.http_client()?;
    let wikidata = WikidataClient::new(&http, &config.wikidata_api, config.query_timeout());
    let commons = CommonsClient::new(
        &http,
        &config.commons_base,
        config.thumb_width,
        config.download_timeout(),
    );

    let pipeline = LogoPipeline::new(
        &wikidata,
        &commons,
        &config.languages,
        config.candidate_limit,
        &config.output_dir,
    );
    let summary = pipeline.run_file(&config.brands_file)?;

    for line in summary.report_lines() {
        println!("{}", line);
    }

    std::process::exit(summary.exit_code());
}
