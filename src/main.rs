use azure_vwan::azure::{AzCli, AzRestClient};
use azure_vwan::commands::{self, Cli};
use azure_vwan::config::Settings;
use azure_vwan::output::write_value;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::rc::Rc;

const LOG_CONFIG: &str = "log4rs.yml";

fn init_logging() -> Result<(), Box<dyn Error>> {
    if std::path::Path::new(LOG_CONFIG).exists() {
        log4rs::init_file(LOG_CONFIG, Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging()?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_subscription(cli.subscription.clone());
    let client = AzRestClient::new(&settings, Rc::new(AzCli))?;

    if let Some(value) = commands::execute(cli.command, &client)? {
        let value = azure_vwan::select(value, cli.select.as_deref())?;
        write_value(&value, cli.output, &mut std::io::stdout().lock())?;
    }
    Ok(())
}
