use std::process;

pub mod config;
pub mod error;
pub mod probe;
pub mod report;

use config::app_config::load_config;
use probe::runner::run;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let app = match load_config() {
        Ok(app) => app,
        Err(e) => {
            log::error!("configuration error: {e}");
            process::exit(2);
        }
    };

    let results = match run(&app.session, app.concurrency).await {
        Ok(results) => results,
        Err(e) => {
            log::error!("configuration error: {e}");
            process::exit(2);
        }
    };

    println!("{}", report::summary(&results));
    process::exit(app.session.fail_on.exit_code(&results));
}
