use env_logger::Env;
use std::error::Error;
use tandem::Config;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Runs until the process is killed.
    let running = tandem::start(Config::default())?;
    running.join();

    Ok(())
}
