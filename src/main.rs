mod config;
mod engine;
mod gateway;
mod library;
mod mpris;
mod player;
mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    runtime::run()
}
