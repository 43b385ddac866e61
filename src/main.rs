use clap::Parser;
use log::info;

use quicknotes::{
    App, CategorySet, Cli, Config, ConsoleConfirmation, FileStorage, NoteStore, Result,
};

pub fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let backend = FileStorage::new(&config.data_dir)?;
    let mut store = NoteStore::new(Box::new(backend), CategorySet::default());
    let loaded = store.hydrate();
    info!("Store ready with {} notes", loaded);

    let mut app = App::new(store, config, cli.verbose, Box::new(ConsoleConfirmation));
    app.run(cli.command)
}

fn main() {
    initialize_logger();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
