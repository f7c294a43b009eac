mod git;
mod notes;
mod server;
mod settings;

use std::sync::Arc;

use crate::notes::NotesService;
use crate::server::ApiServer;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings::load_settings();
    log::info!("notes directory: {}", settings.notes_dir.display());

    let service = Arc::new(NotesService::open(&settings)?);
    let mut server = ApiServer::start(service, &settings)?;

    server.wait_for_interrupt();
    server.stop();

    Ok(())
}
