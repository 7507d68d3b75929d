use crate::cli::{Cli, Commands};
use crate::services::config::Settings;
use crate::services::server::serve;

pub fn handle_serve_command(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Commands::Serve { bind } = &cli.command else {
        return Ok(false);
    };

    let bind = bind.as_deref().unwrap_or(&settings.bind);
    // Blocking reqwest clients cannot be built inside the runtime.
    let gallery = settings.gallery()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(bind, gallery))?;
    Ok(true)
}
