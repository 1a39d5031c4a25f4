use std::process::ExitCode;

use folio::config::Settings;
use folio::error::{Chainable, Result};

mod flags;
mod render;

pub const CONFIG_FILE: &str = "folio.toml";

fn run(flags: flags::Quire) -> Result<usize> {
    let settings = match flags.config {
        Some(path) => Settings::read(path)?,
        None if std::path::Path::new(CONFIG_FILE).is_file() => Settings::read(CONFIG_FILE)?,
        None => Settings::default(),
    };

    log::debug!("settings: {settings:?}");
    let layout = settings.layout().chain_with(|| "failed to build layout")?;
    render::render_all(&flags.pages, &layout, flags.out.as_deref())
}

pub fn main() -> ExitCode {
    env_logger::init();

    let flags = flags::Quire::from_env_or_exit();
    if flags.pages.is_empty() {
        eprintln!("error: no pages to render");
        return ExitCode::FAILURE;
    }

    let start = std::time::Instant::now();
    match run(flags) {
        Ok(0) => {
            log::info!("render time: {}ms", start.elapsed().as_millis());
            ExitCode::SUCCESS
        }
        Ok(failures) => {
            eprintln!("{failures} page(s) failed to render");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
