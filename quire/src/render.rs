use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use folio::error::{Chainable, Result};
use folio::{error, Html, Layout, Page, Parser};

/// Renders `paths` in parallel with `layout`, writing each result as it's
/// collected. Returns the number of pages that failed.
pub fn render_all(paths: &[PathBuf], layout: &Layout, out: Option<&Path>) -> Result<usize> {
    if let Some(out) = out {
        fs::create_dir_all(out).chain_with(|| error! {
            "failed to create output directory",
            "path" => out.display(),
        })?;
    }

    let mut pages: Vec<Page> = paths.iter().map(Page::deferred).collect();
    let results = Parser::new().parse_pages(&mut pages, Some(layout));

    let mut failures = 0;
    for (path, result) in paths.iter().zip(results) {
        let written = result
            .and_then(|html| write(path, &html, out))
            .chain_with(|| error! {
                "failed to render page",
                "path" => path.display(),
            });

        if let Err(e) = written {
            eprintln!("error: {e}");
            failures += 1;
        }
    }

    Ok(failures)
}

fn write(source: &Path, html: &Html, out: Option<&Path>) -> Result<()> {
    let Some(out) = out else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        return Ok(stdout.flush()?);
    };

    let stem = source.file_stem().ok_or_else(|| error! {
        "page path has no file name",
        "path" => source.display(),
    })?;

    let mut file_name = stem.to_os_string();
    file_name.push(".html");

    let target = out.join(file_name);
    fs::write(&target, html.as_bytes()).chain_with(|| error! {
        "failed to write output",
        "path" => target.display(),
    })?;

    log::info!("{} -> {}", source.display(), target.display());
    Ok(())
}
