use std::path::PathBuf;

xflags::xflags! {
    /// Render markdown pages to HTML.
    cmd quire {
        /// Markdown files to render.
        repeated pages: PathBuf
        /// Layout settings; defaults to `folio.toml` if present.
        optional -c, --config config: PathBuf
        /// Directory to write `<stem>.html` files into. Without it, HTML is
        /// printed to stdout.
        optional -o, --out out: PathBuf
    }
}
