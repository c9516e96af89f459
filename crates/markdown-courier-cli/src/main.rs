use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use futures::executor::block_on;
use markdown_courier_config::Config;
use markdown_courier_engine::{
    ContentSource, FsContentSource, MemoryBuffer, NoRasterizer, RenderOutput, Severity,
    render_markdown,
};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical markdown
    Markdown,
    /// Canonical markdown prefixed by the table of contents
    Raw,
    /// Element tree serialized as HTML
    Html,
    /// Table of contents only
    Toc,
}

/// Render a markdown document to canonical markdown or HTML.
#[derive(Debug, Parser)]
#[command(name = "markdown-courier", version, about)]
struct Args {
    /// Markdown file to render
    input: PathBuf,

    /// Config file (defaults to ~/.config/markdown-courier/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Skip the table of contents in raw output
    #[arg(long)]
    no_toc: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} not found", path.display()))?,
        None => Config::load()?,
    };
    if args.no_toc {
        config.render.create_toc = false;
    }

    let (root, file) = split_input(&args.input)?;
    let source = FsContentSource::new(root)?;
    let text = source.read_document(&file)?;
    let mut host = MemoryBuffer::new(text.as_str());

    log::debug!(
        "rendering {} with assets in {}",
        args.input.display(),
        config.render.asset_directory
    );
    let out = block_on(render_markdown(
        &text,
        &config.render,
        &NoRasterizer,
        &mut host,
    ));
    report(&out);
    println!("{}", select(&out, args.format));
    Ok(())
}

/// Splits a file path into the directory the content source reads from and
/// the file's path relative to it.
fn split_input(input: &Path) -> Result<(PathBuf, RelativePathBuf)> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} is not a file path", input.display()))?;
    let root = match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((root, RelativePathBuf::from(name)))
}

fn report(out: &RenderOutput) {
    for d in &out.diagnostics {
        match d.severity {
            Severity::Warning => log::warn!("lines {}-{}: {}", d.line_start, d.line_end, d.message),
            Severity::Error => log::error!("lines {}-{}: {}", d.line_start, d.line_end, d.message),
        }
    }
}

fn select(out: &RenderOutput, format: Format) -> String {
    match format {
        Format::Markdown => out.canonical_markdown.clone(),
        Format::Raw => out.raw_markdown(),
        Format::Html => out.to_html(),
        Format::Toc => out.toc_markdown.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn format_flag_parses() {
        let args = Args::parse_from(["markdown-courier", "post.md", "--format", "html"]);
        assert_eq!(args.format, Format::Html);
        assert_eq!(args.input, PathBuf::from("post.md"));
    }

    #[test]
    fn bare_file_name_reads_from_cwd() {
        let (root, file) = split_input(Path::new("post.md")).unwrap();
        assert_eq!(root, PathBuf::from("."));
        assert_eq!(file, RelativePathBuf::from("post.md"));

        let (root, file) = split_input(Path::new("/notes/drafts/post.md")).unwrap();
        assert_eq!(root, PathBuf::from("/notes/drafts"));
        assert_eq!(file, RelativePathBuf::from("post.md"));
    }
}
