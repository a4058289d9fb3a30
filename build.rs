use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

/// Only the clap definitions are needed to render man pages.
#[allow(dead_code)]
#[path = "src/cli/args.rs"]
mod args;

use args::Cli;

fn main() -> std::io::Result<()> {
    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target"));
    let man_dir = out_dir.join("man1");
    fs::create_dir_all(&man_dir)?;
    render_man_page(&Cli::command(), &man_dir, None)?;

    println!("cargo:rerun-if-changed=src/cli/args.rs");
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}

/// Render `cmd` and its visible subcommands as `contract-session[-sub].1`.
fn render_man_page(cmd: &clap::Command, dir: &Path, parent: Option<&str>) -> std::io::Result<()> {
    let name = match parent {
        Some(parent) => format!("{}-{}", parent, cmd.get_name()),
        None => cmd.get_name().to_string(),
    };

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    fs::write(dir.join(format!("{}.1", name)), page)?;

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        render_man_page(sub, dir, Some(&name))?;
    }
    Ok(())
}
