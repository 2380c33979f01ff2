use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs imports nothing from the rest of the crate, so the derive tree
// compiles here with just the clap build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("cannot create man/ under OUT_DIR");

    // Walk the command tree with an explicit worklist. Subcommand pages
    // carry their parent's name as a prefix: inkfly.1, inkfly-projects.1,
    // inkfly-projects-render-pdf.1.
    let mut pending = vec![cli::Cli::command()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();
        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            pending.push(sub.clone().name(format!("{name}-{}", sub.get_name())));
        }

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd)
            .render(&mut page)
            .unwrap_or_else(|e| panic!("rendering {name}.1: {e}"));
        fs::write(man_dir.join(format!("{name}.1")), page)
            .unwrap_or_else(|e| panic!("writing {name}.1: {e}"));
    }
}
