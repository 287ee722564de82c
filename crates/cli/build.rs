use std::{env, fs, path::PathBuf};

use clap::{Arg, ArgAction, Command, ValueHint};

fn flag(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name).short(short).long(name).action(ArgAction::SetTrue).help(help)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    let completions_dir = out_dir.join("completions");

    if let Err(err) = fs::create_dir_all(&completions_dir) {
        println!("cargo:warning=Could not create completions directory: {}", err);
        return;
    }

    let mut cmd = Command::new("unmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract plain text from HTML by CSS selector")
        .arg(Arg::new("selectors").value_name("SELECTOR").num_args(0..).help("CSS selectors to extract, in order"))
        .arg(
            Arg::new("remove")
                .short('r')
                .long("remove")
                .value_name("SELECTOR")
                .action(ArgAction::Append)
                .help("Remove elements matching this selector before extracting"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_hint(ValueHint::FilePath)
                .help("Input HTML file, or '-' for stdin"),
        )
        .arg(flag("minify", 'm', "Collapse whitespace and drop blank lines"))
        .arg(
            Arg::new("keep")
                .short('k')
                .long("keep")
                .value_name("TAG")
                .action(ArgAction::Append)
                .help("Keep this tag's markup in the output; accepts bundle names"),
        )
        .arg(flag("all-attributes", 'a', "Keep every attribute on kept tags"))
        .arg(flag("first", '1', "Only output the first matching element"))
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_hint(ValueHint::FilePath)
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("list-bundles")
                .long("list-bundles")
                .action(ArgAction::SetTrue)
                .help("List tag bundles usable with --keep and exit"),
        )
        .arg(flag("verbose", 'v', "Print progress and debug logging to stderr"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        if let Err(err) = clap_complete::generate_to(shell, &mut cmd, "unmark", &completions_dir) {
            println!("cargo:warning=Could not generate {} completions: {}", shell, err);
        }
    }
}
