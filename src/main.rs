use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use structmap::{
    Cli, Commands, JsonFormatter, OutputFormat, ShellFormatter, SizeFormat, TableFormatter,
    flatten_type, process_modules, size_of_type,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}

fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Flatten {
            type_name,
            binding,
            modules,
            pid,
            output,
            pretty,
            no_color,
            verbose,
        } => {
            let modules = collect_modules(modules, pid)?;

            let flat = flatten_type(&modules, &type_name, verbose)
                .with_context(|| format!("no module yielded a complete layout for `{}`", type_name))?;

            let output_str = match output {
                OutputFormat::Table => TableFormatter::new(no_color).format(&flat),
                OutputFormat::Json => JsonFormatter::new(pretty).format(&flat),
                OutputFormat::Shell => ShellFormatter::new(&binding).format(&flat),
            };
            println!("{}", output_str);
        }

        Commands::Size { type_name, modules, pid, output, pretty, verbose } => {
            let modules = collect_modules(modules, pid)?;

            let size = size_of_type(&modules, &type_name, verbose)
                .with_context(|| format!("no module defines `{}`", type_name))?;

            match output {
                SizeFormat::Plain => println!("{}", size.size),
                SizeFormat::Json => println!("{}", JsonFormatter::new(pretty).format_size(&size)),
            }
        }
    }

    Ok(())
}

/// Combine explicitly listed modules with a live process's load-ordered
/// modules. Explicit paths are searched first, in the order given.
fn collect_modules(mut modules: Vec<PathBuf>, pid: Option<u32>) -> Result<Vec<PathBuf>> {
    if let Some(pid) = pid {
        let enumerated = process_modules(pid)
            .with_context(|| format!("failed to enumerate modules of process {}", pid))?;
        modules.extend(enumerated);
    }

    if modules.is_empty() {
        bail!("no modules to search; pass module paths or --pid <PID>");
    }

    Ok(modules)
}
