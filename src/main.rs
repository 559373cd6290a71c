use clap::Parser;
use miette::Result;
use stitchify::cli::{Cli, Commands};
use stitchify::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => stitchify::cli::render::run(args, &printer)?,
        Commands::Palette(args) => stitchify::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => stitchify::cli::completions::run(args)?,
    }

    Ok(())
}
