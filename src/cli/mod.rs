pub mod completions;
pub mod palette;
pub mod render;

use clap::{Parser, Subcommand};

/// stitchify - Turn images into CGA-coloured crochet grid patterns
#[derive(Parser, Debug)]
#[command(name = "stitchify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an image as a bordered grid pattern
    Render(render::RenderArgs),

    /// List the fixed 16-colour palette
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
