use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::{CGA_NAMES, CGA_PALETTE};

/// List the fixed palette with hex and HSL values
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Print the palette as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    printer.info(
        "Palette",
        &format!("CGA, {}", plural(CGA_PALETTE.len(), "colour", "colours")),
    );

    if args.json {
        println!("{}", palette_json());
    } else {
        println!("{}", format_palette());
    }

    Ok(())
}

/// One line per palette entry: index, name, hex and HSL.
pub fn format_palette() -> String {
    CGA_PALETTE
        .iter()
        .zip(CGA_NAMES)
        .enumerate()
        .map(|(i, (colour, name))| {
            let (h, s, l) = colour.to_hsl();
            format!(
                "{:02}  {:<14}{}  hsl({:.0}, {:.0}%, {:.0}%)",
                i,
                name,
                colour,
                h,
                s * 100.0,
                l * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn palette_json() -> String {
    let entries: Vec<serde_json::Value> = CGA_PALETTE
        .iter()
        .zip(CGA_NAMES)
        .enumerate()
        .map(|(i, (colour, name))| {
            serde_json::json!({
                "index": i,
                "name": name,
                "hex": colour.to_string(),
                "rgb": [colour.r, colour.g, colour.b],
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}
