use anyhow::Result;
use clap::Parser;
use tx_core::config::{Settings, load_settings};
use tx_core::palette::GlyphPalette;

pub mod cli;
pub mod convert;

fn main() -> Result<()> {
    // 1. Parser CLI
    let args = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let mut settings = match args.config.as_deref() {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    // 4. Appliquer les overrides CLI
    apply_overrides(&mut settings, &args);

    // 5. Dispatcher
    if let Some(ref gif_out) = args.gif {
        let input = std::path::Path::new(&args.input);
        if !input.exists() {
            anyhow::bail!(
                "L'export animé lit un GIF local : {} introuvable.",
                input.display()
            );
        }
        return convert::run_animated(input, &settings, gif_out);
    }

    convert::run_still(
        &args.input,
        &settings,
        args.out.as_deref(),
        args.render.as_deref(),
    )
}

fn apply_overrides(settings: &mut Settings, args: &cli::Cli) {
    if let Some(v) = args.scale {
        settings.convert.scalefactor = v;
    }
    if args.invert {
        settings.convert.invert = true;
    }
    if args.no_equalize {
        settings.convert.equalize = false;
    }
    if let Some(ref path) = args.font {
        settings.raster.font_path = Some(path.clone());
    }
    if let Some(v) = args.font_size {
        settings.raster.font_size = v;
    }
    if let Some(v) = args.fg {
        settings.raster.fg_color = v;
    }
    if let Some(v) = args.bg {
        settings.raster.bg_color = v;
    }
    if let Some(v) = args.fps {
        settings.sequence.fps = v;
    }

    if let Some(ref name) = args.palette {
        match name.as_str() {
            "uniform" => settings.palette = GlyphPalette::uniform(),
            "random" => settings.palette = GlyphPalette::random(),
            other => log::warn!("Palette inconnue '{other}', palette courante conservée."),
        }
    }

    settings.convert.clamp_all();
    settings.raster.clamp_all();
    settings.sequence.clamp_all();
}
