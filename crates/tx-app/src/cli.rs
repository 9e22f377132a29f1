use std::path::PathBuf;

use clap::Parser;

/// textel — image ↔ ASCII art converter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source : chemin local ou URL http(s) (PNG, JPEG, BMP, GIF).
    pub input: String,

    /// Écrire la grille texte dans ce fichier au lieu de stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Rasteriser la grille vers ce bitmap PNG.
    #[arg(long)]
    pub render: Option<PathBuf>,

    /// Convertir un GIF animé, frame par frame, vers ce GIF ASCII.
    #[arg(long)]
    pub gif: Option<PathBuf>,

    /// Caractères par pixel source.
    #[arg(long)]
    pub scale: Option<f32>,

    /// Inverser la luminance (pour source sur fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Désactiver l'égalisation d'histogramme.
    #[arg(long, default_value_t = false)]
    pub no_equalize: bool,

    /// Palette : "uniform" (19 glyphes) ou "random" (9 buckets variés).
    #[arg(long)]
    pub palette: Option<String>,

    /// Police monospace explicite (.ttf/.otf). Défaut : police système.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Taille de police pour la rasterisation.
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Couleur du texte rasterisé, "R,G,B".
    #[arg(long, value_parser = parse_color)]
    pub fg: Option<(u8, u8, u8)>,

    /// Couleur de fond rasterisé, "R,G,B".
    #[arg(long, value_parser = parse_color)]
    pub bg: Option<(u8, u8, u8)>,

    /// Cadence cible de l'export animé.
    #[arg(long)]
    pub fps: Option<f32>,

    /// Fichier de configuration TOML optionnel.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Parse une couleur "R,G,B" en triplet 8-bit.
///
/// # Errors
/// Returns a message when the string is not three comma-separated bytes.
pub fn parse_color(s: &str) -> Result<(u8, u8, u8), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("couleur '{s}' invalide (attendu R,G,B)"));
    }
    let component = |t: &str| {
        t.parse::<u8>()
            .map_err(|e| format!("composante '{t}' : {e}"))
    };
    Ok((
        component(parts[0])?,
        component(parts[1])?,
        component(parts[2])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn color_parses_with_spaces() {
        assert_eq!(parse_color("255, 0, 20").unwrap(), (255, 0, 20));
    }

    #[test]
    fn color_rejects_bad_shapes() {
        assert!(parse_color("255,0").is_err());
        assert!(parse_color("1,2,3,4").is_err());
        assert!(parse_color("256,0,0").is_err());
        assert!(parse_color("a,b,c").is_err());
    }
}
