//! catppuccin-statusline binary
//!
//! `render` installs the status line into the running tmux server,
//! `palette` and `triadic` print generated colors.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use catppuccin_statusline::{
    config::{expand_home, DEFAULT_CONFIG_FILE},
    palette::{Family, PICKS_PER_FAMILY},
    tmux, triadic_colors, Color, Layout, LineComposer, PaletteGenerator, StatuslineResult, Theme,
    Tmux,
};

/// tmux user option naming the layout file.
const CONFIG_OPTION: &str = "catppuccin_config";

#[derive(Parser, Debug)]
#[command(name = "catppuccin-statusline")]
#[command(about = "Themed tmux status line and palette generator")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the status line and install it in tmux
    Render {
        /// Layout file (defaults to the @catppuccin_config option, then catppuccin.yaml)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Theme file (defaults to <theme>.theme.yaml next to the layout)
        #[arg(short, long, value_name = "PATH")]
        theme: Option<PathBuf>,

        /// Print the tmux command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print randomly generated dark palettes
    Palette {
        /// Lower lightness bound in percent for every family
        #[arg(short, long)]
        lightness: Option<u32>,

        /// Seed for reproducible palettes
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of palettes
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Only the leading colors used as theme accents
        #[arg(long)]
        theme: bool,
    },

    /// Print dark colors of any hue
    Dark {
        /// Number of colors
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Fixed hue in [0, 1]
        #[arg(long)]
        hue: Option<f64>,

        /// Fixed saturation in [0, 1]
        #[arg(long)]
        saturation: Option<f64>,

        /// Fixed lightness in [0, 1]
        #[arg(short, long)]
        lightness: Option<f64>,

        /// Seed for reproducible colors
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the two triadic partners of a color
    Triadic {
        /// Hex color, e.g. #F38BA8
        color: String,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            config,
            theme,
            dry_run,
        } => render(config, theme, dry_run),
        Commands::Palette {
            lightness,
            seed,
            count,
            theme,
        } => palette(lightness, seed, count, theme),
        Commands::Dark {
            count,
            hue,
            saturation,
            lightness,
            seed,
        } => {
            let mut generator = match seed {
                Some(seed) => PaletteGenerator::seeded(seed),
                None => PaletteGenerator::from_entropy(),
            };
            let colorize = atty::is(atty::Stream::Stdout);
            for hex in generator.random_dark(count, hue, saturation, lightness) {
                print_color(&hex, colorize)?;
                println!();
            }
            Ok(())
        }
        Commands::Triadic { color } => {
            let colorize = atty::is(atty::Stream::Stdout);
            for hex in triadic_colors(&color)? {
                print_color(&hex, colorize)?;
                println!();
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(config: Option<PathBuf>, theme: Option<PathBuf>, dry_run: bool) -> StatuslineResult<()> {
    let server = Tmux::system();
    let config =
        config.unwrap_or_else(|| expand_home(&server.option(CONFIG_OPTION, DEFAULT_CONFIG_FILE)));
    debug!(config = %config.display(), "loading layout");

    let layout = Layout::load(&config)?;
    let theme_path = theme.unwrap_or_else(|| layout.theme_path(&config));
    let theme = Theme::load(&theme_path)?;
    debug!(
        theme = %theme_path.display(),
        colors = theme.palette().len(),
        "loaded theme"
    );

    let directives = LineComposer::new(&theme).build_directives(&layout)?;

    if dry_run {
        println!("{}", tmux::command_line(&directives));
    } else if !server.apply(&directives) {
        warn!("tmux rejected the status line; rerun with --verbose for details");
    }
    Ok(())
}

fn palette(
    lightness: Option<u32>,
    seed: Option<u64>,
    count: usize,
    theme: bool,
) -> StatuslineResult<()> {
    let mut generator = match seed {
        Some(seed) => PaletteGenerator::seeded(seed),
        None => PaletteGenerator::from_entropy(),
    };
    let palettes = if theme {
        vec![generator.create_theme_palette(lightness)]
    } else {
        generator.generate_palettes(count, lightness)
    };

    let colorize = atty::is(atty::Stream::Stdout);
    for (i, palette) in palettes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for (family, shades) in Family::ALL.iter().zip(palette.chunks(PICKS_PER_FAMILY)) {
            print!("{:<7}", family.name());
            for hex in shades {
                print!(" ");
                print_color(hex, colorize)?;
            }
            println!();
        }
    }
    Ok(())
}

fn print_color(hex: &str, colorize: bool) -> StatuslineResult<()> {
    if colorize {
        let color = Color::from_hex(hex)?;
        print!("{} {}", "  ".on_color(color.to_owo_rgb()), hex);
    } else {
        print!("{}", hex);
    }
    Ok(())
}
