#![forbid(unsafe_code)]

//! # Catppuccin Statusline
//!
//! Builds a themed tmux status line from two YAML documents and generates
//! dark accent palettes for new themes.
//!
//! ## Overview
//!
//! - **Style Cascade**: every segment attribute resolves through the segment's
//!   own override, then its region's default, then the theme's global block
//! - **Line Composition**: segments of the left, window and right regions are
//!   rendered into tmux style directives and installed with `set-option`
//! - **Palette Generation**: six hue families are sampled and expanded into
//!   light-to-dark gradients, keeping six shades each
//!
//! ## Core Components
//!
//! - [`Layout`] / [`Theme`]: the loaded documents
//! - [`StyleResolver`]: the three-level cascade for one region
//! - [`LineComposer`]: region strings and the resulting [`Directive`]s
//! - [`PaletteGenerator`]: seedable palette sampling
//! - [`Tmux`]: option reading and directive dispatch over a [`CommandRunner`]
//!
//! ## Example Usage
//!
//! ```rust
//! use catppuccin_statusline::{Layout, LineComposer, Theme};
//!
//! let theme = Theme::from_yaml(
//!     r##"
//! status_line:
//!   foreground: "#CDD6F4"
//!   background: "#1E1E2E"
//! status_left: {}
//! window: {}
//! status_right: {}
//! "##,
//!     "mocha.theme.yaml",
//! )?;
//!
//! let layout = Layout::from_yaml(
//!     r##"
//! theme: mocha
//! status_left:
//!   session:
//!     tmux_option: "#S"
//! window:
//!   active: {}
//!   inactive: {}
//! status_right: {}
//! "##,
//!     "catppuccin.yaml",
//! )?;
//!
//! let directives = LineComposer::new(&theme).build_directives(&layout)?;
//! assert_eq!(directives[0].option, "status-left");
//! assert!(directives[0].value.ends_with("#[fg=#CDD6F4,bg=#1E1E2E,]#S"));
//! # Ok::<(), miette::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`StatuslineResult`] and [`StatuslineError`] with
//! diagnostics rendered by `miette`. Style resolution and palette generation
//! cannot fail; tmux failures are logged and replaced by fallbacks.

pub use colors::{
    hex_to_hls, hls_to_hex, rgb_byte_to_hex, rgb_float_to_hex, triadic_colors, Color, Hls,
};
pub use compose::{Directive, LineComposer};
pub use config::{Attributes, Layout, SegmentConfig, ThemeDocument, Toggle};
pub use error::{StatuslineError, StatuslineResult};
pub use palette::{Family, PaletteGenerator};
pub use style::{ResolvedStyle, Role, StyleResolver};
pub use theme::{Region, Theme, ThemePalette};
pub use tmux::{CommandRunner, SystemRunner, Tmux};

/// Hex, RGB and HLS conversions
pub mod colors;
/// Region and directive composition
pub mod compose;
/// Layout and theme documents
pub mod config;
/// Error types and handling
pub mod error;
/// Random palette generation
pub mod palette;
/// Style cascade resolution
pub mod style;
/// Loaded theme and region defaults
pub mod theme;
/// tmux option access
pub mod tmux;
