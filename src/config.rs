//! Layout and theme documents
//!
//! Both documents are YAML. The layout names a theme and lists, per region,
//! the segments to render in declaration order. The theme carries the
//! global `status_line` block and one block of defaults per region.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{StatuslineError, StatuslineResult};

/// Default layout file name.
pub const DEFAULT_CONFIG_FILE: &str = "catppuccin.yaml";
/// Suffix appended to a theme name to find its document.
pub const THEME_FILE_SUFFIX: &str = ".theme.yaml";

/// Style attributes shared by region defaults and segment overrides.
///
/// Every field is optional; an unset field defers to the next level of
/// the cascade. Numeric and boolean scalars are kept as their text, so
/// `fg_number: 235` reads as the tmux color `235`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Attributes {
    #[serde(deserialize_with = "optional_text")]
    pub fg_option: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub bg_option: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub fg_icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub bg_icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub fg_decorator: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub bg_decorator: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub decorator: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub style: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub fg_window: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub bg_window: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub fg_number: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub bg_number: Option<String>,
}

impl Attributes {
    /// Keep every set field, taking the rest from `fallback`.
    pub fn or(self, fallback: &Attributes) -> Attributes {
        let pick = |own: Option<String>, other: &Option<String>| own.or_else(|| other.clone());
        Attributes {
            fg_option: pick(self.fg_option, &fallback.fg_option),
            bg_option: pick(self.bg_option, &fallback.bg_option),
            fg_icon: pick(self.fg_icon, &fallback.fg_icon),
            bg_icon: pick(self.bg_icon, &fallback.bg_icon),
            fg_decorator: pick(self.fg_decorator, &fallback.fg_decorator),
            bg_decorator: pick(self.bg_decorator, &fallback.bg_decorator),
            icon: pick(self.icon, &fallback.icon),
            decorator: pick(self.decorator, &fallback.decorator),
            style: pick(self.style, &fallback.style),
            fg_window: pick(self.fg_window, &fallback.fg_window),
            bg_window: pick(self.bg_window, &fallback.bg_window),
            fg_number: pick(self.fg_number, &fallback.fg_number),
            bg_number: pick(self.bg_number, &fallback.bg_number),
        }
    }

    /// The color-valued fields that are set, by attribute name.
    pub fn colors(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("fg_option", &self.fg_option),
            ("bg_option", &self.bg_option),
            ("fg_icon", &self.fg_icon),
            ("bg_icon", &self.bg_icon),
            ("fg_decorator", &self.fg_decorator),
            ("bg_decorator", &self.bg_decorator),
            ("fg_window", &self.fg_window),
            ("bg_window", &self.bg_window),
            ("fg_number", &self.fg_number),
            ("bg_number", &self.bg_number),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }
}

/// A segment's `enabled` flag: a YAML bool, an integer, or a tmux-style
/// `on`/`off` word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Bool(bool),
    Int(i64),
    Word(String),
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle::Bool(true)
    }
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        match self {
            Toggle::Bool(on) => *on,
            Toggle::Int(n) => *n != 0,
            Toggle::Word(word) => !matches!(
                word.trim().to_ascii_lowercase().as_str(),
                "" | "off" | "no" | "false" | "0"
            ),
        }
    }
}

/// One configured segment within a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SegmentConfig {
    /// Absent means on, an explicit null means off.
    #[serde(default, deserialize_with = "null_is_off")]
    pub enabled: Toggle,
    /// Text or multiplexer format placeholder the segment displays.
    #[serde(default, deserialize_with = "text")]
    pub tmux_option: String,
    #[serde(flatten)]
    pub style: Attributes,
}

/// A YAML scalar read as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn null_is_off<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Toggle, D::Error> {
    Ok(Option::<Toggle>::deserialize(deserializer)?.unwrap_or(Toggle::Bool(false)))
}

/// Segments of one region, in render order.
pub type RegionLayout = IndexMap<String, SegmentConfig>;

#[derive(Debug, Deserialize)]
struct RawLayout {
    theme: Option<String>,
    status_left: Option<RegionLayout>,
    window: Option<RegionLayout>,
    status_right: Option<RegionLayout>,
}

/// The layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub theme: String,
    pub status_left: RegionLayout,
    pub window: RegionLayout,
    pub status_right: RegionLayout,
}

impl Layout {
    pub fn load(path: impl AsRef<Path>) -> StatuslineResult<Self> {
        let path = path.as_ref();
        let src = read_document(path)?;
        Self::from_yaml(&src, path)
    }

    /// Parse a layout document. `origin` names the source in diagnostics.
    pub fn from_yaml(src: &str, origin: impl AsRef<Path>) -> StatuslineResult<Self> {
        let raw: RawLayout = serde_yaml::from_str(src)
            .map_err(|e| StatuslineError::yaml(origin.as_ref(), src, &e))?;

        Ok(Self {
            theme: require(raw.theme, "theme", src)?,
            status_left: require(raw.status_left, "status_left", src)?,
            window: require(raw.window, "window", src)?,
            status_right: require(raw.status_right, "status_right", src)?,
        })
    }

    /// `<theme>.theme.yaml`, next to the layout file.
    pub fn theme_path(&self, config_path: impl AsRef<Path>) -> PathBuf {
        let file = format!("{}{}", self.theme, THEME_FILE_SUFFIX);
        match config_path.as_ref().parent() {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        }
    }
}

/// The theme's global block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusLine {
    #[serde(deserialize_with = "optional_text")]
    pub foreground: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub background: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub style: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub left_icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub right_icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub left_decorator: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub right_decorator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    status_line: Option<StatusLine>,
    status_left: Option<Attributes>,
    window: Option<Attributes>,
    status_right: Option<Attributes>,
}

/// The theme document with every section present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDocument {
    pub status_line: StatusLine,
    pub status_left: Attributes,
    pub window: Attributes,
    pub status_right: Attributes,
}

impl ThemeDocument {
    pub fn from_yaml(src: &str, origin: impl AsRef<Path>) -> StatuslineResult<Self> {
        let raw: RawTheme = serde_yaml::from_str(src)
            .map_err(|e| StatuslineError::yaml(origin.as_ref(), src, &e))?;

        Ok(Self {
            status_line: require(raw.status_line, "status_line", src)?,
            status_left: require(raw.status_left, "status_left", src)?,
            window: require(raw.window, "window", src)?,
            status_right: require(raw.status_right, "status_right", src)?,
        })
    }
}

pub(crate) fn read_document(path: &Path) -> StatuslineResult<String> {
    fs::read_to_string(path).map_err(|e| StatuslineError::io(path, e.to_string()).into())
}

/// Expand a leading `~` to the home directory, as tmux option values are
/// not shell-expanded.
pub fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(input));
    }

    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(input)
}

fn require<T>(section: Option<T>, name: &str, src: &str) -> StatuslineResult<T> {
    section.ok_or_else(|| StatuslineError::missing_section(name, src).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const LAYOUT: &str = r##"
theme: mocha
status_left:
  session:
    tmux_option: "#S"
    icon: ""
  host:
    enabled: off
    tmux_option: "#H"
window:
  active:
    fg_window: "#CDD6F4"
  inactive: {}
status_right:
  date:
    tmux_option: "%Y-%m-%d"
    enabled: false
  time:
    tmux_option: "%H:%M"
"##;

    #[test]
    fn test_layout_keeps_declaration_order() {
        let layout = Layout::from_yaml(LAYOUT, "catppuccin.yaml").unwrap();
        assert_eq!(layout.theme, "mocha");
        let left: Vec<&str> = layout.status_left.keys().map(String::as_str).collect();
        assert_eq!(left, vec!["session", "host"]);
        let right: Vec<&str> = layout.status_right.keys().map(String::as_str).collect();
        assert_eq!(right, vec!["date", "time"]);
    }

    #[test]
    fn test_segment_fields() {
        let layout = Layout::from_yaml(LAYOUT, "catppuccin.yaml").unwrap();
        let session = &layout.status_left["session"];
        assert!(session.enabled.is_on());
        assert_eq!(session.tmux_option, "#S");
        assert_eq!(session.style.icon.as_deref(), Some(""));
        assert_eq!(session.style.fg_icon, None);

        let active = &layout.window["active"];
        assert_eq!(active.style.fg_window.as_deref(), Some("#CDD6F4"));
        assert_eq!(layout.window["inactive"], SegmentConfig::default());
    }

    #[test]
    fn test_toggle_words_and_bools() {
        let layout = Layout::from_yaml(LAYOUT, "catppuccin.yaml").unwrap();
        assert!(!layout.status_left["host"].enabled.is_on());
        assert!(!layout.status_right["date"].enabled.is_on());
        assert!(layout.status_right["time"].enabled.is_on());

        assert!(Toggle::Word("on".into()).is_on());
        assert!(Toggle::Word("yes".into()).is_on());
        assert!(!Toggle::Word("OFF".into()).is_on());
        assert!(!Toggle::Word(String::new()).is_on());
    }

    fn single_segment(body: &str) -> SegmentConfig {
        let src = format!(
            "theme: mocha\nstatus_left:\n  s:\n{body}\nwindow: {{}}\nstatus_right: {{}}\n"
        );
        let mut layout = Layout::from_yaml(&src, "c.yaml").unwrap();
        layout.status_left.shift_remove("s").unwrap()
    }

    #[test]
    fn test_toggle_integers_and_null() {
        assert_eq!(single_segment("    enabled: 0").enabled, Toggle::Int(0));
        assert!(!single_segment("    enabled: 0").enabled.is_on());
        assert!(single_segment("    enabled: 1").enabled.is_on());
        assert!(!single_segment("    enabled: ~").enabled.is_on());
        assert!(single_segment("    tmux_option: \"#S\"").enabled.is_on());
    }

    #[test]
    fn test_scalar_attributes_read_as_text() {
        let segment = single_segment("    icon: 5\n    fg_number: 235\n    tmux_option: 100");
        assert_eq!(segment.style.icon.as_deref(), Some("5"));
        assert_eq!(segment.style.fg_number.as_deref(), Some("235"));
        assert_eq!(segment.tmux_option, "100");
        assert_eq!(segment.style.bg_number, None);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/etc/catppuccin.yaml"), PathBuf::from("/etc/catppuccin.yaml"));
        assert_eq!(expand_home("catppuccin.yaml"), PathBuf::from("catppuccin.yaml"));
        match dirs::home_dir() {
            Some(home) => {
                assert_eq!(
                    expand_home("~/.tmux/catppuccin.yaml"),
                    home.join(".tmux/catppuccin.yaml")
                );
                assert_eq!(expand_home("~"), home);
            }
            None => assert_eq!(expand_home("~/x"), PathBuf::from("~/x")),
        }
    }

    #[test]
    fn test_missing_layout_section() {
        let src = "theme: mocha\nstatus_left: {}\nwindow: {}\n";
        let err = Layout::from_yaml(src, "c.yaml").unwrap_err();
        match err.downcast_ref::<StatuslineError>() {
            Some(StatuslineError::MissingConfigSection { section, .. }) => {
                assert_eq!(section, "status_right");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = Layout::from_yaml("theme: [mocha\n", "c.yaml").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatuslineError>(),
            Some(StatuslineError::Parse { .. })
        ));
    }

    #[test]
    fn test_theme_path_sits_beside_config() {
        let layout = Layout::from_yaml(LAYOUT, "catppuccin.yaml").unwrap();
        assert_eq!(
            layout.theme_path("/home/me/.tmux/catppuccin.yaml"),
            PathBuf::from("/home/me/.tmux/mocha.theme.yaml")
        );
        assert_eq!(layout.theme_path("catppuccin.yaml"), PathBuf::from("mocha.theme.yaml"));
    }

    #[test]
    fn test_missing_theme_section() {
        let src = "status_line:\n  foreground: \"#FFFFFF\"\nstatus_left: {}\nstatus_right: {}\n";
        let err = ThemeDocument::from_yaml(src, "mocha.theme.yaml").unwrap_err();
        assert_eq!(err.to_string(), "Missing config section: window");
    }

    #[test]
    fn test_attributes_or() {
        let own = Attributes {
            fg_icon: Some("#111111".into()),
            ..Attributes::default()
        };
        let fallback = Attributes {
            fg_icon: Some("#222222".into()),
            bg_icon: Some("#333333".into()),
            ..Attributes::default()
        };
        let merged = own.or(&fallback);
        assert_eq!(merged.fg_icon.as_deref(), Some("#111111"));
        assert_eq!(merged.bg_icon.as_deref(), Some("#333333"));
        assert_eq!(merged.style, None);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAYOUT.as_bytes()).unwrap();
        let layout = Layout::load(file.path()).unwrap();
        assert_eq!(layout.window.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Layout::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatuslineError>(),
            Some(StatuslineError::Io { .. })
        ));
    }
}
