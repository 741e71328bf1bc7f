//! Composition of region strings and the option directives that install them

use std::fmt;

use tracing::debug;

use crate::{
    config::{Layout, RegionLayout, SegmentConfig},
    error::{StatuslineError, StatuslineResult},
    style::{Role, StyleResolver},
    theme::{Region, Theme},
};

/// Placeholder tmux replaces with the window name.
pub const WINDOW_NAME: &str = "#W";
/// Placeholder tmux replaces with the window index.
pub const WINDOW_INDEX: &str = "#I";
/// Key of the window entry rendered into the first window slot.
pub const ACTIVE_WINDOW: &str = "active";
/// Separator between rendered segments.
pub const SEGMENT_SEPARATOR: &str = " ";

/// A single `set-option` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub option: &'static str,
    pub value: String,
}

impl Directive {
    pub fn new(option: &'static str, value: impl Into<String>) -> Self {
        Self {
            option,
            value: value.into(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set-option {} {}", self.option, self.value)
    }
}

/// Renders each region of a layout against a theme.
#[derive(Debug, Clone, Copy)]
pub struct LineComposer<'a> {
    theme: &'a Theme,
}

impl<'a> LineComposer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Enabled segments as `<icon><decorator><option>`, space separated.
    pub fn compose_left(&self, segments: &RegionLayout) -> String {
        self.compose_status(Region::StatusLeft, segments)
    }

    /// Enabled segments as `<decorator><icon><option>`, space separated.
    pub fn compose_right(&self, segments: &RegionLayout) -> String {
        self.compose_status(Region::StatusRight, segments)
    }

    /// The `(active, inactive)` window formats. Any entry not keyed
    /// [`ACTIVE_WINDOW`] fills the inactive slot.
    pub fn compose_window(&self, segments: &RegionLayout) -> StatuslineResult<(String, String)> {
        let resolver = StyleResolver::new(self.theme, Region::Window);
        let mut active = None;
        let mut inactive = None;

        for (name, segment) in segments {
            let attrs = &segment.style;
            let value = format!(
                "{}{}{}{}{}{}{}{}",
                resolver.resolve(attrs, Role::Window),
                WINDOW_NAME,
                resolver.resolve(attrs, Role::Number),
                WINDOW_INDEX,
                resolver.resolve(attrs, Role::Icon),
                resolver.icon(attrs),
                resolver.resolve(attrs, Role::Decorator),
                resolver.decorator(attrs),
            );
            if name == ACTIVE_WINDOW {
                active = Some(value);
            } else {
                inactive = Some(value);
            }
        }

        let present = || segments.keys().cloned().collect::<Vec<_>>().join(", ");
        let active = active
            .ok_or_else(|| StatuslineError::missing_section("window.active", present()))?;
        let inactive = inactive
            .ok_or_else(|| StatuslineError::missing_section("window.inactive", present()))?;
        Ok((active, inactive))
    }

    /// The four directives, in the order tmux receives them.
    pub fn build_directives(&self, layout: &Layout) -> StatuslineResult<Vec<Directive>> {
        let left = self.compose_left(&layout.status_left);
        let (active, inactive) = self.compose_window(&layout.window)?;
        let right = self.compose_right(&layout.status_right);

        Ok(vec![
            Directive::new("status-left", left),
            Directive::new("window-status-format", active),
            Directive::new("window-status-current-format", inactive),
            Directive::new("status-right", right),
        ])
    }

    fn compose_status(&self, region: Region, segments: &RegionLayout) -> String {
        let resolver = StyleResolver::new(self.theme, region);
        segments
            .iter()
            .filter(|(name, segment)| {
                let on = segment.enabled.is_on();
                if !on {
                    debug!(region = region.section(), segment = %name, "segment disabled");
                }
                on
            })
            .map(|(_, segment)| render_segment(&resolver, segment))
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }
}

fn render_segment(resolver: &StyleResolver<'_>, segment: &SegmentConfig) -> String {
    let attrs = &segment.style;
    let option = format!("{}{}", resolver.resolve(attrs, Role::Option), segment.tmux_option);
    let icon = format!("{}{}", resolver.resolve(attrs, Role::Icon), resolver.icon(attrs));
    let decorator = format!(
        "{}{}",
        resolver.resolve(attrs, Role::Decorator),
        resolver.decorator(attrs)
    );

    match resolver.region() {
        Region::StatusRight => format!("{decorator}{icon}{option}"),
        _ => format!("{icon}{decorator}{option}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Attributes, Toggle};
    use pretty_assertions::assert_eq;

    const PLAIN: &str = r##"
status_line:
  foreground: "#FFFFFF"
  background: "#000000"
status_left: {}
window: {}
status_right: {}
"##;

    const GLYPHS: &str = r##"
status_line:
  foreground: "#FFFFFF"
  background: "#000000"
  left_icon: "I"
  left_decorator: "D"
  right_icon: "i"
  right_decorator: "d"
status_left: {}
window:
  fg_window: "#89B4FA"
status_right: {}
"##;

    fn segment(option: &str) -> SegmentConfig {
        SegmentConfig {
            tmux_option: option.to_string(),
            ..SegmentConfig::default()
        }
    }

    fn region(entries: &[(&str, SegmentConfig)]) -> RegionLayout {
        entries
            .iter()
            .map(|(name, seg)| (name.to_string(), seg.clone()))
            .collect()
    }

    const BASE: &str = "#[fg=#FFFFFF,bg=#000000,]";

    #[test]
    fn test_single_left_segment() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let left = composer.compose_left(&region(&[("window", segment("#W"))]));
        assert_eq!(left, format!("{BASE}{BASE}{BASE}#W"));
        assert!(left.ends_with("#[fg=#FFFFFF,bg=#000000,]#W"));
    }

    #[test]
    fn test_left_and_right_order() {
        let theme = Theme::from_yaml(GLYPHS, "glyphs.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let segments = region(&[("s", segment("#S"))]);

        assert_eq!(composer.compose_left(&segments), format!("{BASE}I{BASE}D{BASE}#S"));
        assert_eq!(composer.compose_right(&segments), format!("{BASE}d{BASE}i{BASE}#S"));
    }

    #[test]
    fn test_segments_joined_by_space() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let line = composer.compose_right(&region(&[("a", segment("A")), ("b", segment("B"))]));
        assert_eq!(line, format!("{BASE}{BASE}{BASE}A {BASE}{BASE}{BASE}B"));
    }

    #[test]
    fn test_disabled_segment_is_dropped() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let mut host = segment("#H");
        let enabled = region(&[("s", segment("#S")), ("h", host.clone())]);
        host.enabled = Toggle::Bool(false);
        let disabled = region(&[("s", segment("#S")), ("h", host)]);

        let full = composer.compose_left(&enabled);
        let trimmed = composer.compose_left(&disabled);
        assert!(full.contains("#H"));
        assert!(!trimmed.contains("#H"));
        assert_eq!(full, format!("{trimmed} {BASE}{BASE}{BASE}#H"));
    }

    #[test]
    fn test_segment_override_applies_to_its_role() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let seg = SegmentConfig {
            tmux_option: "#S".into(),
            style: Attributes {
                bg_option: Some("#F5C2E7".into()),
                style: Some("bold".into()),
                ..Attributes::default()
            },
            ..SegmentConfig::default()
        };
        let left = composer.compose_left(&region(&[("s", seg)]));
        let bold = "#[fg=#FFFFFF,bg=#000000,bold]";
        assert_eq!(left, format!("{bold}{bold}#[fg=#FFFFFF,bg=#F5C2E7,bold]#S"));
    }

    #[test]
    fn test_window_slots() {
        let theme = Theme::from_yaml(GLYPHS, "glyphs.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let inactive = SegmentConfig {
            style: Attributes {
                bg_window: Some("#45475A".into()),
                ..Attributes::default()
            },
            ..SegmentConfig::default()
        };
        let window = region(&[
            ("active", SegmentConfig::default()),
            ("inactive", inactive),
        ]);
        let (active, inactive) = composer.compose_window(&window).unwrap();

        assert_eq!(
            active,
            format!("#[fg=#89B4FA,bg=#000000,]#W{BASE}#I{BASE}I{BASE}D")
        );
        assert_eq!(
            inactive,
            format!("#[fg=#89B4FA,bg=#45475A,]#W{BASE}#I{BASE}I{BASE}D")
        );
        assert_ne!(active, inactive);
    }

    #[test]
    fn test_window_without_active_entry() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let err = composer
            .compose_window(&region(&[("inactive", SegmentConfig::default())]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing config section: window.active");
    }

    #[test]
    fn test_directive_order() {
        let theme = Theme::from_yaml(PLAIN, "plain.theme.yaml").unwrap();
        let composer = LineComposer::new(&theme);
        let layout = Layout {
            theme: "plain".into(),
            status_left: region(&[("s", segment("#S"))]),
            window: region(&[
                ("active", SegmentConfig::default()),
                ("other", SegmentConfig::default()),
            ]),
            status_right: region(&[("t", segment("%H:%M"))]),
        };
        let directives = composer.build_directives(&layout).unwrap();
        let names: Vec<&str> = directives.iter().map(|d| d.option).collect();
        assert_eq!(
            names,
            vec![
                "status-left",
                "window-status-format",
                "window-status-current-format",
                "status-right",
            ]
        );
        assert_eq!(
            directives[0].to_string(),
            format!("set-option status-left {BASE}{BASE}{BASE}#S")
        );
    }
}
