use super::*;

/// A styleable region of the widget. Each zone is independently either styled
/// with host-supplied classes or with its default inline declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Container,
    SelectBox,
    OptionRow,
    Dropdown,
    Tag,
    RemoveControl,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Container,
        Zone::SelectBox,
        Zone::OptionRow,
        Zone::Dropdown,
        Zone::Tag,
        Zone::RemoveControl,
    ];

    /// The data attribute on the source `<select>` that replaces this zone's
    /// default styling with a space-separated class list.
    pub fn override_attr(self) -> &'static str {
        match self {
            Zone::Container => "data-select-container-class",
            Zone::SelectBox => "data-select-box-class",
            Zone::OptionRow => "data-select-item-class",
            Zone::Dropdown => "data-select-list-class",
            Zone::Tag => "data-tag-class",
            Zone::RemoveControl => "data-tag-icon-class",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }

    fn default_label(self) -> Option<&'static str> {
        match self {
            Zone::RemoveControl => Some("x"),
            _ => None,
        }
    }

    fn builtin_declarations(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Zone::Container => &[
                ("position", "relative"),
                ("display", "inline-block"),
                ("width", "100%"),
            ],
            Zone::SelectBox => &[
                ("display", "inline-block"),
                ("width", "100%"),
                ("min-height", "calc(1.5em + .75rem + 2px)"),
                ("font-size", "1rem"),
                ("font-weight", "400"),
                ("line-height", "1.5"),
                ("color", "#495057"),
                ("vertical-align", "middle"),
                ("background", "#fff right .75rem center/8px 10px no-repeat"),
                ("border", "1px solid #ced4da"),
                ("border-radius", ".25rem"),
                ("-webkit-appearance", "none"),
                ("-moz-appearance", "none"),
                ("appearance", "none"),
            ],
            Zone::OptionRow => &[
                ("position", "relative"),
                ("padding", ".75rem 1.25rem"),
                ("background-color", "#fff"),
                ("cursor", "pointer"),
                ("color", "#333"),
                ("text-decoration", "none"),
                ("display", "block"),
            ],
            Zone::Dropdown => &[
                ("display", "none"),
                ("position", "absolute"),
                ("background-color", "#fff"),
                ("width", "100%"),
                ("box-shadow", "0px 5px 5px 0px rgba(0,0,0,0.2)"),
                ("max-height", "200px"),
                ("overflow", "auto"),
                ("z-index", "1"),
            ],
            Zone::Tag => &[
                ("display", "inline-block"),
                ("cursor", "default"),
                ("padding", ".25em .8em"),
                ("font-size", "80%"),
                ("font-weight", "700"),
                ("line-height", "1"),
                ("text-align", "center"),
                ("white-space", "nowrap"),
                ("vertical-align", "baseline"),
                ("border-radius", ".25rem"),
                ("color", "#fff"),
                ("background-color", "#343a40"),
                ("margin-left", ".2em"),
                ("margin-right", ".2em"),
            ],
            Zone::RemoveControl => &[
                ("vertical-align", "text-top"),
                ("margin-left", ".7em"),
                ("font-size", "10.3px"),
                ("cursor", "pointer"),
            ],
        }
    }
}

/// Inline declarations for the "no options" placeholder. Not overridable.
pub(crate) const PLACEHOLDER_STYLE: &[(&str, &str)] = &[
    ("position", "relative"),
    ("padding", ".75rem 1.25rem"),
    ("background-color", "#fff"),
    ("color", "#333"),
    ("text-decoration", "none"),
    ("display", "block"),
];

/// Default inline declarations per zone, used when a widget has no override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleTable {
    zones: [Vec<(String, String)>; 6],
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            zones: Zone::ALL.map(|zone| {
                zone.builtin_declarations()
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                    .collect()
            }),
        }
    }
}

impl StyleTable {
    pub(crate) fn declarations(&self, zone: Zone) -> &[(String, String)] {
        &self.zones[zone.slot()]
    }

    pub(crate) fn replace(&mut self, zone: Zone, declarations: Vec<(String, String)>) {
        self.zones[zone.slot()] = declarations;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StyleRule {
    Classes(Vec<String>),
    Inline {
        declarations: Vec<(String, String)>,
        label: Option<String>,
    },
}

/// Per-instance style decisions, resolved once at render.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedStyles {
    rules: [StyleRule; 6],
}

impl ResolvedStyles {
    pub(crate) fn resolve(dom: &Dom, source: NodeId, defaults: &StyleTable) -> Self {
        Self {
            rules: Zone::ALL.map(|zone| {
                let classes = dom
                    .attr(source, zone.override_attr())
                    .map(|value| {
                        value
                            .split_whitespace()
                            .map(ToOwned::to_owned)
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();
                if classes.is_empty() {
                    StyleRule::Inline {
                        declarations: defaults.declarations(zone).to_vec(),
                        label: zone.default_label().map(ToOwned::to_owned),
                    }
                } else {
                    StyleRule::Classes(classes)
                }
            }),
        }
    }

    pub(crate) fn rule(&self, zone: Zone) -> &StyleRule {
        &self.rules[zone.slot()]
    }

    pub(crate) fn is_overridden(&self, zone: Zone) -> bool {
        matches!(self.rule(zone), StyleRule::Classes(_))
    }

    pub(crate) fn apply(&self, dom: &mut Dom, zone: Zone, node: NodeId) -> Result<()> {
        match self.rule(zone) {
            StyleRule::Classes(classes) => {
                for class_name in classes {
                    dom.class_add(node, class_name)?;
                }
            }
            StyleRule::Inline {
                declarations,
                label,
            } => {
                for (name, value) in declarations {
                    dom.style_set(node, name, value)?;
                }
                if let Some(label) = label {
                    dom.set_text_content(node, label)?;
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn apply_declarations(
    dom: &mut Dom,
    node: NodeId,
    declarations: &[(&str, &str)],
) -> Result<()> {
    for (name, value) in declarations {
        dom.style_set(node, name, value)?;
    }
    Ok(())
}
