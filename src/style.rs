use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeStyle {
    pub color: String,
    pub icon: String,
}

/// Partial style supplied by the host theme; missing parts fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

pub const FALLBACK_ICON: &str = "📌";

const KNOWN_TYPES: &[(&str, &str, &str)] = &[
    ("记录", "#667eea", "📝"),
    ("工作", "#f56565", "💼"),
    ("学习", "#48bb78", "📚"),
    ("阅读", "#4299e1", "📖"),
    ("运动", "#ed8936", "🏃"),
    ("生活", "#38b2ac", "🏠"),
    ("想法", "#9f7aea", "💡"),
    ("未分类", "#a0aec0", FALLBACK_ICON),
];

const PALETTE: &[&str] = &[
    "#667eea", "#f56565", "#48bb78", "#ed8936", "#4299e1",
    "#9f7aea", "#38b2ac", "#ecc94b", "#ed64a6", "#718096",
];

/// Built-in colour and icon for a type label.
///
/// Unknown labels get a palette colour picked from a stable hash of the label, so the
/// same label is painted the same way on every run.
pub fn style_for_type(entry_type: &str) -> TypeStyle {
    if let Some((_, color, icon)) = KNOWN_TYPES.iter().find(|(t, _, _)| *t == entry_type) {
        return TypeStyle { color: (*color).to_string(), icon: (*icon).to_string() };
    }
    let idx = stable_hash(entry_type) as usize % PALETTE.len();
    TypeStyle { color: PALETTE[idx].to_string(), icon: FALLBACK_ICON.to_string() }
}

// FNV-1a; std and ahash hashers are seeded per process.
fn stable_hash(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3))
}

/// Default styles layered under host-provided overrides.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    overrides: AHashMap<String, StyleOverride>,
}

impl StyleTable {
    pub fn new() -> Self { Self::default() }

    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, StyleOverride)>,
    {
        Self { overrides: overrides.into_iter().collect() }
    }

    pub fn style_for(&self, entry_type: &str) -> TypeStyle {
        let mut style = style_for_type(entry_type);
        if let Some(o) = self.overrides.get(entry_type) {
            if let Some(c) = o.color.as_ref().filter(|c| !c.trim().is_empty()) { style.color = c.clone(); }
            if let Some(i) = o.icon.as_ref().filter(|i| !i.trim().is_empty()) { style.icon = i.clone(); }
        }
        style
    }
}
