use once_cell::sync::Lazy;
use regex::Regex;

/// Shapes of clock-time label that writers put in front of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// `[18:47] 记录：...`
    Bracketed,
    /// `【18:47】记录：...`
    FullWidthBracketed,
    /// `(18:47) 记录：...`
    Parenthesized,
    /// `18:47-记录：...`
    Dashed,
    /// `18:47.记录：...`
    Dotted,
    /// `18:47 记录：...` or `18:47记录：...`
    Labelled,
    /// `18:47 ...` with no label colon
    BareSpace,
}

// Label text after the clock is at most 20 chars, closed by a half- or full-width colon.
static RE_BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\]\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_FULL_WIDTH_BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^【[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?】\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_PARENTHESIZED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\)\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_DASHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?-\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_DOTTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\.\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_LABELLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*[\s\S]{0,20}?[:：]\s*").unwrap()
});

static RE_BARE_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s+").unwrap()
});

/// Priority order: enclosed forms first, then the generic bare-time forms.
pub const PREFIX_RULES: &[PrefixRule] = &[
    PrefixRule::Bracketed,
    PrefixRule::FullWidthBracketed,
    PrefixRule::Parenthesized,
    PrefixRule::Dashed,
    PrefixRule::Dotted,
    PrefixRule::Labelled,
    PrefixRule::BareSpace,
];

impl PrefixRule {
    fn regex(self) -> &'static Regex {
        match self {
            PrefixRule::Bracketed => &RE_BRACKETED,
            PrefixRule::FullWidthBracketed => &RE_FULL_WIDTH_BRACKETED,
            PrefixRule::Parenthesized => &RE_PARENTHESIZED,
            PrefixRule::Dashed => &RE_DASHED,
            PrefixRule::Dotted => &RE_DOTTED,
            PrefixRule::Labelled => &RE_LABELLED,
            PrefixRule::BareSpace => &RE_BARE_SPACE,
        }
    }

    /// Byte length of the prefix this rule would strip, if it applies.
    pub fn match_len(self, content: &str) -> Option<usize> {
        self.regex().find(content).map(|m| m.end())
    }

    /// Remainder of `content` after this rule's prefix, or `None` when it does not apply.
    pub fn strip(self, content: &str) -> Option<&str> {
        self.match_len(content).map(|n| &content[n..])
    }
}

/// First rule in priority order that matches `content`.
pub fn matching_rule(content: &str) -> Option<PrefixRule> {
    PREFIX_RULES.iter().copied().find(|r| r.match_len(content).is_some())
}

/// Strip at most one leading clock-time label and trim.
///
/// Falls back to the untouched input when stripping would leave nothing, so content
/// only comes back empty if it came in empty.
pub fn normalize(raw: &str) -> String {
    let stripped = match matching_rule(raw).and_then(|r| r.strip(raw)) {
        Some(rest) => rest,
        None => raw,
    };
    let trimmed = stripped.trim();
    if trimmed.is_empty() && !raw.is_empty() {
        return raw.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_labelled_prefix() {
        assert_eq!(normalize("18:47 记录：今天跑步五公里"), "今天跑步五公里");
        assert_eq!(normalize("18:47记录:读书"), "读书");
    }

    #[test]
    fn strips_enclosed_prefixes() {
        assert_eq!(normalize("[18:47] 想法：换个思路"), "换个思路");
        assert_eq!(normalize("【9:05】日记：晴"), "晴");
        assert_eq!(normalize("(18:47:30) note: hello"), "hello");
    }

    #[test]
    fn enclosed_rule_wins_over_bare_rules() {
        assert_eq!(matching_rule("[18:47] 想法：x"), Some(PrefixRule::Bracketed));
        assert_eq!(matching_rule("18:47 hello"), Some(PrefixRule::BareSpace));
        assert_eq!(matching_rule("18:47-记录：x"), Some(PrefixRule::Dashed));
    }

    #[test]
    fn bare_time_without_colon_strips_only_the_clock() {
        assert_eq!(normalize("18:47 hello world"), "hello world");
    }

    #[test]
    fn strips_only_first_prefix() {
        assert_eq!(normalize("18:47 记录：19:00 会议：开会"), "19:00 会议：开会");
    }

    #[test]
    fn no_match_only_trims() {
        assert_eq!(normalize("  plain text  "), "plain text");
        assert_eq!(normalize("18:47-hello"), "18:47-hello");
    }

    #[test]
    fn falls_back_to_input_when_strip_empties() {
        assert_eq!(normalize("18:47 记录："), "18:47 记录：");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn whitespace_only_input_is_kept_verbatim() {
        assert_eq!(normalize("   "), "   ");
    }
}
