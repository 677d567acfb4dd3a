use regex::Regex;
use std::sync::LazyLock;

/// Canonical `{amount, unit, name, optional}` shape all adapters converge on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedIngredient {
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
    pub optional: bool,
}

/// Unicode fraction glyphs and their decimal values.
const FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅓', 0.333),
    ('⅔', 0.667),
];

/// Unit lexicon: metric units plus French culinary measures.
/// Matching is case-insensitive; the lexicon is data, not pattern.
const UNITS: &[&str] = &[
    "g",
    "kg",
    "ml",
    "cl",
    "dl",
    "l",
    "cm",
    "c.s.",
    "c.c.",
    "c.à.s.",
    "c.à.c.",
    "bouquet",
    "pincée",
    "gousse",
    "gousses",
    "branche",
    "branches",
    "feuille",
    "feuilles",
    "tranche",
    "tranches",
    "botte",
    "bottes",
    "sachet",
    "sachets",
    "cuillère",
    "cuillères",
    "verre",
    "verres",
    "tasse",
    "tasses",
    "poignée",
    "poignées",
];

/// Connector words between the unit and the ingredient name.
const CONNECTOR_WORDS: &[&str] = &["de", "du", "des", "la", "le"];

/// Elided connectors attached to the following word ("d'ail", "l'oignon").
const ELIDED_CONNECTORS: &[&str] = &["d'", "l'"];

static SLASH_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap());

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(?:[.,]\d+)?$").unwrap());

/// Parse a freeform ingredient line into the canonical shape.
///
/// Total function: any input yields a value, never panics. An unparsable
/// line degrades to a name-only result with the trimmed original as name.
///
/// Known imprecision: a unit-lexicon word that is actually part of the
/// ingredient name (e.g. "feuilles de brick" as a product) is parsed as a
/// unit; no disambiguation is attempted beyond the lexicon/connector
/// heuristic.
pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    let optional = detect_optional(line);
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedIngredient {
            optional,
            ..Default::default()
        };
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let mut idx = 0;

    let amount = parse_quantity(tokens[0]);
    if amount.is_some() {
        idx = 1;
    }

    let mut unit = None;
    if idx < tokens.len() {
        let lowered = tokens[idx].to_lowercase();
        if UNITS.contains(&lowered.as_str()) {
            unit = Some(lowered);
            idx += 1;
        }
    }

    let mut name_tokens: Vec<String> = Vec::new();
    let mut at_name_start = true;
    for token in &tokens[idx..] {
        if at_name_start && unit.is_some() {
            let lowered = token.to_lowercase();
            if CONNECTOR_WORDS.contains(&lowered.as_str()) {
                at_name_start = false;
                continue;
            }
            if let Some(prefix) = ELIDED_CONNECTORS
                .iter()
                .find(|p| lowered.starts_with(*p))
            {
                let rest = &token[prefix.len()..];
                if !rest.is_empty() {
                    name_tokens.push(rest.to_string());
                }
                at_name_start = false;
                continue;
            }
        }
        at_name_start = false;
        name_tokens.push((*token).to_string());
    }

    ParsedIngredient {
        amount,
        unit,
        name: name_tokens.join(" "),
        optional,
    }
}

/// The optional scan runs over the whole original line, independent of the
/// structured parse, so it still fires when that parse failed.
fn detect_optional(line: &str) -> bool {
    let lowered = line.to_lowercase();
    lowered.contains("optionnel") || lowered.contains("facultatif") || lowered.contains('?')
}

/// Recognize a leading quantity token: a single fraction glyph, a slash
/// fraction, or a decimal using either `.` or `,` (French convention).
fn parse_quantity(token: &str) -> Option<f64> {
    let mut chars = token.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        if let Some(&(_, value)) = FRACTIONS.iter().find(|&&(glyph, _)| glyph == first) {
            return Some(value);
        }
    }

    if let Some(caps) = SLASH_FRACTION.captures(token) {
        let numerator: f64 = caps[1].parse().ok()?;
        let denominator: f64 = caps[2].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    if DECIMAL.is_match(token) {
        return token.replace(',', ".").parse().ok();
    }

    None
}
