// src/specs/detail.rs
//
// Marker `detail` popup → flat field set.
//
// The Lands popup is a stack of labelled lines. The territory's own block comes
// first, then an ownership line that opens the nation's block:
//
//   Level: Town
//   Balance: $12,345.67
//   Chunks: 10
//   Players (2): Alice, Bob
//   This land belongs to nation Rathnir:
//   Level: Kingdom
//   Capital: Stonehaven
//
// Both blocks reuse the `Level:` label, so territory rules only ever see the
// text before the ownership line and nation rules only the text after it.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::html;

/// Everything a detail popup can tell us. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailFields {
    pub level: Option<String>,
    pub balance: Option<f64>,
    pub chunks: Option<u64>,
    /// Count as printed in the `Players (n):` label.
    pub player_count: Option<u32>,
    pub players: Vec<String>,
    pub nation_name: Option<String>,
    pub nation_level: Option<String>,
    pub nation_capital: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Level,
    Balance,
    Chunks,
    Players,
    NationLevel,
    NationCapital,
}

/// `label` is a cheap substring pre-check; `pattern` does the capture.
struct Rule {
    label: &'static str,
    pattern: &'static str,
    target: Target,
}

const TERRITORY_RULES: &[Rule] = &[
    Rule { label: "Level:",    pattern: r"Level:\s*(\w+)",                   target: Target::Level },
    Rule { label: "Balance:",  pattern: r"Balance:\s*\$([0-9,]+\.\d{2})",    target: Target::Balance },
    Rule { label: "Chunks:",   pattern: r"Chunks:\s*(\d+)",                  target: Target::Chunks },
    Rule { label: "Players (", pattern: r"Players \((\d+)\):\s*((?s:.*))",   target: Target::Players },
];

const NATION_RULES: &[Rule] = &[
    Rule { label: "Level:",   pattern: r"Level:\s*(\w+)",    target: Target::NationLevel },
    Rule { label: "Capital:", pattern: r"Capital:\s*(.+)",   target: Target::NationCapital },
];

const OWNERSHIP_LABEL: &str = "This land belongs";

/// A roster runs until the first of these, or to the end of the section.
const ROSTER_STOPS: &[&str] = &[OWNERSHIP_LABEL, "Level:", "Balance:", "Chunks:", "Capital:"];
const OWNERSHIP_PATTERN: &str = r"This land belongs to nation ([^:\n]+):";

struct Compiled {
    rule: &'static Rule,
    re: Regex,
}

fn compile(rules: &'static [Rule]) -> Vec<Compiled> {
    rules
        .iter()
        .map(|rule| Compiled {
            rule,
            re: Regex::new(rule.pattern).expect("static detail pattern"),
        })
        .collect()
}

static TERRITORY: LazyLock<Vec<Compiled>> = LazyLock::new(|| compile(TERRITORY_RULES));
static NATION: LazyLock<Vec<Compiled>> = LazyLock::new(|| compile(NATION_RULES));
static OWNERSHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OWNERSHIP_PATTERN).expect("static ownership pattern"));

/// Parse one marker's HTML detail.
pub fn parse_detail(detail_html: &str) -> DetailFields {
    parse_text(&html::to_text(detail_html))
}

/// Same as `parse_detail` for text that is already free of markup.
pub fn parse_text(text: &str) -> DetailFields {
    let mut out = DetailFields::default();

    let (own, nation) = match OWNERSHIP.captures(text) {
        Some(caps) => {
            let stmt = caps.get(0).map_or(0..0, |m| m.range());
            out.nation_name = caps
                .get(1)
                .map(|m| m.as_str().trim())
                .filter(|n| !n.is_empty())
                .map(String::from);
            (&text[..stmt.start], Some(&text[stmt.end..]))
        }
        None => (text, None),
    };

    apply(&TERRITORY, own, &mut out);
    if let Some(section) = nation {
        apply(&NATION, section, &mut out);
    }
    out
}

fn apply(rules: &[Compiled], text: &str, out: &mut DetailFields) {
    for c in rules {
        if !text.contains(c.rule.label) {
            continue;
        }
        let Some(caps) = c.re.captures(text) else { continue };
        let first = caps.get(1).map_or("", |m| m.as_str());

        match c.rule.target {
            Target::Level => out.level = Some(s!(first)),
            Target::Balance => out.balance = parse_balance(first),
            Target::Chunks => out.chunks = first.parse().ok(),
            Target::Players => {
                out.player_count = first.parse().ok();
                out.players = split_players(caps.get(2).map_or("", |m| m.as_str()));
            }
            Target::NationLevel => out.nation_level = Some(s!(first)),
            Target::NationCapital => {
                out.nation_capital = Some(first.trim()).filter(|c| !c.is_empty()).map(String::from);
            }
        }
    }
}

/// `"12,345.67"` → `12345.67`
fn parse_balance(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

/// Comma-separated roster, possibly starting on the line after its label.
/// The list ends at the next known label or at the ownership statement,
/// which can run into it when the popup has no line-breaking markup.
fn split_players(raw: &str) -> Vec<String> {
    let end = ROSTER_STOPS
        .iter()
        .filter_map(|stop| raw.find(stop))
        .min()
        .unwrap_or(raw.len());
    let mut players: Vec<String> = Vec::new();
    for name in raw[..end].split([',', '\n']).map(str::trim).filter(|n| !n.is_empty()) {
        if !players.iter().any(|p| p == name) {
            players.push(s!(name));
        }
    }
    players
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPUP: &str = r#"<div class="lands-popup">
        <h3>Capital City</h3>
        <div><b>Level:</b> City</div>
        <div><b>Balance:</b> $12,345.67</div>
        <div><b>Chunks:</b> 10</div>
        <div><b>Players (3):</b> Alice, Bob, Carol</div>
        <div class="nation">
          <div>This land belongs to nation Atlantis:</div>
          <div><b>Level:</b> Empire</div>
          <div><b>Capital:</b> Poseidonia</div>
        </div>
    </div>"#;

    #[test]
    fn full_popup() {
        let d = parse_detail(POPUP);
        assert_eq!(d.level.as_deref(), Some("City"));
        assert_eq!(d.balance, Some(12345.67));
        assert_eq!(d.chunks, Some(10));
        assert_eq!(d.player_count, Some(3));
        assert_eq!(d.players, ["Alice", "Bob", "Carol"]);
        assert_eq!(d.nation_name.as_deref(), Some("Atlantis"));
        assert_eq!(d.nation_level.as_deref(), Some("Empire"));
        assert_eq!(d.nation_capital.as_deref(), Some("Poseidonia"));
    }

    #[test]
    fn balance_formats() {
        assert_eq!(parse_text("Balance: $12,345.67").balance, Some(12345.67));
        assert_eq!(parse_text("Balance: $0.00").balance, Some(0.0));
        assert_eq!(parse_text("Balance: $1,000,000.50").balance, Some(1_000_000.5));
        // Two decimals are mandatory
        assert_eq!(parse_text("Balance: $12").balance, None);
        assert_eq!(parse_text("Chunks: 3").balance, None);
    }

    #[test]
    fn nation_section_is_scoped() {
        let d = parse_text(
            "Level: Town Chunks: 4 This land belongs to nation Rathnir: Level: Kingdom Capital: Stonehaven",
        );
        assert_eq!(d.level.as_deref(), Some("Town"));
        assert_eq!(d.nation_name.as_deref(), Some("Rathnir"));
        assert_eq!(d.nation_level.as_deref(), Some("Kingdom"));
        assert_eq!(d.nation_capital.as_deref(), Some("Stonehaven"));
    }

    #[test]
    fn nation_level_never_leaks_into_territory() {
        let d = parse_text("Chunks: 4\nThis land belongs to nation Rathnir:\nLevel: Kingdom");
        assert_eq!(d.level, None);
        assert_eq!(d.nation_level.as_deref(), Some("Kingdom"));
    }

    #[test]
    fn missing_labels_are_absent_not_errors() {
        assert_eq!(parse_text(""), DetailFields::default());
        assert_eq!(parse_detail("<div>Welcome to spawn</div>"), DetailFields::default());

        let d = parse_text("Chunks: 2");
        assert_eq!(d.chunks, Some(2));
        assert_eq!(d.level, None);
        assert_eq!(d.nation_name, None);
        assert!(d.players.is_empty());
    }

    #[test]
    fn player_list_cut_at_ownership_statement() {
        // No colon after the nation name, so the ownership rule does not split
        // the text and the statement runs into the roster.
        let d = parse_text("Players (2): Alice, Bob This land belongs to nation Nowhere");
        assert_eq!(d.players, ["Alice", "Bob"]);
        assert_eq!(d.nation_name, None);
    }

    #[test]
    fn player_list_trims_and_dedups() {
        let d = parse_text("Players (4):  Alice ,, Bob,Alice , ");
        assert_eq!(d.player_count, Some(4));
        assert_eq!(d.players, ["Alice", "Bob"]);
    }

    #[test]
    fn empty_roster() {
        let d = parse_detail("<div>Players (0):</div><div>Chunks: 1</div>");
        assert_eq!(d.player_count, Some(0));
        assert!(d.players.is_empty());
        assert_eq!(d.chunks, Some(1));
    }

    #[test]
    fn roster_on_line_after_label() {
        let d = parse_detail(
            "<b>Players (2):</b><br>Alice, Bob<br>This land belongs to nation Atlantis:<br>Level: Empire",
        );
        assert_eq!(d.player_count, Some(2));
        assert_eq!(d.players, ["Alice", "Bob"]);
        assert_eq!(d.nation_name.as_deref(), Some("Atlantis"));
    }

    #[test]
    fn roster_spanning_lines_stops_at_next_label() {
        let d = parse_detail("<div>Players (3):</div><div>Alice,</div><div>Bob, Carol</div><div>Chunks: 4</div>");
        assert_eq!(d.players, ["Alice", "Bob", "Carol"]);
        assert_eq!(d.chunks, Some(4));
    }

    #[test]
    fn inline_markup_inside_roster() {
        let d = parse_detail("Players (2): <span>Alice</span>, <span>Bob</span><br>Chunks: 9");
        assert_eq!(d.players, ["Alice", "Bob"]);
        assert_eq!(d.chunks, Some(9));
    }

    #[test]
    fn nation_name_with_spaces() {
        let d = parse_detail("<p>This land belongs to nation  Holy Realm of Ash :</p><p>Capital: Cinder Hold</p>");
        assert_eq!(d.nation_name.as_deref(), Some("Holy Realm of Ash"));
        assert_eq!(d.nation_capital.as_deref(), Some("Cinder Hold"));
    }
}
