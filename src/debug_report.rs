use textloc::{LocalizeResult, RuleSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &LocalizeResult, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Localizing: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Table ━━━", ansi::GRAY));
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("family:"),
        palette.paint(format!("{:?}", res.family), ansi::BLUE),
        palette.dim("│ cached:"),
        palette.paint(res.table_cached.to_string(), ansi::YELLOW),
        palette.dim("│ text nodes:"),
        palette.paint(format!("{} ({} escaped)", res.text_nodes, res.escaped_nodes), ansi::YELLOW),
    );

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if res.rules.is_empty() {
        println!("{}", palette.dim("  No rules apply to this language"));
    } else {
        for rule in &res.rules {
            println!("  {}", fmt_rule(rule, &palette));
        }
        println!("\n{}", palette.dim("  Tip: set TEXTLOC_LOG=textloc=trace to see each rewritten text node"));
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    println!("  {}", palette.bold(palette.paint(&res.text, ansi::GREEN)));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Walk: {}",
        palette.paint(format!("{:?}", res.elapsed), ansi::GREEN),
        palette.paint(format!("{:?}", res.walk), ansi::CYAN),
    );
    println!();
}

fn fmt_rule(rule: &RuleSummary, palette: &ansi::Palette) -> String {
    let outcome = if rule.accepted > 0 {
        palette.paint(format!("✓ {} accepted", rule.accepted), ansi::GREEN)
    } else {
        palette.dim(format!("✗ {} accepted", rule.accepted))
    };
    format!(
        "{:<28} {}  {} {}  {} {}",
        palette.paint(&rule.name, ansi::CYAN),
        outcome,
        palette.dim("rejected:"),
        palette.paint(rule.rejected.to_string(), ansi::YELLOW),
        palette.dim("runs/skipped:"),
        palette.dim(format!("{}/{}", rule.tried, rule.skipped)),
    )
}
