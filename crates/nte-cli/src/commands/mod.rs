pub mod odds;
pub mod play;
pub mod resolve;
pub mod tiers;

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use nte_mechanics::{BagView, Difficulty, DrawPhase, DrawnToken, SessionConfig, TestView, Token};

/// Flags shared by every command that builds a bag.
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Traits in play, one white token each (0-12)
    #[arg(short, long)]
    traits: Option<i64>,

    /// Difficulty tier (facilissima, facile, normale, difficile,
    /// difficilissima, quasi_impossibile)
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Manual black token count, replacing the tier's (0-99)
    #[arg(short, long)]
    blacks: Option<i64>,

    /// Draws allowed before risk (1-4)
    #[arg(short, long)]
    limit: Option<i64>,

    /// RNG seed for reproducible draws
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RuleArgs {
    /// Build the session configuration from the file (if any) and flags.
    pub fn to_config(&self) -> Result<SessionConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                SessionConfig::from_json(&text).map_err(|e| e.to_string())?
            }
            None => SessionConfig::default(),
        };

        if let Some(traits) = self.traits {
            config = config.with_traits(traits);
        }
        if let Some(ref id) = self.difficulty {
            let difficulty = id.parse::<Difficulty>().map_err(|e| e.to_string())?;
            config = config.with_difficulty(difficulty);
        }
        if let Some(blacks) = self.blacks {
            config = config.with_black_override(Some(blacks));
        }
        if let Some(limit) = self.limit {
            config = config.with_draw_limit(limit);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Render one drawn token as a colored chip.
fn token_chip(drawn: &DrawnToken) -> String {
    let chip = match drawn.token {
        Token::White => " W ".black().on_white().to_string(),
        Token::Black => " B ".white().on_black().to_string(),
    };
    match drawn.phase {
        DrawPhase::Base => chip,
        DrawPhase::Risk => format!("{chip}{}", "!".red()),
    }
}

/// Render a session snapshot for the terminal.
pub fn render_view(view: &TestView) -> String {
    let mut out = String::new();

    let bag = match view.bag {
        BagView::Visible { white, black } => format!(
            "{} white, {} black ({} left)",
            white.to_string().bold(),
            black.to_string().bold(),
            white + black
        ),
        BagView::Hidden { remaining } => {
            format!("{} left, contents hidden by confusion", remaining.to_string().bold())
        }
    };
    out.push_str(&format!("  {} {bag}\n", "Bag:".bold()));

    let drawn = if view.history.is_empty() {
        "none yet".dimmed().to_string()
    } else {
        view.history
            .iter()
            .map(token_chip)
            .collect::<Vec<_>>()
            .join(" ")
    };
    out.push_str(&format!(
        "  {} {drawn}  {}\n",
        "Drawn:".bold(),
        format!("({}/{})", view.draws_made, view.effective_limit).dimmed()
    ));

    let result = if view.success {
        "SUCCESS".green().bold()
    } else {
        "no white, failure".red()
    };
    out.push_str(&format!("  {} {result}\n", "Result:".bold()));
    out.push_str(&format!(
        "  Successes: {} (extra: {})  Complications: {}",
        view.outcome.whites, view.extra_successes, view.complications
    ));
    if view.outcome.risk_blacks > 0 {
        out.push_str(&format!(
            " {}",
            format!("({} from risk)", view.outcome.risk_blacks).red()
        ));
    }
    out.push('\n');

    let mut flags = Vec::new();
    if view.risk_active {
        flags.push("risk taken".yellow().to_string());
    }
    if view.confusion_active {
        flags.push("confused".magenta().to_string());
    }
    if view.confusion_pending {
        flags.push("confusion armed for next test".magenta().to_string());
    }
    for effect in &view.claimed {
        flags.push(format!("{effect} claimed"));
    }
    if !flags.is_empty() {
        out.push_str(&format!("  {} {}\n", "Modifiers:".bold(), flags.join(", ")));
    }

    if !view.can_draw && !view.history.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            "Drawing over: limit reached or bag empty.".dimmed()
        ));
    }
    if view.can_activate_risk {
        out.push_str(&format!(
            "  {}\n",
            "You may take the risk and draw up to 5.".yellow()
        ));
    }

    out
}
