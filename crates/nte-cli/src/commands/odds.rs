use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nte_mechanics::rules::RISK_DRAW_LIMIT;
use nte_mechanics::{EntropySource, SessionConfig, simulate, success_probability};

pub fn run(config: &SessionConfig, trials: u32) -> Result<(), String> {
    let (white, black) = config.rules.resolve();
    let limit = config.base_limit();

    println!(
        "  {} {white} white + {black} black, limit {limit}",
        "Odds".bold()
    );

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Draws", "At least one white"]);
    for draws in (1..=limit).chain(std::iter::once(RISK_DRAW_LIMIT)) {
        let label = if draws == RISK_DRAW_LIMIT {
            format!("{draws} (risk)")
        } else {
            draws.to_string()
        };
        table.add_row(vec![label, percent(success_probability(white, black, draws))]);
    }
    println!("{table}");

    if trials > 0 {
        let rng = EntropySource::from_seed_or_os(config.seed);
        let estimate = simulate(config, trials, rng);
        println!(
            "  Simulated {trials} tests at limit {limit}: {}",
            percent(estimate).bold()
        );
    }
    Ok(())
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}
