use colored::Colorize;

use nte_mechanics::{SessionConfig, TestSession};

use super::render_view;

pub fn run(config: SessionConfig, risk: bool, confused: bool, json: bool) -> Result<(), String> {
    let mut session = TestSession::new(config);
    session.set_confusion_pending(confused);
    session.start_test();

    while session.draw().is_some() {}
    if risk && session.activate_risk() {
        while session.draw().is_some() {}
    }

    let view = session.view();
    if json {
        let text = serde_json::to_string_pretty(&view).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let (white, black) = session.preview();
    println!(
        "  {} {white} white + {black} black, up to {} draws{}",
        "Test".bold(),
        session.base_limit(),
        if session.modifiers().risk_active() {
            ", risk taken".to_string()
        } else {
            String::new()
        }
    );
    print!("{}", render_view(&view));
    Ok(())
}
