use std::io::{self, BufRead, Write};

use colored::Colorize;

use nte_mechanics::{EffectKind, RandomSource, SessionConfig, TestSession};

use super::render_view;

const HELP: &str = "\
Commands:
  new                 start a new test with a fresh bag
  draw                draw one token
  risk                take the risk after the base draws (limit 5)
  spend <effect>      spend the last black token (adrenaline, confusion)
  confuse / unconfuse arm or disarm confusion for the next test
  set <key> <value>   traits, difficulty, blacks (or 'off'), limit
  status              show the bag and the draws
  reset               restore every default
  help                show this help
  quit                leave the table";

pub fn run(config: SessionConfig) -> Result<(), String> {
    let mut session = TestSession::new(config);
    session.start_test();

    let (white, black) = session.preview();
    println!("  {} Not the End token bag", "Starting".bold());
    println!("  Bag: {white} white + {black} black, limit {}", session.base_limit());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match process(&mut session, input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}

/// Apply one line of player input to the session.
fn process<R: RandomSource>(session: &mut TestSession<R>, input: &str) -> Result<String, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();

    match cmd.as_str() {
        "new" | "n" => {
            session.start_test();
            Ok(format!("New test.\n{}", render_view(&session.view())))
        }
        "draw" | "d" => match session.draw() {
            Some(drawn) => Ok(format!(
                "Drew {}.\n{}",
                drawn.token,
                render_view(&session.view())
            )),
            None => Ok("No draw possible: limit reached or bag empty.".to_string()),
        },
        "risk" => {
            if session.activate_risk() {
                Ok(format!(
                    "Risk taken: limit raised to {}.",
                    session.effective_limit()
                ))
            } else {
                Ok("Risk is only available once the base draws are made and tokens remain."
                    .to_string())
            }
        }
        "spend" => {
            let name = parts
                .get(1)
                .ok_or_else(|| "usage: spend <adrenaline|confusion>".to_string())?;
            let kind = name.parse::<EffectKind>().map_err(|e| e.to_string())?;
            match session.spend(kind) {
                Some(_) => Ok(format!(
                    "Spent a black token on {kind}. Complications: {}.",
                    session.black_count()
                )),
                None if session.modifiers().is_claimed(kind) => {
                    Ok(format!("{kind} was already claimed this test."))
                }
                None => Ok("No black token to spend.".to_string()),
            }
        }
        "confuse" => {
            session.set_confusion_pending(true);
            Ok("Confusion armed for the next test.".to_string())
        }
        "unconfuse" => {
            session.set_confusion_pending(false);
            Ok("Confusion disarmed.".to_string())
        }
        "set" => {
            let (key, value) = match parts.as_slice() {
                [_, key, rest @ ..] if !rest.is_empty() => (*key, rest.join(" ")),
                _ => return Err("usage: set <key> <value>".to_string()),
            };
            session
                .config_mut()
                .apply_setting(key, &value)
                .map_err(|e| e.to_string())?;
            let (white, black) = session.preview();
            Ok(format!(
                "Next test: {white} white + {black} black, limit {}.",
                session.base_limit()
            ))
        }
        "status" | "s" => Ok(render_view(&session.view())),
        "reset" => {
            session.reset_all();
            Ok(format!("Everything reset.\n{}", render_view(&session.view())))
        }
        "help" | "h" | "?" => Ok(HELP.to_string()),
        "quit" | "q" => Ok("Goodbye!".to_string()),
        other => Err(format!("unknown command: {other} (try 'help')")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nte_mechanics::SequenceSource;

    fn session() -> TestSession<SequenceSource> {
        let mut s = TestSession::with_source(SessionConfig::default(), SequenceSource::constant(0));
        s.start_test();
        s
    }

    #[test]
    fn draw_and_status() {
        let mut s = session();
        let out = process(&mut s, "draw").unwrap();
        assert!(out.starts_with("Drew white."));
        assert_eq!(s.draws_made(), 1);
        assert!(process(&mut s, "status").unwrap().contains("SUCCESS"));
    }

    #[test]
    fn draw_when_exhausted() {
        let mut s = session();
        for _ in 0..4 {
            process(&mut s, "d").unwrap();
        }
        let out = process(&mut s, "draw").unwrap();
        assert!(out.contains("No draw possible"));
    }

    #[test]
    fn risk_flow() {
        let mut s = session();
        assert!(process(&mut s, "risk").unwrap().contains("only available"));
        for _ in 0..4 {
            process(&mut s, "draw").unwrap();
        }
        assert!(process(&mut s, "risk").unwrap().contains("limit raised to 5"));
    }

    #[test]
    fn spend_messages() {
        let config = SessionConfig::default().with_traits(0);
        let mut s = TestSession::with_source(config, SequenceSource::constant(0));
        s.start_test();
        assert!(process(&mut s, "spend adrenaline").unwrap().contains("No black"));
        process(&mut s, "draw").unwrap();
        process(&mut s, "draw").unwrap();
        assert!(process(&mut s, "spend adrenaline").unwrap().contains("Spent"));
        assert!(process(&mut s, "spend adrenaline").unwrap().contains("already claimed"));
        assert!(process(&mut s, "spend").is_err());
        assert!(process(&mut s, "spend luck").is_err());
    }

    #[test]
    fn set_and_new() {
        let mut s = session();
        let out = process(&mut s, "set traits 5").unwrap();
        assert!(out.contains("5 white + 3 black"));
        process(&mut s, "set difficulty quasi impossibile").unwrap();
        process(&mut s, "new").unwrap();
        assert_eq!(s.bag().remaining(), 11);
        assert!(process(&mut s, "set luck 3").is_err());
        assert!(process(&mut s, "set traits").is_err());
    }

    #[test]
    fn confuse_arms_next_test() {
        let mut s = session();
        process(&mut s, "confuse").unwrap();
        assert!(s.modifiers().confusion_pending());
        process(&mut s, "new").unwrap();
        assert!(s.modifiers().confusion_active());
        let out = process(&mut s, "status").unwrap();
        assert!(out.contains("contents hidden"));
    }

    #[test]
    fn unknown_command() {
        let mut s = session();
        assert!(process(&mut s, "dance").is_err());
    }
}
