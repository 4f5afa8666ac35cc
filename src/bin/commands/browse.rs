use std::io::{BufRead, Write};

use addrgen::lens::address::{AddressLens, HttpGeoService, InputMode};
use addrgen::lens::panel::{PanelCommand, PanelView, Tone, Workbench};
use addrgen::lens::utils::{wrap_text, OutputFormat};
use addrgen::AddrgenConfig;
use clap::Args;
use tracing::warn;

const MESSAGE_WIDTH: usize = 60;

const HELP: &str = "\
commands:
  generate [TEXT]      look up addresses for TEXT or the current input (alias: gen, g)
  input TEXT           replace the input text (alias: type)
  paste TEXT           paste TEXT into the input
  next | prev          move through the found addresses (alias: n, p)
  reset                clear the active panel (alias: r)
  mode ip|postal       switch panels (alias: tab)
  show                 print the active panel again (alias: s)
  quit                 leave (alias: q, exit)";

/// Arguments for the Browse command
#[derive(Args)]
pub struct BrowseArgs {
    /// Panel to start on
    #[clap(short, long, value_enum, default_value = "ip")]
    pub mode: InputMode,
}

/// One parsed line of user input
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Panel(Vec<PanelCommand>),
    Switch(InputMode),
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let action = match word.to_lowercase().as_str() {
        "generate" | "gen" | "g" => {
            if rest.is_empty() {
                Action::Panel(vec![PanelCommand::Generate])
            } else {
                Action::Panel(vec![
                    PanelCommand::Input(rest.to_string()),
                    PanelCommand::Generate,
                ])
            }
        }
        "input" | "type" => Action::Panel(vec![PanelCommand::Input(rest.to_string())]),
        "paste" => Action::Panel(vec![PanelCommand::Paste(rest.to_string())]),
        "next" | "n" => Action::Panel(vec![PanelCommand::Next]),
        "prev" | "previous" | "p" => Action::Panel(vec![PanelCommand::Previous]),
        "reset" | "r" => Action::Panel(vec![PanelCommand::Reset]),
        "mode" | "tab" => match rest.parse::<InputMode>() {
            Ok(mode) => Action::Switch(mode),
            Err(_) => Action::Unknown(line.to_string()),
        },
        "show" | "s" => Action::Show,
        "help" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        _ => Action::Unknown(line.to_string()),
    };
    Some(action)
}

fn render_view(view: &PanelView) -> String {
    let mut lines = vec![
        format!("[{}]", view.title),
        format!("{} {}", view.prompt, view.input),
        view.count_label.clone(),
    ];
    if !view.index_label.is_empty() {
        lines.push(view.index_label.clone());
    }
    if !view.message.is_empty() {
        let wrapped = wrap_text(&view.message, MESSAGE_WIDTH);
        match view.tone {
            Tone::Error => lines.extend(wrapped.into_iter().map(|l| format!("ERROR: {}", l))),
            _ => lines.extend(wrapped.into_iter().map(|l| format!("  {}", l))),
        }
    }
    if view.prev_enabled || view.next_enabled {
        let prev = if view.prev_enabled { "< prev" } else { "      " };
        let next = if view.next_enabled { "next >" } else { "" };
        lines.push(format!("{}  {}", prev, next).trim_end().to_string());
    }
    lines.join("\n")
}

fn print_view(view: &PanelView, output_format: &OutputFormat) {
    if output_format.is_json() {
        if let Some(s) = output_format.to_json(view) {
            println!("{}", s);
        }
    } else {
        println!("{}", render_view(view));
    }
}

pub fn run(config: &AddrgenConfig, args: BrowseArgs, output_format: OutputFormat) {
    let BrowseArgs { mode } = args;

    if !config.has_access_token() {
        warn!("no geocoding access token configured, every lookup will fail");
        eprintln!(
            "WARNING: no access token configured; export {} or set access_token",
            addrgen::config::FALLBACK_TOKEN_ENV
        );
    }

    let service = HttpGeoService::new(config);
    let mut bench = Workbench::new(|| AddressLens::new(&service, config.address_limit));
    bench.switch(mode);

    let interactive = !output_format.is_json();
    if interactive {
        println!("{}\n", HELP);
    }
    print_view(&bench.active().view(), &output_format);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("ERROR: unable to read input: {}", e);
                std::process::exit(1);
            }
            None => break,
        };

        let action = match parse_line(&line) {
            Some(action) => action,
            None => continue,
        };

        match action {
            Action::Quit => break,
            Action::Help => println!("{}", HELP),
            Action::Show => print_view(&bench.active().view(), &output_format),
            Action::Unknown(text) => {
                eprintln!("unknown command: {} (type `help` for the list)", text);
            }
            Action::Switch(mode) => {
                bench.switch(mode);
                print_view(&bench.active().view(), &output_format);
            }
            Action::Panel(commands) => {
                for command in commands {
                    if let Err(e) = bench.dispatch(command) {
                        if e.is_validation() {
                            eprintln!("WARNING: {}", e);
                        }
                        break;
                    }
                }
                print_view(&bench.active().view(), &output_format);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrgen::lens::address::Coordinate;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(
            parse_line("gen 8.8.8.8"),
            Some(Action::Panel(vec![
                PanelCommand::Input("8.8.8.8".to_string()),
                PanelCommand::Generate
            ]))
        );
        assert_eq!(
            parse_line("generate"),
            Some(Action::Panel(vec![PanelCommand::Generate]))
        );
        assert_eq!(
            parse_line("paste  94043 "),
            Some(Action::Panel(vec![PanelCommand::Paste("94043".to_string())]))
        );
        assert_eq!(parse_line("N"), Some(Action::Panel(vec![PanelCommand::Next])));
        assert_eq!(
            parse_line("tab zip"),
            Some(Action::Switch(InputMode::Postal))
        );
        assert_eq!(
            parse_line("mode moon"),
            Some(Action::Unknown("mode moon".to_string()))
        );
        assert_eq!(parse_line("exit"), Some(Action::Quit));
    }

    #[test]
    fn test_render_view() {
        let view = PanelView {
            mode: InputMode::Ip,
            title: InputMode::Ip.title(),
            prompt: InputMode::Ip.prompt(),
            input: "8.8.8.8".to_string(),
            state: "displaying",
            count: 2,
            count_label: "Found: 2 addresses".to_string(),
            index_label: "Address 1 of 2".to_string(),
            message: "1600 Amphitheatre Pkwy, Mountain View".to_string(),
            tone: Tone::Success,
            coordinate: Some(Coordinate::new(-122.1, 37.4)),
            prev_enabled: false,
            next_enabled: true,
        };
        let text = render_view(&view);
        assert!(text.contains("Enter IP address: 8.8.8.8"));
        assert!(text.contains("Address 1 of 2"));
        assert!(text.contains("  1600 Amphitheatre Pkwy"));
        assert!(text.ends_with("next >"));

        let failed = PanelView {
            message: "No addresses found".to_string(),
            tone: Tone::Error,
            index_label: String::new(),
            prev_enabled: false,
            next_enabled: false,
            ..view
        };
        assert!(render_view(&failed).ends_with("ERROR: No addresses found"));
    }
}
