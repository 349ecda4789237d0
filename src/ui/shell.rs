use std::io::{self, BufRead, Write};

use crate::api::Backend;
use crate::ui::dashboard::Dashboard;
use crate::ui::panels;

const HELP: &str = "\
Commands:
  refresh            reload news and incidents
  news               reload the news feed
  incidents          reload the incident list
  chat <message>     ask the chatbot a question
  desc <text>        set the incident description
  loc <text>         set the incident location
  report             submit the drafted incident
  show               print all panels
  help               show this text
  quit               exit";

/// Interactive dashboard loop. Fires the two initial loads concurrently,
/// renders, then reads commands until EOF or `quit`.
pub async fn run<B: Backend>(dash: Dashboard<B>) -> anyhow::Result<()> {
    println!("HSE GO terminal client. Type `help` for commands.");
    tokio::join!(dash.load_news(), dash.load_incidents());
    print!("{}", panels::render(&dash.snapshot()));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "show" => print!("{}", panels::render(&dash.snapshot())),
            "refresh" => {
                tokio::join!(dash.load_news(), dash.load_incidents());
                print!("{}", panels::render(&dash.snapshot()));
            }
            "news" => {
                dash.load_news().await;
                let snapshot = dash.snapshot();
                print!("{}", panels::news_panel(&snapshot.news));
                print_status(&snapshot);
            }
            "incidents" => {
                dash.load_incidents().await;
                let snapshot = dash.snapshot();
                print!("{}", panels::incidents_panel(&snapshot.incidents));
                print_status(&snapshot);
            }
            "chat" => match dash.send_chat(rest).await {
                Ok(()) => {
                    let snapshot = dash.snapshot();
                    print!("{}", panels::chat_panel(snapshot.chat.as_ref()));
                    print_status(&snapshot);
                }
                Err(rejection) => println!("{}", rejection.prompt()),
            },
            "desc" => dash.edit_description(rest),
            "loc" => dash.edit_location(rest),
            "report" => match dash.submit_incident().await {
                Ok(()) => {
                    let snapshot = dash.snapshot();
                    print!("{}", panels::incidents_panel(&snapshot.incidents));
                    print_status(&snapshot);
                }
                Err(rejection) => println!("{}", rejection.prompt()),
            },
            other => println!("Unknown command: {other} (try `help`)"),
        }
    }

    dash.close();
    Ok(())
}

fn print_status(snapshot: &crate::ui::dashboard::Snapshot) {
    let status = panels::status_line(snapshot);
    if !status.is_empty() {
        println!("{status}");
    }
}
