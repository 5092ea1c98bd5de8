//! Scripted USI engine used by the driver integration tests
//!
//! Speaks just enough of the protocol to exercise the full driver state
//! machine: identification, readiness, a canned search with `info`
//! output, and `bestmove` on `stop`.

use std::io::{self, BufRead, Write};

fn reply(out: &mut impl Write, line: &str) {
    // USI is line-oriented; flush per line so the driver sees it promptly
    writeln!(out, "{line}").expect("stdout closed");
    out.flush().expect("stdout closed");
}

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut thinking = false;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let command = line.trim();
        log::debug!("mock engine received: {command}");

        match command.split_whitespace().next() {
            Some("usi") => {
                reply(&mut out, "id name MockEngine");
                reply(&mut out, "id author banmen");
                reply(&mut out, "option name USI_Hash type spin default 256");
                reply(&mut out, "usiok");
            }
            Some("isready") => reply(&mut out, "readyok"),
            Some("position") | Some("setoption") | Some("usinewgame") => {}
            Some("go") => {
                thinking = true;
                reply(&mut out, "info string starting canned search");
                reply(&mut out, "info depth 1 seldepth 1 score cp 42 nodes 100 nps 1000 time 1 pv 7g7f 3c3d");
                reply(&mut out, "info depth 2 seldepth 3 score cp 54 nodes 2000 nps 20000 time 2 pv 7g7f 3c3d 2g2f");
            }
            Some("stop") => {
                if thinking {
                    thinking = false;
                    reply(&mut out, "bestmove 7g7f ponder 3c3d");
                }
            }
            Some("quit") => break,
            _ => {}
        }
    }
}
