//! Parsing of asynchronous engine output (`info` / `bestmove` lines)

use anyhow::{anyhow, Context, Result};

/// Parsed `info` line from a USI engine
///
/// Unrecognized tokens are skipped; the `pv` run is consumed until the
/// first token that does not look like a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsiInfo {
    pub score_cp: i64,
    pub score_mate: i64,
    pub multi_pv: i64,
    pub depth: i64,
    pub sel_depth: i64,
    pub nodes: i64,
    pub nps: i64,
    pub time: i64,
    pub hash_full: i64,
    pub curr_move: Option<String>,
    pub pv: Vec<String>,

    pub upperbound: bool,
    pub lowerbound: bool,

    /// Score is a centipawn value
    pub is_cp: bool,
    /// Score is a mate distance
    pub is_mate: bool,
}

impl Default for UsiInfo {
    fn default() -> Self {
        UsiInfo {
            score_cp: 0,
            score_mate: 0,
            // multipv is 1 unless the engine says otherwise
            multi_pv: 1,
            depth: 0,
            sel_depth: 0,
            nodes: 0,
            nps: 0,
            time: 0,
            hash_full: 0,
            curr_move: None,
            pv: Vec::new(),
            upperbound: false,
            lowerbound: false,
            is_cp: false,
            is_mate: false,
        }
    }
}

/// A token is a move if it is 4-5 chars and starts with a digit
/// (board move) or a drop prefix letter.
fn is_move_token(token: &str) -> bool {
    if !(token.len() == 4 || token.len() == 5) {
        return false;
    }
    matches!(
        token.as_bytes()[0],
        b'0'..=b'9' | b'P' | b'L' | b'N' | b'S' | b'G' | b'B' | b'R'
    )
}

fn next_int<'a, I>(tokens: &mut I, key: &str) -> Result<i64>
where
    I: Iterator<Item = &'a str>,
{
    let value = tokens.next().ok_or_else(|| anyhow!("'{key}' requires a value"))?;
    value.parse().with_context(|| format!("invalid {key} value: {value}"))
}

impl UsiInfo {
    /// Parse an `info` line (the `info` keyword itself may be included)
    pub fn parse(line: &str) -> Result<UsiInfo> {
        let mut info = UsiInfo::default();
        let mut tokens = line.split_whitespace().peekable();
        while let Some(token) = tokens.next() {
            match token {
                "info" => {}
                "multipv" => info.multi_pv = next_int(&mut tokens, "multipv")?,
                "cp" => {
                    info.score_cp = next_int(&mut tokens, "cp")?;
                    info.is_cp = true;
                }
                "mate" => {
                    info.score_mate = next_int(&mut tokens, "mate")?;
                    info.is_mate = true;
                }
                "depth" => info.depth = next_int(&mut tokens, "depth")?,
                "seldepth" => info.sel_depth = next_int(&mut tokens, "seldepth")?,
                "nodes" => info.nodes = next_int(&mut tokens, "nodes")?,
                "nps" => info.nps = next_int(&mut tokens, "nps")?,
                "time" => info.time = next_int(&mut tokens, "time")?,
                "hashfull" => info.hash_full = next_int(&mut tokens, "hashfull")?,
                "upperbound" => info.upperbound = true,
                "lowerbound" => info.lowerbound = true,
                "currmove" => info.curr_move = tokens.next().map(str::to_string),
                "pv" => {
                    while let Some(&token) = tokens.peek() {
                        if !is_move_token(token) {
                            break;
                        }
                        info.pv.push(token.to_string());
                        tokens.next();
                    }
                }
                // "score" and anything we do not track
                _ => {}
            }
        }
        Ok(info)
    }
}

/// Parsed `bestmove` line from a USI engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsiBestMove {
    pub best_move: String,
    pub ponder: Option<String>,
}

impl UsiBestMove {
    /// Parse a `bestmove <move> [ponder <move>]` line
    pub fn parse(line: &str) -> Result<UsiBestMove> {
        let mut best_move = None;
        let mut ponder = None;

        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            match token {
                "bestmove" => {
                    best_move =
                        Some(tokens.next().ok_or_else(|| anyhow!("bestmove requires a move"))?);
                }
                "ponder" => {
                    ponder = Some(tokens.next().ok_or_else(|| anyhow!("ponder requires a move"))?);
                }
                _ => return Err(anyhow!("invalid bestmove line: {line}")),
            }
        }

        Ok(UsiBestMove {
            best_move: best_move
                .ok_or_else(|| anyhow!("missing bestmove keyword: {line}"))?
                .to_string(),
            ponder: ponder.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usi_info_parse() {
        // trailing garbage ("(100.00%)") terminates the pv run
        let info = UsiInfo::parse(
            "info multipv 1 score cp 40 depth 64 pv 7g7f 3c3d 2g2f 8c8d 2f2e 4a3b 6i7h 8d8e (100.00%)",
        )
        .unwrap();
        assert_eq!(
            info,
            UsiInfo {
                multi_pv: 1,
                is_cp: true,
                depth: 64,
                score_cp: 40,
                pv: ["7g7f", "3c3d", "2g2f", "8c8d", "2f2e", "4a3b", "6i7h", "8d8e"]
                    .map(String::from)
                    .to_vec(),
                ..UsiInfo::default()
            }
        );

        let info = UsiInfo::parse(
            "info depth 17 seldepth 35 score cp -9236 upperbound nodes 9089473 nps 852111 hashfull 932 time 10667 pv 6h7g 5g6i+",
        )
        .unwrap();
        assert_eq!(
            info,
            UsiInfo {
                multi_pv: 1,
                is_cp: true,
                depth: 17,
                sel_depth: 35,
                score_cp: -9236,
                upperbound: true,
                nodes: 9089473,
                nps: 852111,
                hash_full: 932,
                time: 10667,
                pv: ["6h7g", "5g6i+"].map(String::from).to_vec(),
                ..UsiInfo::default()
            }
        );

        let info = UsiInfo::parse(
            "info depth 23 seldepth 16 score mate 15 multipv 3 nodes 8034018 nps 936911 hashfull 995 time 8575 pv N*3c 2a3c G*5a",
        )
        .unwrap();
        assert_eq!(
            info,
            UsiInfo {
                multi_pv: 3,
                is_mate: true,
                depth: 23,
                sel_depth: 16,
                score_mate: 15,
                nodes: 8034018,
                nps: 936911,
                hash_full: 995,
                time: 8575,
                pv: ["N*3c", "2a3c", "G*5a"].map(String::from).to_vec(),
                ..UsiInfo::default()
            }
        );
    }

    #[test]
    fn test_usi_info_signed_values() {
        let info = UsiInfo::parse("info score cp +120").unwrap();
        assert_eq!(info.score_cp, 120);
        assert!(info.is_cp);

        let info = UsiInfo::parse("info score mate -3").unwrap();
        assert_eq!(info.score_mate, -3);
        assert!(info.is_mate);
    }

    #[test]
    fn test_usi_info_currmove_and_bounds() {
        let info = UsiInfo::parse("info currmove 2g2f lowerbound").unwrap();
        assert_eq!(info.curr_move.as_deref(), Some("2g2f"));
        assert!(info.lowerbound);
        assert!(!info.upperbound);
    }

    #[test]
    fn test_usi_info_errors() {
        assert!(UsiInfo::parse("info depth").is_err());
        assert!(UsiInfo::parse("info depth x").is_err());
        assert!(UsiInfo::parse("info nodes 12three").is_err());
    }

    #[test]
    fn test_usi_bestmove_parse() {
        let best = UsiBestMove::parse("bestmove 7g7f").unwrap();
        assert_eq!(best, UsiBestMove { best_move: "7g7f".to_string(), ponder: None });

        let best = UsiBestMove::parse("bestmove 7g7f ponder 3c3d").unwrap();
        assert_eq!(
            best,
            UsiBestMove { best_move: "7g7f".to_string(), ponder: Some("3c3d".to_string()) }
        );

        let best = UsiBestMove::parse("bestmove resign").unwrap();
        assert_eq!(best.best_move, "resign");
    }

    #[test]
    fn test_usi_bestmove_errors() {
        assert!(UsiBestMove::parse("bestmove").is_err());
        assert!(UsiBestMove::parse("bestmove 7g7f junk 3c3d").is_err());
        assert!(UsiBestMove::parse("ponder 3c3d").is_err());
        assert!(UsiBestMove::parse("").is_err());
    }

    #[test]
    fn test_is_move_token() {
        assert!(is_move_token("7g7f"));
        assert!(is_move_token("5g6i+"));
        assert!(is_move_token("P*5e"));
        assert!(is_move_token("N*3c"));
        assert!(!is_move_token("(100.00%)"));
        assert!(!is_move_token("cp"));
        assert!(!is_move_token("resign"));
        assert!(!is_move_token(""));
    }
}
