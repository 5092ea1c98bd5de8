//! banmen-usi: USI engine driver
//!
//! Runs an external USI shogi engine as a child process, writes protocol
//! commands to its stdin and parses the asynchronous `info` / `bestmove`
//! output on a background reader thread. Parsed events are delivered
//! through caller-supplied crossbeam channels.
//!
//! ```no_run
//! use banmen_usi::Engine;
//! use crossbeam_channel::unbounded;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (info_tx, info_rx) = unbounded();
//! let (best_tx, best_rx) = unbounded();
//! let mut engine = Engine::spawn("/path/to/engine", Some(info_tx), Some(best_tx))?;
//!
//! engine.send_usi()?;
//! engine.send_is_ready()?;
//! engine.send_position("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", &[])?;
//! engine.go_infinite()?;
//! for info in info_rx.try_iter() {
//!     println!("depth {} score cp {}", info.depth, info.score_cp);
//! }
//! engine.stop()?;
//! let best = best_rx.recv()?;
//! println!("bestmove {}", best.best_move);
//! engine.close()?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod info;

pub use engine::{Engine, EngineMeta, EngineState};
pub use info::{UsiBestMove, UsiInfo};
