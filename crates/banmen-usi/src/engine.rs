//! USI engine driver
//!
//! Spawns an external engine binary, feeds it commands over stdin and
//! consumes its stdout on a dedicated reader thread. Parsed `info` and
//! `bestmove` events are delivered through caller-supplied channels, so
//! capacity and back-pressure policy stay with the caller.

use crate::info::{UsiBestMove, UsiInfo};
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// Engine protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Spawned, nothing sent yet
    Initialized,
    /// `usi` sent, waiting for `usiok`
    WaitingUsiOk,
    /// `isready` sent, waiting for `readyok`
    WaitingReadyOk,
    /// Ready and not searching
    Idling,
    /// Searching (`go` sent)
    Thinking,
}

/// Engine metadata published by the reader thread
///
/// Kept behind a mutex so the caller may read it at any time, not only
/// in response to channel events.
#[derive(Debug, Clone)]
pub struct EngineMeta {
    pub name: String,
    pub author: String,
    pub state: EngineState,
    pub usi_ok: bool,
    pub ready_ok: bool,
}

impl Default for EngineMeta {
    fn default() -> Self {
        EngineMeta {
            name: String::new(),
            author: String::new(),
            state: EngineState::Initialized,
            usi_ok: false,
            ready_ok: false,
        }
    }
}

/// Handle to a running USI engine process
pub struct Engine {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    meta: Arc<Mutex<EngineMeta>>,
    reader: Option<JoinHandle<()>>,
}

fn lock_meta(meta: &Mutex<EngineMeta>) -> MutexGuard<'_, EngineMeta> {
    // A poisoned lock only means the reader thread panicked mid-update;
    // the metadata itself is still usable.
    meta.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Engine {
    /// Spawn `path` as a USI engine child process
    ///
    /// The child runs with its working directory set to the binary's
    /// parent directory. `info_tx` / `bestmove_tx` receive parsed engine
    /// output; pass `None` to discard a stream.
    pub fn spawn(
        path: impl AsRef<Path>,
        info_tx: Option<Sender<UsiInfo>>,
        bestmove_tx: Option<Sender<UsiBestMove>>,
    ) -> Result<Engine> {
        let path = path.as_ref();
        let mut command = Command::new(path);
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                command.current_dir(dir);
            }
        }
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn engine: {}", path.display()))?;

        let stdin = child.stdin.take().context("engine stdin unavailable")?;
        let stdout = child.stdout.take().context("engine stdout unavailable")?;

        let meta = Arc::new(Mutex::new(EngineMeta::default()));
        let reader_meta = Arc::clone(&meta);
        let reader = thread::Builder::new()
            .name("usi-reader".to_string())
            .spawn(move || read_loop(stdout, reader_meta, info_tx, bestmove_tx))
            .context("failed to spawn reader thread")?;

        Ok(Engine {
            child,
            stdin: BufWriter::new(stdin),
            meta,
            reader: Some(reader),
        })
    }

    /// Send a raw command line to the engine
    pub fn send(&mut self, command: &str) -> io::Result<()> {
        log::debug!("-> {command}");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()
    }

    /// Send `usi`; the engine should answer with identification and `usiok`
    pub fn send_usi(&mut self) -> io::Result<()> {
        lock_meta(&self.meta).state = EngineState::WaitingUsiOk;
        self.send("usi")
    }

    /// Send `isready`; the engine should answer `readyok`
    pub fn send_is_ready(&mut self) -> io::Result<()> {
        lock_meta(&self.meta).state = EngineState::WaitingReadyOk;
        self.send("isready")
    }

    /// Send `setoption name <name> value <value>`
    pub fn set_option(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.send(&format!("setoption name {name} value {value}"))
    }

    /// Send `position sfen <sfen> [moves ...]`
    pub fn send_position(&mut self, sfen: &str, moves: &[String]) -> io::Result<()> {
        let mut command = format!("position sfen {sfen}");
        if !moves.is_empty() {
            command.push_str(" moves");
            for mv in moves {
                command.push(' ');
                command.push_str(mv);
            }
        }
        self.send(&command)
    }

    /// Send `go infinite`; search runs until `stop`
    pub fn go_infinite(&mut self) -> io::Result<()> {
        lock_meta(&self.meta).state = EngineState::Thinking;
        self.send("go infinite")
    }

    /// Send `stop`; the engine answers with `bestmove`
    pub fn stop(&mut self) -> io::Result<()> {
        self.send("stop")
    }

    /// Current protocol state
    pub fn state(&self) -> EngineState {
        lock_meta(&self.meta).state
    }

    /// Snapshot of the engine metadata
    pub fn meta(&self) -> EngineMeta {
        lock_meta(&self.meta).clone()
    }

    /// Engine name from `id name`
    pub fn name(&self) -> String {
        lock_meta(&self.meta).name.clone()
    }

    /// Engine author from `id author`
    pub fn author(&self) -> String {
        lock_meta(&self.meta).author.clone()
    }

    /// Whether `usiok` has been received
    pub fn usi_ok(&self) -> bool {
        lock_meta(&self.meta).usi_ok
    }

    /// Whether `readyok` has been received
    pub fn ready_ok(&self) -> bool {
        lock_meta(&self.meta).ready_ok
    }

    /// Kill the engine process and reap the reader thread
    ///
    /// There is no cooperative shutdown; pending events may be dropped.
    /// With bounded caller channels, drain or drop the receivers first:
    /// joining waits for the reader's in-flight channel send.
    pub fn close(&mut self) -> io::Result<()> {
        if self.child.try_wait()?.is_none() {
            self.child.kill()?;
        }
        self.child.wait()?;
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("failed to close engine: {e}");
        }
    }
}

/// Consume engine stdout until EOF, classifying each line
fn read_loop(
    stdout: ChildStdout,
    meta: Arc<Mutex<EngineMeta>>,
    info_tx: Option<Sender<UsiInfo>>,
    bestmove_tx: Option<Sender<UsiBestMove>>,
) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("engine stdout read failed: {e}");
                break;
            }
        };
        let line = line.trim_end();
        log::debug!("<- {line}");

        if line == "usiok" {
            let mut meta = lock_meta(&meta);
            meta.state = EngineState::Idling;
            meta.usi_ok = true;
        } else if line == "readyok" {
            let mut meta = lock_meta(&meta);
            meta.state = EngineState::Idling;
            meta.ready_ok = true;
        } else if let Some(name) = line.strip_prefix("id name ") {
            lock_meta(&meta).name = name.to_string();
        } else if let Some(author) = line.strip_prefix("id author ") {
            lock_meta(&meta).author = author.to_string();
        } else if line.starts_with("info string") {
            // free-form engine chatter
        } else if line.starts_with("info") {
            if let Some(tx) = &info_tx {
                match UsiInfo::parse(line) {
                    Ok(info) => {
                        if tx.send(info).is_err() {
                            log::debug!("info receiver dropped");
                        }
                    }
                    Err(e) => log::warn!("discarding malformed info line: {e}"),
                }
            }
        } else if line.starts_with("bestmove") {
            // the state transition must be visible before the event
            lock_meta(&meta).state = EngineState::Idling;
            if let Some(tx) = &bestmove_tx {
                match UsiBestMove::parse(line) {
                    Ok(bestmove) => {
                        if tx.send(bestmove).is_err() {
                            log::debug!("bestmove receiver dropped");
                        }
                    }
                    Err(e) => log::warn!("discarding malformed bestmove line: {e}"),
                }
            }
        }
        // anything else is ignored
    }
    log::debug!("engine reader exiting on EOF");
}
