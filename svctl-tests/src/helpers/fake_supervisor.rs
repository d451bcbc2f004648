//! A stand-in for runsv attached to one service directory
//!
//! Creates `supervise/ok` and `supervise/control` as real FIFOs and keeps
//! their read ends open on a background thread. Control bytes are recorded
//! and, unless told to ignore them, applied to a simulated process whose
//! state is published to `supervise/status` by atomic rename.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use svctl_protocol::{RunState, Status, now_counter};
use svctl_unix::fifo;

const POLL: Duration = Duration::from_millis(5);
const FIRST_PID: u32 = 1000;

/// State of the simulated process when the supervisor attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initial {
    Running,
    Stopped,
}

/// How the supervisor reacts to control bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Apply every byte the way runsv would
    Obey,
    /// Record bytes but never change state
    Ignore,
}

struct Shared {
    status: Status,
    received: Vec<u8>,
    next_pid: u32,
}

impl Shared {
    fn start(&mut self) {
        self.status.pid = self.next_pid;
        self.next_pid += 1;
        self.status.run_state = RunState::Running;
        self.status.paused = 0;
        self.status.term = 0;
        self.status.age = now_counter();
    }

    fn halt(&mut self) {
        self.status.pid = 0;
        self.status.run_state = RunState::Stopped;
        self.status.paused = 0;
        self.status.term = 0;
        self.status.age = now_counter();
    }

    fn apply(&mut self, byte: u8) {
        let running = self.status.run_state == RunState::Running;
        match byte {
            b'u' => {
                self.status.want = b'u';
                if !running {
                    self.start();
                }
            }
            b'd' => {
                self.status.want = b'd';
                if running {
                    self.halt();
                }
            }
            b'o' => {
                self.status.want = b'd';
                if !running {
                    self.start();
                }
            }
            b't' | b'k' => {
                if self.status.want == b'u' {
                    self.start();
                } else {
                    self.halt();
                }
            }
            b'p' if running => self.status.paused = 1,
            b'c' => self.status.paused = 0,
            _ => {}
        }
    }
}

pub struct FakeSupervisor {
    dir: PathBuf,
    shared: Arc<Mutex<Shared>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FakeSupervisor {
    /// Attach to the service at `dir`, creating its `supervise/` directory.
    pub fn attach(dir: &Path, initial: Initial, behavior: Behavior) -> std::io::Result<Self> {
        let supervise = dir.join("supervise");
        fs::create_dir_all(&supervise)?;
        for name in ["ok", "control"] {
            fifo::make_fifo(&supervise.join(name)).map_err(std::io::Error::from)?;
        }
        let ok = fifo::open_reader(&supervise.join("ok"))?;
        let control = fifo::open_reader(&supervise.join("control"))?;

        let status = match initial {
            Initial::Running => Status {
                age: now_counter(),
                nanos: 0,
                pid: FIRST_PID,
                paused: 0,
                want: b'u',
                term: 0,
                run_state: RunState::Running,
            },
            Initial::Stopped => Status {
                age: now_counter(),
                nanos: 0,
                pid: 0,
                paused: 0,
                want: b'd',
                term: 0,
                run_state: RunState::Stopped,
            },
        };
        publish(&supervise, &status)?;

        let shared = Arc::new(Mutex::new(Shared {
            status,
            received: Vec::new(),
            next_pid: FIRST_PID + 1,
        }));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = thread::spawn({
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&stop);
            let supervise = supervise.clone();
            move || serve(ok, control, &supervise, &shared, &stop, behavior)
        });

        Ok(Self {
            dir: dir.to_path_buf(),
            shared,
            stop,
            handle: Some(handle),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every control byte read so far, in arrival order.
    pub fn received(&self) -> Vec<u8> {
        lock(&self.shared).received.clone()
    }

    /// The status last published.
    pub fn status(&self) -> Status {
        lock(&self.shared).status
    }

    pub fn pid(&self) -> u32 {
        self.status().pid
    }
}

impl Drop for FakeSupervisor {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn publish(supervise: &Path, status: &Status) -> std::io::Result<()> {
    let tmp = supervise.join("status.new");
    fs::write(&tmp, status.encode())?;
    fs::rename(&tmp, supervise.join("status"))
}

// `_ok` is held only so that probes of `supervise/ok` find a reader.
fn serve(
    _ok: File,
    mut control: File,
    supervise: &Path,
    shared: &Mutex<Shared>,
    stop: &AtomicBool,
    behavior: Behavior,
) {
    let mut buf = [0u8; 64];
    while !stop.load(Ordering::SeqCst) {
        match control.read(&mut buf) {
            Ok(0) => thread::sleep(POLL),
            Ok(n) => {
                let mut state = lock(shared);
                state.received.extend_from_slice(&buf[..n]);
                if behavior == Behavior::Obey {
                    for &byte in &buf[..n] {
                        state.apply(byte);
                    }
                    let _ = publish(supervise, &state.status);
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {
                thread::sleep(POLL)
            }
            Err(_) => break,
        }
    }
}
