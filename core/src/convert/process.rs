use log::warn;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output is still read once the process itself has exited
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// How a monitored child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Exited on its own; `None` when terminated by a signal
    Exited(Option<i32>),
    /// Killed after exceeding the deadline
    TimedOut,
    /// Killed because the interrupt flag was raised
    Interrupted,
}

/// Runs `cmd` to completion, streaming stdout and stderr line by line
///
/// Each output line is handed to `on_line` as soon as it is read. The child
/// is killed when `timeout` elapses or when `interrupt` becomes true.
pub fn run_monitored<F>(
    cmd: &mut Command,
    timeout: Option<Duration>,
    interrupt: &AtomicBool,
    mut on_line: F,
) -> io::Result<ProcessOutcome>
where
    F: FnMut(&str),
{
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, tx.clone());
    }
    drop(tx);

    let deadline = timeout.map(|limit| Instant::now() + limit);
    let mut readers_done = false;
    let mut exited: Option<(ExitStatus, Instant)> = None;

    loop {
        if readers_done {
            if let Some((status, _)) = exited {
                return Ok(ProcessOutcome::Exited(status.code()));
            }
            thread::sleep(POLL_INTERVAL);
        } else {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => on_line(&line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => readers_done = true,
            }
        }

        if interrupt.load(Ordering::SeqCst) {
            if exited.is_none() {
                terminate(&mut child);
            }
            return Ok(ProcessOutcome::Interrupted);
        }

        let now = Instant::now();
        match exited {
            None => {
                if deadline.is_some_and(|d| now > d) {
                    terminate(&mut child);
                    return Ok(ProcessOutcome::TimedOut);
                }
                if let Some(status) = child.try_wait()? {
                    exited = Some((status, now));
                }
            }
            Some((status, at)) => {
                // Leftover descendants can hold the pipes open after exit
                let drain_over = now > at + DRAIN_GRACE || deadline.is_some_and(|d| now > d);
                if drain_over {
                    warn!("Stopped reading output of exited process, pipes still open");
                    return Ok(ProcessOutcome::Exited(status.code()));
                }
            }
        }
    }
}

fn forward_lines<R>(reader: R, tx: Sender<String>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

fn terminate(child: &mut Child) {
    // Already exited is fine
    let _ = child.kill();
    let _ = child.wait();
}
