use std::io::BufRead;
use std::sync::mpsc as std_mpsc;
use tokio::sync::{mpsc, Mutex};

/// Line input read on a dedicated thread, one line per request.
///
/// A read that is still blocked when the session ends never holds up runtime
/// shutdown, and dropping a `read_line` future does not lose the line: the
/// next call picks up the outstanding read instead of starting another.
pub struct LineReader {
    state: Mutex<ReaderState>,
}

struct ReaderState {
    requests: std_mpsc::Sender<()>,
    lines: mpsc::UnboundedReceiver<Option<String>>,
    pending: bool,
}

impl LineReader {
    pub fn spawn<R>(source: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (requests, request_rx) = std_mpsc::channel::<()>();
        let (line_tx, lines) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            let mut source = source;
            while request_rx.recv().is_ok() {
                let mut line = String::new();
                let result = match source.read_line(&mut line) {
                    Ok(0) => None,
                    Ok(_) => Some(line),
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        None
                    }
                };
                let eof = result.is_none();
                if line_tx.send(result).is_err() || eof {
                    break;
                }
            }
        });

        Self {
            state: Mutex::new(ReaderState {
                requests,
                lines,
                pending: false,
            }),
        }
    }

    pub fn stdin() -> Self {
        Self::spawn(std::io::BufReader::new(std::io::stdin()))
    }

    /// Trimmed line, or `None` once the input is closed.
    pub async fn read_line(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        if !state.pending {
            if state.requests.send(()).is_err() {
                return None;
            }
            state.pending = true;
        }

        let line = state.lines.recv().await.flatten();
        state.pending = false;
        line.map(|l| l.trim().to_string())
    }
}
