//! A display server that reads events from a named pipe and reports on stdout.
//!
//! Every line written to the pipe is one JSON value:
//!
//! ```text
//! {"Outputs":[{"name":"HDMI-1","bbox":{"x":0,"y":0,"w":1920,"h":1080}}]}
//! {"Event":{"WindowCreate":[{"handle":1,"class":"st"},0,0]}}
//! {"Event":{"SendCommand":"NextLayout"}}
//! {"Event":{"KeyCombo":["Super | Shift","Return"]}}
//! ```
//!
//! Modifier and button masks are written as their flag names joined by `|`,
//! `""` for none.
//!
//! Actions and window geometry are written to stdout as JSON lines. This keeps the
//! manager usable headless, for scripting and for driving it from a real backend
//! process.
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tallwm_core::errors::DisplayQueryError;
use tallwm_core::models::Output;
use tallwm_core::{DisplayAction, DisplayEvent, DisplayServer, Window};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Notify};

/// One line read from the pipe.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum PipeInput {
    Event(DisplayEvent),
    /// The complete current output list. Replaces what was reported before.
    Outputs(Vec<Output>),
}

/// One line written to stdout.
#[derive(Serialize, Debug)]
enum PipeOutput<'a> {
    Action(&'a DisplayAction),
    Windows(Vec<&'a Window>),
}

type Sink = Mutex<Box<dyn Write + Send>>;

pub struct PipeDisplayServer {
    pipe_file: PathBuf,
    rx: mpsc::UnboundedReceiver<PipeInput>,
    readable: Arc<Notify>,
    outputs: Option<Vec<Output>>,
    sink: Sink,
}

impl Drop for PipeDisplayServer {
    fn drop(&mut self) {
        use std::os::unix::fs::OpenOptionsExt;
        self.rx.close();

        // Open fifo for write to unblock pending open for read operation that prevents tokio runtime
        // from shutting down.
        std::fs::OpenOptions::new()
            .write(true)
            .custom_flags(nix::fcntl::OFlag::O_NONBLOCK.bits())
            .open(&self.pipe_file)
            .ok();
    }
}

impl PipeDisplayServer {
    /// Create the named pipe and start listening on it. Reports go to stdout.
    ///
    /// # Errors
    ///
    /// Will error if unable to `mkfifo`, likely a filesystem issue
    /// such as inadequate permissions.
    pub async fn new(pipe_file: PathBuf) -> Result<Self, std::io::Error> {
        Self::with_sink(pipe_file, Box::new(std::io::stdout())).await
    }

    /// # Errors
    ///
    /// Will error if unable to `mkfifo`.
    pub async fn with_sink(
        pipe_file: PathBuf,
        sink: Box<dyn Write + Send>,
    ) -> Result<Self, std::io::Error> {
        fs::remove_file(pipe_file.as_path()).await.ok();
        nix::unistd::mkfifo(&pipe_file, nix::sys::stat::Mode::S_IRWXU)?;

        let path = pipe_file.clone();
        let readable = Arc::new(Notify::new());
        let notify = readable.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while !tx.is_closed() {
                if read_from_pipe(&path, &tx, &notify).await.is_none() {
                    break;
                }
            }
            fs::remove_file(path).await.ok();
        });

        Ok(Self {
            pipe_file,
            rx,
            readable,
            outputs: None,
            sink: Mutex::new(sink),
        })
    }

    /// Where the pipe of the current session lives.
    ///
    /// # Errors
    ///
    /// When the runtime directory cannot be determined or created.
    pub fn pipe_path() -> std::io::Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tallwm")?.place_runtime_file(pipe_name())
    }

    fn report(&self, output: &PipeOutput) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let written = serde_json::to_writer(&mut *sink, output)
            .map_err(std::io::Error::from)
            .and_then(|()| sink.write_all(b"\n"));
        if let Err(err) = written {
            tracing::error!("Failed to write report: {}", err);
        }
    }
}

#[must_use]
pub fn pipe_name() -> &'static Path {
    Path::new("events.pipe")
}

/// Read lines until the writer closes the pipe. `None` once the receiver is gone.
async fn read_from_pipe(
    pipe_file: &Path,
    tx: &mpsc::UnboundedSender<PipeInput>,
    readable: &Notify,
) -> Option<()> {
    let file = fs::File::open(pipe_file).await.ok()?;
    let mut lines = BufReader::new(file).lines();

    while let Some(line) = lines.next_line().await.ok()? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PipeInput>(&line) {
            Ok(input) => {
                tx.send(input).ok()?;
                readable.notify_one();
            }
            Err(err) => tracing::error!("Ignoring malformed input `{}`: {}", line, err),
        }
    }

    Some(())
}

impl DisplayServer for PipeDisplayServer {
    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        let mut events = vec![];
        while let Ok(input) = self.rx.try_recv() {
            match input {
                PipeInput::Event(event) => events.push(event),
                PipeInput::Outputs(outputs) => {
                    tracing::debug!("{} outputs reported", outputs.len());
                    self.outputs = Some(outputs);
                    events.push(DisplayEvent::OutputsChanged);
                }
            }
        }
        events
    }

    fn update_windows(&self, windows: Vec<&Window>) {
        self.report(&PipeOutput::Windows(windows));
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        self.report(&PipeOutput::Action(&act));
        None
    }

    fn enumerate_outputs(&mut self) -> Result<Vec<Output>, DisplayQueryError> {
        match &self.outputs {
            Some(outputs) if !outputs.is_empty() => Ok(outputs.clone()),
            _ => Err(DisplayQueryError::NoOutputs),
        }
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let readable = self.readable.clone();
        Box::pin(async move { readable.notified().await })
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.flush().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tallwm_core::models::{Rect, WindowHandle};
    use tallwm_core::utils::modmask_lookup::ModMask;
    use tallwm_core::Command;
    use tokio::io::AsyncWriteExt;

    async fn send(path: &Path, lines: &str) {
        let mut pipe = fs::OpenOptions::new()
            .write(true)
            .open(path)
            .await
            .expect("pipe opens");
        pipe.write_all(lines.as_bytes()).await.expect("pipe writes");
    }

    #[tokio::test]
    async fn events_and_outputs_are_read_from_the_pipe() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("events.pipe");
        let mut server = PipeDisplayServer::with_sink(path.clone(), Box::new(std::io::sink()))
            .await
            .expect("pipe created");
        assert_eq!(server.enumerate_outputs(), Err(DisplayQueryError::NoOutputs));

        send(
            &path,
            "{\"Outputs\":[{\"name\":\"a\",\"bbox\":{\"x\":0,\"y\":0,\"w\":800,\"h\":600}}]}\n\
             not json\n\
             {\"Event\":{\"SendCommand\":\"NextLayout\"}}\n\
             {\"Event\":{\"WindowDestroy\":7}}\n",
        )
        .await;

        let mut events = vec![];
        for _ in 0..50 {
            tokio::time::timeout(Duration::from_millis(100), server.wait_readable())
                .await
                .ok();
            events.append(&mut server.get_next_events());
            if events.len() >= 3 {
                break;
            }
        }
        assert!(matches!(events[0], DisplayEvent::OutputsChanged));
        assert!(matches!(
            events[1],
            DisplayEvent::SendCommand(Command::NextLayout)
        ));
        assert!(matches!(events[2], DisplayEvent::WindowDestroy(WindowHandle(7))));
        assert_eq!(
            server.enumerate_outputs(),
            Ok(vec![Output::new("a", Rect::new(0, 0, 800, 600))])
        );
    }

    #[test]
    fn inputs_parse_from_json_lines() {
        let input: PipeInput = serde_json::from_str(r#"{"Event":{"KeyCombo":["Super | Shift","Return"]}}"#)
            .expect("valid input");
        assert!(matches!(
            input,
            PipeInput::Event(DisplayEvent::KeyCombo(modifiers, key))
                if modifiers == ModMask::Super | ModMask::Shift && key == "Return"
        ));

        let input: PipeInput =
            serde_json::from_str(r#"{"Event":{"KeyCombo":["Super","Return"]}}"#).expect("valid input");
        assert!(matches!(
            input,
            PipeInput::Event(DisplayEvent::KeyCombo(modifiers, _)) if modifiers == ModMask::Super
        ));

        let numeric = serde_json::from_str::<PipeInput>(r#"{"Event":{"KeyCombo":[16,"Return"]}}"#);
        assert!(numeric.is_err());
    }
}
