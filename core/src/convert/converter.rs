use super::process::{run_monitored, ProcessOutcome};
use crate::error::{NeuroselectError, Result};
use log::info;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Settings for the external DICOM-to-NIfTI converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Converter executable, looked up in PATH
    pub program: String,

    /// Write `.nii.gz` instead of `.nii`
    pub gzip: bool,

    /// Write JSON sidecars
    pub sidecar: bool,

    /// Wall-clock limit per invocation; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            program: "dcm2niix".to_string(),
            gzip: true,
            sidecar: true,
            timeout: None,
        }
    }
}

impl ConverterOptions {
    /// Builder: timeout in seconds, 0 meaning no limit
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Arguments for one conversion, input directory last
    pub fn arguments(&self, input_dir: &Path, output_dir: &Path, file_stem: &str) -> Vec<String> {
        vec![
            "-b".to_string(),
            yes_no(self.sidecar).to_string(),
            "-i".to_string(),
            "y".to_string(),
            "-z".to_string(),
            yes_no(self.gzip).to_string(),
            "-f".to_string(),
            file_stem.to_string(),
            "-o".to_string(),
            output_dir.display().to_string(),
            input_dir.display().to_string(),
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "y"
    } else {
        "n"
    }
}

/// Wrapper around the converter executable
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConverterOptions,
    interrupt: Arc<AtomicBool>,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares a flag that, once raised, kills the running conversion
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    /// Checks that the converter can be started
    ///
    /// Only a failure to spawn counts; the help exit status is ignored.
    pub fn check_available(&self) -> Result<()> {
        Command::new(&self.options.program)
            .arg("-h")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|_| ())
            .map_err(|_| NeuroselectError::ConverterNotFound(self.options.program.clone()))
    }

    /// Converts the DICOM files in `input_dir` into `output_dir/<file_stem>.*`
    ///
    /// Converter output is passed to `on_line` as it arrives.
    ///
    /// # Errors
    ///
    /// - [`ConverterFailed`](NeuroselectError::ConverterFailed) on a non-zero exit
    /// - [`ConverterTimeout`](NeuroselectError::ConverterTimeout) when the
    ///   timeout elapsed and the process was killed
    /// - [`Interrupted`](NeuroselectError::Interrupted) when interrupted
    pub fn convert<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        file_stem: &str,
        on_line: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        let args = self.options.arguments(input_dir, output_dir, file_stem);
        info!("Running {} {}", self.options.program, args.join(" "));

        let mut cmd = Command::new(&self.options.program);
        cmd.args(&args);

        let outcome = run_monitored(&mut cmd, self.options.timeout, &self.interrupt, on_line)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    NeuroselectError::ConverterNotFound(self.options.program.clone())
                }
                _ => NeuroselectError::IoError(e),
            })?;

        match outcome {
            ProcessOutcome::Exited(Some(0)) => Ok(()),
            ProcessOutcome::Exited(code) => Err(NeuroselectError::ConverterFailed {
                program: self.options.program.clone(),
                code,
            }),
            ProcessOutcome::TimedOut => Err(NeuroselectError::ConverterTimeout {
                program: self.options.program.clone(),
                seconds: self.options.timeout.map(|t| t.as_secs()).unwrap_or(0),
            }),
            ProcessOutcome::Interrupted => Err(NeuroselectError::Interrupted),
        }
    }
}
