use std::path::PathBuf;

use forge_sync::{ForgeError, Reconfigure};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

/// Sends SIGHUP to the host process named by a PID file, asking it to re-read
/// its project list from the refreshed cache. Fire-and-forget.
pub struct PidFileReconfigure {
    pid_file: PathBuf,
}

impl PidFileReconfigure {
    pub fn new(pid_file: impl Into<PathBuf>) -> Self {
        Self {
            pid_file: pid_file.into(),
        }
    }
}

impl Reconfigure for PidFileReconfigure {
    fn request_reconfiguration(&self) -> Result<(), ForgeError> {
        let contents = std::fs::read_to_string(&self.pid_file)
            .map_err(|e| ForgeError::Io(format!("reading {}: {e}", self.pid_file.display())))?;

        let pid: i32 = contents.trim().parse().map_err(|e| {
            ForgeError::Io(format!("invalid pid in {}: {e}", self.pid_file.display()))
        })?;

        kill(Pid::from_raw(pid), Signal::SIGHUP)
            .map_err(|e| ForgeError::Io(format!("signalling pid {pid}: {e}")))?;

        log::info!("sent SIGHUP to host process {pid}");
        Ok(())
    }
}
