//! Printer errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    /// TCP connect to a network printer failed
    #[error("Cannot reach printer at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// No answer from a network printer within the connect timeout
    #[error("Printer at {0} did not answer in time")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Printer is offline or not installed
    #[error("Printer offline: {0}")]
    Offline(String),

    /// Bad printer settings (address, backend)
    #[error("Invalid printer config: {0}")]
    InvalidConfig(String),

    /// The OS print queue rejected the job
    #[error("Print queue {queue} rejected the job: {message}")]
    Spooler { queue: String, message: String },

    /// Win32 spooler API failure
    #[cfg(windows)]
    #[error("Printer driver error: {0}")]
    Driver(String),
}

pub type PrintResult<T> = Result<T, PrintError>;
