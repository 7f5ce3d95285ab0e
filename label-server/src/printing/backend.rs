//! Printer backend selection
//!
//! Wraps the `label-printer` adapters in one concrete type so print futures
//! stay `Send` and can run on spawned tasks.

use label_printer::{NetworkPrinter, PrintError, PrintResult, Printer, SpoolPrinter};

use crate::core::config::{BackendKind, PrinterConfig};

/// The printer the service sends labels to
#[derive(Debug, Clone)]
pub enum PrinterBackend {
    Network(NetworkPrinter),
    Spool(SpoolPrinter),
    #[cfg(windows)]
    Driver(label_printer::WindowsPrinter),
}

impl PrinterBackend {
    /// Build the backend named by the configuration
    pub fn from_config(config: &PrinterConfig) -> PrintResult<Self> {
        match config.backend {
            BackendKind::Network => {
                let addr = config.addr.as_deref().ok_or_else(|| {
                    PrintError::InvalidConfig(
                        "PRINTER_ADDR is required for the network backend".to_string(),
                    )
                })?;
                Ok(Self::Network(NetworkPrinter::from_addr(addr)?))
            }
            BackendKind::Spool => Ok(Self::Spool(SpoolPrinter::new(&config.name))),
            BackendKind::Driver => Self::driver(&config.name),
        }
    }

    #[cfg(windows)]
    fn driver(name: &str) -> PrintResult<Self> {
        Ok(Self::Driver(label_printer::WindowsPrinter::resolve(name)?))
    }

    #[cfg(not(windows))]
    fn driver(_name: &str) -> PrintResult<Self> {
        Err(PrintError::InvalidConfig(
            "Driver printing not supported on this platform".to_string(),
        ))
    }

    /// Send rendered label bytes
    pub async fn print(&self, data: &[u8]) -> PrintResult<()> {
        match self {
            Self::Network(p) => p.print(data).await,
            Self::Spool(p) => p.print(data).await,
            #[cfg(windows)]
            Self::Driver(p) => p.print(data).await,
        }
    }

    pub async fn is_online(&self) -> bool {
        match self {
            Self::Network(p) => p.is_online().await,
            Self::Spool(p) => p.is_online().await,
            #[cfg(windows)]
            Self::Driver(p) => p.is_online().await,
        }
    }

    /// Human-readable target, for logs and health output
    pub fn describe(&self) -> String {
        match self {
            Self::Network(p) => format!("network {}", p.addr()),
            Self::Spool(p) => format!("spool {}", p.name()),
            #[cfg(windows)]
            Self::Driver(p) => format!("driver {}", p.name()),
        }
    }
}
