//! Printer adapters
//!
//! Each adapter takes a finished ESC/POS byte stream and hands it to one kind
//! of device: a raw TCP socket, a CUPS queue, or a Windows driver printer.

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const ONLINE_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Deliver one complete job
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Best-effort reachability probe; never errors
    async fn is_online(&self) -> bool;
}

/// Raw TCP printer ("JetDirect", usually port 9100)
///
/// One connection per job; the printer starts on EOF.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    /// `host:port`; hostnames resolve on every connect
    addr: String,
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{}:{}", host, port))
    }

    /// `ip:port` or `hostname:port`, e.g. `192.168.1.50:9100`,
    /// `printer.local:9100`
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr.trim();
        if addr.parse::<SocketAddr>().is_err() {
            let valid = addr
                .rsplit_once(':')
                .is_some_and(|(host, port)| {
                    !host.is_empty() && !host.contains(':') && port.parse::<u16>().is_ok()
                });
            if !valid {
                return Err(PrintError::InvalidConfig(format!(
                    "Invalid printer address: {}",
                    addr
                )));
            }
        }

        Ok(Self {
            addr: addr.to_string(),
            timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // The timeout also bounds name resolution
        let connect = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr.as_str()));
        let mut stream = match connect.await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(PrintError::Connect {
                    addr: self.addr.clone(),
                    source,
                });
            }
            Err(_) => return Err(PrintError::Timeout(self.addr.clone())),
        };

        stream.write_all(data).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        debug!("Label bytes written");
        Ok(())
    }

    async fn is_online(&self) -> bool {
        let probe =
            tokio::time::timeout(ONLINE_PROBE_TIMEOUT, TcpStream::connect(self.addr.as_str()));
        if let Ok(Ok(_)) = probe.await {
            return true;
        }
        warn!(addr = %self.addr, "Printer not answering on its port");
        false
    }
}

/// OS print queue printer (CUPS)
///
/// Pipes raw data into `lp -d <queue> -o raw`, so the queue's driver does
/// not re-render the ESC/POS stream.
#[derive(Debug, Clone)]
pub struct SpoolPrinter {
    name: String,
    command: String,
}

impl SpoolPrinter {
    /// Create a printer for the named queue
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            command: "lp".to_string(),
        }
    }

    /// Use a different submit command (e.g. a full path to `lp`)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn rejected(&self, message: String) -> PrintError {
        PrintError::Spooler {
            queue: self.name.clone(),
            message,
        }
    }
}

impl Printer for SpoolPrinter {
    #[instrument(skip(self, data), fields(queue = %self.name, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut child = Command::new(&self.command)
            .arg("-d")
            .arg(&self.name)
            .args(["-o", "raw"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.rejected("stdin unavailable".to_string()))?;
        stdin.write_all(data).await?;
        // Closing stdin ends the job for lp
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.rejected(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_request_id(&stdout) {
            Some(id) => info!(request_id = id, "Print job accepted by spooler"),
            None => info!("Print job accepted by spooler"),
        }
        Ok(())
    }

    #[instrument(skip(self), fields(queue = %self.name))]
    async fn is_online(&self) -> bool {
        let output = Command::new("lpstat")
            .arg("-p")
            .arg(&self.name)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                !String::from_utf8_lossy(&out.stdout).contains("disabled")
            }
            Ok(_) => {
                warn!("Queue not found");
                false
            }
            Err(e) => {
                warn!(error = %e, "lpstat unavailable");
                false
            }
        }
    }
}

/// Extract the job id from `lp` output ("request id is Queue-42 (1 file(s))")
fn parse_request_id(stdout: &str) -> Option<&str> {
    stdout
        .split("request id is ")
        .nth(1)?
        .split_whitespace()
        .next()
}

/// Installed Windows printer, fed raw through the spooler
#[cfg(windows)]
#[derive(Debug, Clone)]
pub struct WindowsPrinter {
    name: String,
}

/// Open spooler handle, closed on drop
#[cfg(windows)]
struct PrinterHandle(windows::Win32::Graphics::Printing::PRINTER_HANDLE);

#[cfg(windows)]
impl PrinterHandle {
    fn open(name: &str) -> PrintResult<Self> {
        use windows::Win32::Graphics::Printing::{OpenPrinterW, PRINTER_HANDLE};
        use windows::core::PCWSTR;

        let name_w = to_wide(name);
        let mut handle = PRINTER_HANDLE::default();
        unsafe { OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None) }
            .map_err(|e| PrintError::Driver(format!("OpenPrinterW({}): {}", name, e)))?;
        Ok(Self(handle))
    }

    /// `false` when the spooler reports the offline status bit
    fn is_online(&self) -> bool {
        use windows::Win32::Graphics::Printing::{
            GetPrinterW, PRINTER_INFO_6, PRINTER_STATUS_OFFLINE,
        };

        let mut needed = 0u32;
        unsafe {
            let _ = GetPrinterW(self.0, 6, None, &mut needed);
            if needed == 0 {
                return true;
            }
            let mut buf = vec![0u8; needed as usize];
            if GetPrinterW(self.0, 6, Some(buf.as_mut_slice()), &mut needed).is_err() {
                return true;
            }
            let info = *(buf.as_ptr() as *const PRINTER_INFO_6);
            info.dwStatus & PRINTER_STATUS_OFFLINE == 0
        }
    }

    /// One RAW document with a single page; returns the spooler job id
    fn write_document(&self, doc_name: &str, data: &[u8]) -> PrintResult<u32> {
        use core::ffi::c_void;
        use windows::Win32::Graphics::Printing::{
            DOC_INFO_1W, EndDocPrinter, EndPagePrinter, StartDocPrinterW, StartPagePrinter,
            WritePrinter,
        };
        use windows::core::PWSTR;

        let doc_name_w = to_wide(doc_name);
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        unsafe {
            let job_id = StartDocPrinterW(self.0, 1, &doc_info);
            if job_id == 0 {
                return Err(PrintError::Driver("StartDocPrinterW refused the job".into()));
            }

            let mut written = 0u32;
            let page_started = StartPagePrinter(self.0).as_bool();
            let ok = page_started
                && WritePrinter(
                    self.0,
                    data.as_ptr() as *const c_void,
                    data.len() as u32,
                    &mut written,
                )
                .as_bool();
            if page_started {
                let _ = EndPagePrinter(self.0);
            }
            let _ = EndDocPrinter(self.0);

            if !ok {
                return Err(PrintError::Driver("WritePrinter failed".into()));
            }
            if written as usize != data.len() {
                return Err(PrintError::Driver(format!(
                    "short write: {} of {} bytes",
                    written,
                    data.len()
                )));
            }
            Ok(job_id)
        }
    }
}

#[cfg(windows)]
impl Drop for PrinterHandle {
    fn drop(&mut self) {
        let _ = unsafe { windows::Win32::Graphics::Printing::ClosePrinter(self.0) };
    }
}

#[cfg(windows)]
impl WindowsPrinter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of local and connected printers
    pub fn list() -> PrintResult<Vec<String>> {
        use windows::Win32::Graphics::Printing::{
            EnumPrintersW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_4W,
        };

        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed = 0u32;
        let mut returned = 0u32;
        unsafe {
            let _ = EnumPrintersW(flags, None, 4, None, &mut needed, &mut returned);
            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf = vec![0u8; needed as usize];
            EnumPrintersW(flags, None, 4, Some(buf.as_mut_slice()), &mut needed, &mut returned)
                .map_err(|e| PrintError::Driver(format!("EnumPrintersW: {}", e)))?;

            let infos = std::slice::from_raw_parts(
                buf.as_ptr() as *const PRINTER_INFO_4W,
                returned as usize,
            );
            Ok(infos
                .iter()
                .filter(|info| !info.pPrinterName.is_null())
                .filter_map(|info| info.pPrinterName.to_string().ok())
                .collect())
        }
    }

    /// The named printer if installed, otherwise the system default
    pub fn resolve(name: &str) -> PrintResult<Self> {
        if Self::list()?.iter().any(|p| p == name) {
            return Ok(Self::new(name));
        }

        warn!(printer = name, "Printer not installed, falling back to system default");
        let default = default_printer().ok_or_else(|| PrintError::Offline(name.to_string()))?;
        info!(printer = %default, "Using system default printer");
        Ok(Self::new(&default))
    }

    fn write_raw(&self, data: &[u8]) -> PrintResult<()> {
        let handle = PrinterHandle::open(&self.name)?;
        if !handle.is_online() {
            return Err(PrintError::Offline(self.name.clone()));
        }

        let job_id = handle.write_document("Drop-off Label", data)?;
        info!(printer = %self.name, job_id, "Print job accepted by spooler");
        Ok(())
    }
}

#[cfg(windows)]
fn default_printer() -> Option<String> {
    use windows::Win32::Graphics::Printing::GetDefaultPrinterW;
    use windows::core::PWSTR;

    let mut needed = 0u32;
    unsafe {
        let _ = GetDefaultPrinterW(None, &mut needed);
        if needed == 0 {
            return None;
        }
        let mut buf = vec![0u16; needed as usize];
        if !GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed).as_bool() {
            return None;
        }
        PWSTR(buf.as_mut_ptr()).to_string().ok()
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(windows)]
impl Printer for WindowsPrinter {
    #[instrument(skip(self, data), fields(printer = %self.name, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // The spooler API blocks
        let printer = self.clone();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || printer.write_raw(&data))
            .await
            .map_err(|e| PrintError::Driver(format!("print task aborted: {}", e)))?
    }

    async fn is_online(&self) -> bool {
        let name = self.name.clone();
        tokio::task::spawn_blocking(move || {
            PrinterHandle::open(&name).is_ok_and(|handle| handle.is_online())
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_printer_new() {
        let printer = NetworkPrinter::new("192.168.1.100", 9100).unwrap();
        assert_eq!(printer.addr(), "192.168.1.100:9100");
    }

    #[test]
    fn test_network_printer_from_addr() {
        let printer = NetworkPrinter::from_addr("192.168.1.100:9100").unwrap();
        assert_eq!(printer.addr(), "192.168.1.100:9100");
    }

    #[test]
    fn test_network_printer_hostname() {
        let printer = NetworkPrinter::from_addr("printer.local:9100").unwrap();
        assert_eq!(printer.addr(), "printer.local:9100");
        assert!(NetworkPrinter::from_addr("[::1]:9100").is_ok());
    }

    #[test]
    fn test_invalid_addr() {
        for addr in ["invalid", "printer.local", ":9100", "printer.local:port", "::1:9100"] {
            let result = NetworkPrinter::from_addr(addr);
            assert!(
                matches!(result, Err(PrintError::InvalidConfig(_))),
                "{addr} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_network_print_resolves_hostname() {
        use tokio::io::AsyncReadExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::from_addr(&format!("localhost:{}", port))
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        printer.print(b"label").await.unwrap();

        assert_eq!(server.await.unwrap(), b"label");
    }

    #[test]
    fn test_parse_request_id() {
        assert_eq!(
            parse_request_id("request id is D450-42 (1 file(s))\n"),
            Some("D450-42")
        );
        assert_eq!(parse_request_id(""), None);
        assert_eq!(parse_request_id("lp: error"), None);
    }

    #[tokio::test]
    async fn test_network_print_to_closed_port_fails() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let printer = NetworkPrinter::from_addr(&addr.to_string())
            .unwrap()
            .with_timeout(Duration::from_millis(500));
        assert!(printer.print(b"label").await.is_err());
    }

    #[tokio::test]
    async fn test_network_print_delivers_bytes() {
        use tokio::io::AsyncReadExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
        printer.print(b"\x1B@hello").await.unwrap();
        drop(printer);

        assert_eq!(server.await.unwrap(), b"\x1B@hello");
    }

    #[test]
    fn test_timeout_message_names_printer() {
        let err = PrintError::Timeout("10.0.0.9:9100".to_string());
        assert_eq!(
            err.to_string(),
            "Printer at 10.0.0.9:9100 did not answer in time"
        );
    }

    #[tokio::test]
    async fn test_spool_missing_command_fails() {
        let printer = SpoolPrinter::new("D450").with_command("definitely-not-a-print-command");
        assert!(matches!(
            printer.print(b"label").await,
            Err(PrintError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spool_failure_names_queue() {
        // `false` reads nothing and exits non-zero
        let printer = SpoolPrinter::new("D450").with_command("false");
        match printer.print(b"label").await {
            Err(PrintError::Spooler { queue, .. }) => assert_eq!(queue, "D450"),
            Err(PrintError::Io(_)) => {} // stdin closed before the write finished
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
