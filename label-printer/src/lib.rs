//! # label-printer
//!
//! Label printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Latin label printers
//! - Network printing (TCP port 9100)
//! - OS print queue submission (CUPS `lp`)
//! - Windows driver printing
//!
//! Business logic (WHAT to print) stays in application code:
//! - Drop-off label composition and layout → label-server
//!
//! ## Example
//!
//! ```ignore
//! use label_printer::{EscPosBuilder, Printer, SpoolPrinter};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("Main Street Auto");
//! builder.reset_size();
//! builder.left();
//! builder.line("Module: 1 of 3");
//! builder.cut();
//!
//! let printer = SpoolPrinter::new("D450 Printer");
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, text_width, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer, SpoolPrinter};

#[cfg(windows)]
pub use printer::WindowsPrinter;
