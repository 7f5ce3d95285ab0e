use std::fmt;
use std::str::FromStr;

/// 打印后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Windows driver (Win32 spooler, raw datatype)
    Driver,
    /// OS print queue through CUPS `lp`
    Spool,
    /// Raw TCP, port 9100
    Network,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Driver => "driver",
            BackendKind::Spool => "spool",
            BackendKind::Network => "network",
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(windows) {
            BackendKind::Driver
        } else {
            BackendKind::Spool
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driver" => Ok(BackendKind::Driver),
            "spool" | "cups" => Ok(BackendKind::Spool),
            "network" | "tcp" => Ok(BackendKind::Network),
            other => Err(format!("unknown printer backend: {}", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 打印机配置
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// 打印机名称 (OS 队列名 / Windows 驱动名)
    pub name: String,
    /// 打印后端
    pub backend: BackendKind,
    /// 网络打印机地址 `host:port` (仅 network 后端)
    pub addr: Option<String>,
    /// 每行字符数
    pub label_width: usize,
}

/// 服务配置 - 启动时读取一次，显式传入服务
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | BIND_ADDR | 0.0.0.0 | 监听地址 |
/// | PRINTER_NAME | D450 Printer | 打印机名称 |
/// | PRINTER_BACKEND | driver (Windows) / spool | 打印后端 |
/// | PRINTER_ADDR | - | 网络打印机地址 `host:port` (IP 或主机名) |
/// | LABEL_WIDTH | 48 | 每行字符数 |
/// | MAX_LABELS | 500 | 单次提交最多标签数 (超出返回 400) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// PRINTER_BACKEND=network PRINTER_ADDR=192.168.1.50:9100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub bind_addr: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 打印机配置
    pub printer: PrinterConfig,
    /// 单次提交最多标签数
    pub max_labels: u32,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置 (测试时不必修改进程环境)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into()),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            printer: PrinterConfig {
                name: lookup("PRINTER_NAME")
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "D450 Printer".into()),
                backend: lookup("PRINTER_BACKEND")
                    .and_then(|b| b.parse().ok())
                    .unwrap_or_default(),
                addr: lookup("PRINTER_ADDR").filter(|a| !a.is_empty()),
                label_width: lookup("LABEL_WIDTH")
                    .and_then(|w| w.parse::<usize>().ok())
                    .filter(|w| *w > 0)
                    .unwrap_or(48),
            },
            max_labels: lookup("MAX_LABELS")
                .and_then(|m| m.parse::<u32>().ok())
                .filter(|m| *m > 0)
                .unwrap_or(500),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
        }
    }

    /// 监听地址 `ip:port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 4000);
        assert_eq!(config.listen_addr(), "0.0.0.0:4000");
        assert_eq!(config.printer.name, "D450 Printer");
        assert_eq!(config.printer.backend, BackendKind::default());
        assert_eq!(config.printer.addr, None);
        assert_eq!(config.printer.label_width, 48);
        assert_eq!(config.max_labels, 500);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("PRINTER_NAME", "Front_Desk"),
            ("PRINTER_BACKEND", "network"),
            ("PRINTER_ADDR", "192.168.1.50:9100"),
            ("LABEL_WIDTH", "32"),
            ("MAX_LABELS", "20"),
        ]);

        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.printer.name, "Front_Desk");
        assert_eq!(config.printer.backend, BackendKind::Network);
        assert_eq!(config.printer.addr.as_deref(), Some("192.168.1.50:9100"));
        assert_eq!(config.printer.label_width, 32);
        assert_eq!(config.max_labels, 20);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[
            ("HTTP_PORT", "not-a-port"),
            ("PRINTER_BACKEND", "carrier-pigeon"),
            ("LABEL_WIDTH", "0"),
            ("PRINTER_NAME", ""),
            ("MAX_LABELS", "-5"),
        ]);

        assert_eq!(config.http_port, 4000);
        assert_eq!(config.printer.backend, BackendKind::default());
        assert_eq!(config.printer.label_width, 48);
        assert_eq!(config.printer.name, "D450 Printer");
        assert_eq!(config.max_labels, 500);
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("Driver".parse::<BackendKind>(), Ok(BackendKind::Driver));
        assert_eq!("cups".parse::<BackendKind>(), Ok(BackendKind::Spool));
        assert_eq!(" tcp ".parse::<BackendKind>(), Ok(BackendKind::Network));
        assert!("fax".parse::<BackendKind>().is_err());
    }
}
