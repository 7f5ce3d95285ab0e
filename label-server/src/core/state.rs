use std::sync::Arc;

use crate::core::Config;
use crate::printing::{LabelRenderer, PrintDispatcher, PrinterBackend, TaskDispatcher};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝；请求之间没有可变共享数据。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | dispatcher | Arc<dyn PrintDispatcher> | 打印分发 |
#[derive(Clone)]
pub struct ServerState {
    config: Arc<Config>,
    dispatcher: Arc<dyn PrintDispatcher>,
}

impl ServerState {
    /// 根据配置创建打印后端和分发器
    ///
    /// 打印机离线只记录警告，不阻止启动 (标签任务各自记录失败)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let printer = PrinterBackend::from_config(&config.printer)?;
        let target = printer.describe();

        if printer.is_online().await {
            tracing::info!(printer = %target, "Printer online");
        } else {
            tracing::warn!(printer = %target, "Printer not reachable, labels will fail until it is");
        }

        let renderer = LabelRenderer::new(config.printer.label_width);
        let dispatcher = TaskDispatcher::new(printer, renderer);

        Ok(Self::with_dispatcher(config.clone(), Arc::new(dispatcher)))
    }

    /// 使用指定分发器创建状态 (测试注入)
    pub fn with_dispatcher(config: Config, dispatcher: Arc<dyn PrintDispatcher>) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &dyn PrintDispatcher {
        self.dispatcher.as_ref()
    }
}
