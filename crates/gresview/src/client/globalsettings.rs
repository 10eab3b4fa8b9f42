use crate::client::output::outputs::Output;
use crate::common::config::ClusterConfig;

pub struct GlobalSettings {
    config: ClusterConfig,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(config: ClusterConfig, printer: Box<dyn Output>) -> Self {
        GlobalSettings { config, printer }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }
}
