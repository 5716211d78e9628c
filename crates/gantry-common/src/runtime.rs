use tokio::runtime::{Handle, Runtime};

use crate::config::RuntimeConfig;
use crate::error::{CommonError, CommonResult};

/// Owns the Tokio runtime that the framework process runs on.
#[derive(Debug)]
pub struct RuntimeManager {
    runtime: Runtime,
}

impl RuntimeManager {
    pub fn try_new(config: &RuntimeConfig) -> CommonResult<Self> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.thread_stack_size(config.stack_size).enable_all();
        if let Some(threads) = config.worker_threads {
            if threads == 0 {
                return Err(CommonError::config(
                    "runtime worker thread count must be positive",
                ));
            }
            builder.worker_threads(threads);
        }
        let runtime = builder
            .build()
            .map_err(|e| CommonError::internal(e.to_string()))?;
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            primary: self.runtime.handle().clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    primary: Handle,
}

impl RuntimeHandle {
    pub fn primary(&self) -> &Handle {
        &self.primary
    }
}
