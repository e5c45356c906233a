//! Filesystem-backed worker context for local runs.
//!
//! Plays the role of the dispatch framework when a job is run from the
//! CLI or from tests: artifacts land in a scratch directory, engine log
//! lines go through tracing, and details/attachments are collected in
//! insertion order for inspection after the run.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, error, info, trace, warn, Level};

use crate::domain::context::{PublishError, WorkerContext};

pub struct LocalWorkerContext {
    temp_dir: PathBuf,
    worker_cores_limit: usize,
    effective_worker_cores_limit: Option<usize>,
    solve_details: IndexMap<String, String>,
    output_attachments: IndexMap<String, PathBuf>,
}

impl LocalWorkerContext {
    pub fn new(temp_dir: PathBuf, worker_cores_limit: usize) -> Self {
        Self {
            temp_dir,
            worker_cores_limit,
            effective_worker_cores_limit: None,
            solve_details: IndexMap::new(),
            output_attachments: IndexMap::new(),
        }
    }

    pub fn solve_details(&self) -> &IndexMap<String, String> {
        &self.solve_details
    }

    pub fn output_attachments(&self) -> &IndexMap<String, PathBuf> {
        &self.output_attachments
    }

    pub fn effective_worker_cores_limit(&self) -> Option<usize> {
        self.effective_worker_cores_limit
    }
}

impl WorkerContext for LocalWorkerContext {
    fn worker_cores_limit(&self) -> usize {
        self.worker_cores_limit
    }

    fn set_effective_worker_cores_limit(&mut self, cores: usize) {
        info!(cores, "effective worker cores applied");
        self.effective_worker_cores_limit = Some(cores);
    }

    fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    fn log_engine(&mut self, level: Level, message: &str) {
        if level == Level::ERROR {
            error!(target: "engine", "{}", message);
        } else if level == Level::WARN {
            warn!(target: "engine", "{}", message);
        } else if level == Level::INFO {
            info!(target: "engine", "{}", message);
        } else if level == Level::DEBUG {
            debug!(target: "engine", "{}", message);
        } else {
            trace!(target: "engine", "{}", message);
        }
    }

    fn add_solve_details(&mut self, details: IndexMap<String, String>) {
        self.solve_details.extend(details);
    }

    fn set_output_attachment(&mut self, name: &str, file: &Path) -> Result<(), PublishError> {
        if !file.is_file() {
            return Err(PublishError::Register {
                name: name.to_string(),
                reason: format!("{} is not a readable file", file.display()),
            });
        }
        self.output_attachments
            .insert(name.to_string(), file.to_path_buf());
        Ok(())
    }
}
