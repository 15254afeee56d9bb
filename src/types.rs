//! Data types for the Livy sessions API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of session to start on the Livy server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Scala Spark session
    Spark,
    /// Python session
    PySpark,
    /// R session
    SparkR,
    /// Spark SQL session
    Sql,
}

/// Parameters for creating a new session.
///
/// Every field is optional; the server applies its own defaults. When
/// `kind` is left unset the client fills in [`SessionKind::Spark`]
/// before sending, so an all-default `SessionOptions` creates a Scala
/// session rather than failing validation on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// Session kind (spark, pyspark, sparkr, sql)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SessionKind>,
    /// User to impersonate when running the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_user: Option<String>,
    /// Jars to place on the session classpath
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jars: Option<Vec<String>>,
    /// Python files to place on PYTHONPATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub py_files: Option<Vec<String>>,
    /// Files to place in the executor working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Archives to extract into the executor working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archives: Option<Vec<String>>,
    /// Amount of memory for the driver process (e.g. "4g")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_memory: Option<String>,
    /// Number of cores for the driver process
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_cores: Option<u32>,
    /// Amount of memory per executor process (e.g. "2g")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_memory: Option<String>,
    /// Number of cores per executor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_cores: Option<u32>,
    /// Number of executors to launch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_executors: Option<u32>,
    /// YARN queue to submit to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    /// Name of the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Extra Spark configuration properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conf: Option<HashMap<String, String>>,
    /// Idle timeout in seconds before the server reclaims the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_timeout_in_second: Option<u32>,
}
