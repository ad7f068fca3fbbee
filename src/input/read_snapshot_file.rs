// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/input/read_snapshot_file.rs - JSON 快照文件输入
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  input::SnapshotSource,
  snapshot::DashboardSnapshot,
  status::SystemStatus,
};

#[derive(Error, Debug)]
pub enum SnapshotFileInputError {
  #[error("URI schema mismatch")]
  SchemaMismatch,
  #[error("I/O error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON error: {0}")]
  JsonError(#[from] serde_json::Error),
}

/// 从 JSON 文件读取快照
///
/// `snapshot:///path/to/dashboard.json` 读取完整快照；
/// 带 `?status` 时文件内容只是状态接口的返回体，日志为空。
#[derive(Debug, Clone)]
pub struct SnapshotFileInput {
  path: PathBuf,
  status_only: bool,
}

impl FromUrlWithScheme for SnapshotFileInput {
  const SCHEME: &'static str = "snapshot";
}

impl FromUrl for SnapshotFileInput {
  type Error = SnapshotFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(SnapshotFileInputError::SchemaMismatch);
    }

    let status_only = url.query_pairs().any(|(k, _)| k == "status");
    Ok(SnapshotFileInput::new(url.path()).status_only(status_only))
  }
}

impl SnapshotFileInput {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      status_only: false,
    }
  }

  pub fn status_only(mut self, status_only: bool) -> Self {
    self.status_only = status_only;
    self
  }
}

impl SnapshotSource for SnapshotFileInput {
  type Error = SnapshotFileInputError;

  fn fetch(&self) -> Result<DashboardSnapshot, Self::Error> {
    let data = std::fs::read(&self.path)?;
    if self.status_only {
      let status: SystemStatus = serde_json::from_slice(&data)?;
      Ok(DashboardSnapshot::from_status(status))
    } else {
      Ok(serde_json::from_slice(&data)?)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::input::{InputError, InputWrapper};

  fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("xiyang-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn reads_full_snapshot() {
    let path = temp_file(
      "full.json",
      r#"{"status": {"camera_active": true}, "model_logs": [{"timestamp": "2026-10-16T10:00:00"}]}"#,
    );
    let snapshot = SnapshotFileInput::new(&path).fetch().unwrap();
    assert!(snapshot.status.unwrap().camera_active);
    assert_eq!(snapshot.model_logs.len(), 1);
    std::fs::remove_file(path).unwrap();
  }

  #[test]
  fn reads_bare_status_from_url() {
    let path = temp_file("status.json", r#"{"interval_time": 300, "model_loaded": true}"#);
    let url = Url::parse(&format!("snapshot://{}?status", path.display())).unwrap();
    let input = InputWrapper::from_url(&url).unwrap();

    let snapshot = input.fetch().unwrap();
    assert_eq!(snapshot.status.map(|s| s.interval_time), Some(300));
    assert!(snapshot.model_logs.is_empty());
    std::fs::remove_file(path).unwrap();
  }

  #[test]
  fn broken_json_is_an_error() {
    let path = temp_file("broken.json", "{ not json");
    assert!(matches!(
      SnapshotFileInput::new(&path).fetch(),
      Err(SnapshotFileInputError::JsonError(_))
    ));
    std::fs::remove_file(path).unwrap();
  }

  #[test]
  fn unknown_scheme_is_rejected() {
    let url = Url::parse("rtsp://camera.local/stream").unwrap();
    assert!(matches!(
      InputWrapper::from_url(&url),
      Err(InputError::SchemeMismatch)
    ));
  }
}
