// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/snapshot.rs - 仪表盘快照与最后一次有效状态
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

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::detection::Detection;
use crate::logs::{HostMetrics, ModelLog, ProgramLog, RECENT_LOG_LIMIT, recent_first};
use crate::status::SystemStatus;
use crate::weather::WeatherSnapshot;

pub const CONNECTION_WARNING: &str = "Failed to connect to solar panel system";

/// 一次刷新读到的全部数据
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DashboardSnapshot {
  #[serde(default)]
  pub status: Option<SystemStatus>,
  #[serde(default)]
  pub model_logs: Vec<ModelLog>,
  #[serde(default)]
  pub program_logs: Vec<ProgramLog>,
}

impl DashboardSnapshot {
  pub fn from_status(status: SystemStatus) -> Self {
    Self {
      status: Some(status),
      ..Default::default()
    }
  }

  pub fn recent_model_logs(&self) -> Vec<&ModelLog> {
    recent_first(&self.model_logs, RECENT_LOG_LIMIT)
  }

  pub fn recent_program_logs(&self) -> Vec<&ProgramLog> {
    recent_first(&self.program_logs, RECENT_LOG_LIMIT)
  }

  /// 最新一条模型日志的检测结果
  pub fn primary_detections(&self) -> &[Detection] {
    self
      .recent_model_logs()
      .first()
      .copied()
      .map(ModelLog::detections)
      .unwrap_or(&[])
  }

  pub fn latest_metrics(&self) -> Option<&HostMetrics> {
    self
      .recent_model_logs()
      .first()
      .copied()
      .and_then(|log| log.raspberry_details.as_ref())
  }

  pub fn weather(&self) -> Option<&WeatherSnapshot> {
    self.status.as_ref()?.weather_data.as_ref()
  }
}

/// 轮询侧的状态：刷新失败时保留上一次成功读到的快照
#[derive(Debug, Default)]
pub struct DashboardState {
  snapshot: DashboardSnapshot,
  warning: Option<String>,
  loaded: bool,
}

impl DashboardState {
  /// 返回本次是否拿到了新数据
  pub fn update<E: Display>(&mut self, fetched: Result<DashboardSnapshot, E>) -> bool {
    match fetched {
      Ok(snapshot) => {
        if self.warning.take().is_some() {
          info!("连接已恢复");
        }
        self.snapshot = snapshot;
        self.loaded = true;
        true
      }
      Err(err) => {
        warn!("刷新失败，继续使用上一次的数据: {}", err);
        self.warning = Some(CONNECTION_WARNING.to_string());
        false
      }
    }
  }

  pub fn snapshot(&self) -> &DashboardSnapshot {
    &self.snapshot
  }

  pub fn warning(&self) -> Option<&str> {
    self.warning.as_deref()
  }

  pub fn is_loaded(&self) -> bool {
    self.loaded
  }
}
