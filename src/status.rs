// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/status.rs - 系统状态
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

use serde::{Deserialize, Serialize};

use crate::weather::WeatherSnapshot;

const DEFAULT_INTERVAL_SECONDS: u32 = 60;

fn default_interval() -> u32 {
  DEFAULT_INTERVAL_SECONDS
}

/// 状态接口返回的系统状态
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SystemStatus {
  #[serde(default)]
  pub camera_active: bool,
  /// 拍摄间隔（秒）
  #[serde(default = "default_interval")]
  pub interval_time: u32,
  #[serde(default)]
  pub next_interval_time: Option<f64>,
  #[serde(default)]
  pub last_detection_time: Option<f64>,
  #[serde(default)]
  pub model_loaded: bool,
  /// 状态接口不返回该字段，由控制指令在本地维护
  #[serde(default)]
  pub test_mode_active: bool,
  #[serde(default)]
  pub weather_data: Option<WeatherSnapshot>,
  #[serde(default)]
  pub timestamp: Option<String>,
}

impl Default for SystemStatus {
  fn default() -> Self {
    Self {
      camera_active: false,
      interval_time: DEFAULT_INTERVAL_SECONDS,
      next_interval_time: None,
      last_detection_time: None,
      model_loaded: false,
      test_mode_active: false,
      weather_data: None,
      timestamp: None,
    }
  }
}

impl SystemStatus {
  pub fn camera_label(&self) -> &'static str {
    if self.camera_active { "Active" } else { "Inactive" }
  }

  pub fn model_label(&self) -> &'static str {
    if self.model_loaded { "Loaded" } else { "Not Loaded" }
  }
}
