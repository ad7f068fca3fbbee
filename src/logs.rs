// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/logs.rs - 模型日志与程序日志
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

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::weather::WeatherSnapshot;

/// 每类日志只展示最近的条数
pub const RECENT_LOG_LIMIT: usize = 5;

/// 高于该百分比的指标视为告警
pub const METRIC_DANGER_THRESHOLD: f64 = 80.0;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Timestamped {
  fn timestamp(&self) -> Option<&str>;
}

/// 解析 ISO 8601 时间戳，带时区的统一转换为 UTC
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
  DateTime::parse_from_rfc3339(raw)
    .map(|time| time.naive_utc())
    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
    .ok()
}

/// 缺失时为 "N/A"，无法解析时原样返回
pub fn format_timestamp(raw: Option<&str>) -> String {
  match raw {
    None | Some("") => "N/A".to_string(),
    Some(raw) => parse_timestamp(raw)
      .map(|time| time.format(DISPLAY_FORMAT).to_string())
      .unwrap_or_else(|| raw.to_string()),
  }
}

/// Unix 秒格式化为 UTC 时间，缺失、为零或超出范围时为 "N/A"
pub fn format_unix_time(seconds: Option<f64>) -> String {
  seconds
    .filter(|s| s.is_finite() && *s != 0.0)
    .and_then(|s| DateTime::<Utc>::from_timestamp_millis((s * 1000.0).round() as i64))
    .map(|time| time.format(DISPLAY_FORMAT).to_string())
    .unwrap_or_else(|| "N/A".to_string())
}

/// 百分比指标，缺失时为 "N/A"
pub fn format_percent(percent: Option<f64>) -> String {
  percent
    .map(|p| format!("{}%", p))
    .unwrap_or_else(|| "N/A".to_string())
}

/// 按时间倒序取最近 `limit` 条，无法解析时间的条目排在最后
pub fn recent_first<T: Timestamped>(logs: &[T], limit: usize) -> Vec<&T> {
  let mut sorted: Vec<(Option<NaiveDateTime>, &T)> = logs
    .iter()
    .map(|log| (log.timestamp().and_then(parse_timestamp), log))
    .collect();
  sorted.sort_by(|a, b| b.0.cmp(&a.0));
  sorted.into_iter().take(limit).map(|(_, log)| log).collect()
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ModelDetails {
  #[serde(default)]
  pub detections: Option<Vec<Detection>>,
}

/// 树莓派主机指标（百分比）
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HostMetrics {
  #[serde(default)]
  pub cpu_percent: Option<f64>,
  #[serde(default)]
  pub memory_percent: Option<f64>,
  #[serde(default)]
  pub disk_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeLevel {
  Normal,
  Danger,
}

impl GaugeLevel {
  pub fn of(percent: f64) -> Self {
    if percent > METRIC_DANGER_THRESHOLD {
      GaugeLevel::Danger
    } else {
      GaugeLevel::Normal
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
  pub name: &'static str,
  pub percent: Option<f64>,
}

impl Gauge {
  pub fn level(&self) -> Option<GaugeLevel> {
    self.percent.map(GaugeLevel::of)
  }
}

impl fmt::Display for Gauge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.percent, self.level()) {
      (Some(percent), Some(GaugeLevel::Danger)) => write!(f, "{}: {}% (!)", self.name, percent),
      (Some(percent), _) => write!(f, "{}: {}%", self.name, percent),
      (None, _) => write!(f, "{}: N/A", self.name),
    }
  }
}

impl HostMetrics {
  pub fn gauges(&self) -> [Gauge; 3] {
    [
      Gauge {
        name: "CPU Usage",
        percent: self.cpu_percent,
      },
      Gauge {
        name: "Memory Usage",
        percent: self.memory_percent,
      },
      Gauge {
        name: "Disk Usage",
        percent: self.disk_percent,
      },
    ]
  }
}

/// 一次拍摄推理的记录
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ModelLog {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub timestamp: Option<String>,
  #[serde(default)]
  pub model_details: Option<ModelDetails>,
  #[serde(default)]
  pub raspberry_details: Option<HostMetrics>,
  #[serde(default)]
  pub image_url: Option<String>,
}

impl ModelLog {
  pub fn detections(&self) -> &[Detection] {
    self
      .model_details
      .as_ref()
      .and_then(|details| details.detections.as_deref())
      .unwrap_or(&[])
  }
}

impl Timestamped for ModelLog {
  fn timestamp(&self) -> Option<&str> {
    self.timestamp.as_deref()
  }
}

/// 一次间隔调度的记录
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ProgramLog {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub timestamp: Option<String>,
  #[serde(default)]
  pub weather_response: Option<WeatherSnapshot>,
  #[serde(default)]
  pub interval_formula: Option<String>,
  #[serde(default)]
  pub next_interval_time: Option<f64>,
}

impl Timestamped for ProgramLog {
  fn timestamp(&self) -> Option<&str> {
    self.timestamp.as_deref()
  }
}
