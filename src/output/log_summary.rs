// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/output/log_summary.rs - 日志摘要输出
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

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  day_progress::{DayProgress, unix_seconds},
  logs::{format_percent, format_timestamp, format_unix_time},
  output::Render,
  snapshot::{DashboardSnapshot, DashboardState},
};

#[derive(Error, Debug)]
pub enum LogSummaryOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

/// 把仪表盘内容输出为结构化日志，`log://?logs` 额外列出最近的日志条目
#[derive(Debug, Default)]
pub struct LogSummaryOutput {
  with_logs: bool,
}

impl FromUrlWithScheme for LogSummaryOutput {
  const SCHEME: &'static str = "log";
}

impl FromUrl for LogSummaryOutput {
  type Error = LogSummaryOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(LogSummaryOutputError::SchemeMismatch);
    }

    Ok(LogSummaryOutput {
      with_logs: uri.query_pairs().any(|(k, _)| k == "logs"),
    })
  }
}

/// 摘要文本，每个元素对应一行
pub fn summary_lines(snapshot: &DashboardSnapshot, now: f64) -> Vec<String> {
  let mut lines = Vec::new();

  if let Some(status) = &snapshot.status {
    lines.push(format!(
      "Camera: {}, Interval: {}s, Next: {}, Model: {}, Last detection: {}",
      status.camera_label(),
      status.interval_time,
      format_unix_time(status.next_interval_time),
      status.model_label(),
      format_unix_time(status.last_detection_time)
    ));
  }

  if let Some(weather) = snapshot.weather() {
    let temperature = weather
      .temperature_celsius()
      .map(|c| format!("{:.1}°C", c))
      .unwrap_or_else(|| "N/A".to_string());
    let clouds = weather.clouds.unwrap_or(0.0);
    lines.push(format!(
      "Weather: {}, {}, {}% cloud cover",
      weather.condition(),
      temperature,
      clouds
    ));
  }

  if let Some(progress) = DayProgress::from_weather(snapshot.weather(), now) {
    lines.push(format!(
      "Sunrise: {}, Sunset: {}, {:.0}% - {}",
      progress.sunrise_label(),
      progress.sunset_label(),
      progress.percent(),
      progress
    ));
  }

  if let Some(primary) = snapshot.primary_detections().first() {
    lines.push(format!("Sun offset: {}", primary.offset_label()));
  }

  if let Some(metrics) = snapshot.latest_metrics() {
    for gauge in metrics.gauges() {
      lines.push(gauge.to_string());
    }
  }

  lines
}

/// 最近的模型日志与程序日志，每条一行
pub fn log_entries(snapshot: &DashboardSnapshot) -> Vec<String> {
  let model = snapshot.recent_model_logs().into_iter().map(|log| {
    let metrics = log.raspberry_details.as_ref();
    format!(
      "[模型日志] {} 检测数: {} CPU: {} 内存: {} 图像: {}",
      format_timestamp(log.timestamp.as_deref()),
      log.detections().len(),
      format_percent(metrics.and_then(|m| m.cpu_percent)),
      format_percent(metrics.and_then(|m| m.memory_percent)),
      log.image_url.as_deref().unwrap_or("N/A")
    )
  });
  let program = snapshot.recent_program_logs().into_iter().map(|log| {
    format!(
      "[程序日志] {} {} 天气: {} 下次拍摄: {}",
      format_timestamp(log.timestamp.as_deref()),
      log.interval_formula.as_deref().unwrap_or("N/A"),
      log
        .weather_response
        .as_ref()
        .map(|w| w.condition())
        .unwrap_or("N/A"),
      format_unix_time(log.next_interval_time)
    )
  });
  model.chain(program).collect()
}

impl Render for LogSummaryOutput {
  type Error = LogSummaryOutputError;

  fn render_result(&self, state: &DashboardState, now: DateTime<Utc>) -> Result<(), Self::Error> {
    if let Some(warning) = state.warning() {
      warn!("{}", warning);
    }
    if !state.is_loaded() {
      warn!("尚未读取到任何数据");
      return Ok(());
    }
    for line in summary_lines(state.snapshot(), unix_seconds(now)) {
      info!("{}", line);
    }
    if self.with_logs {
      for entry in log_entries(state.snapshot()) {
        info!("{}", entry);
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn summary_covers_status_progress_and_metrics() {
    let snapshot: DashboardSnapshot = serde_json::from_value(json!({
      "status": {
        "camera_active": true,
        "interval_time": 180,
        "next_interval_time": 1_760_600_000.0,
        "model_loaded": true,
        "weather_data": {
          "weather_condition": "Clear",
          "temperature": 300.15,
          "clouds": 5,
          "sunrise": 1000,
          "sunset": 2000
        }
      },
      "model_logs": [{
        "timestamp": "2026-10-16T10:00:00",
        "model_details": { "detections": [{ "distance_x": 10.0, "distance_y": -20.0 }] },
        "raspberry_details": { "cpu_percent": 90.0, "memory_percent": 40.0 }
      }],
      "program_logs": [{
        "timestamp": "2026-10-16T10:00:00",
        "interval_formula": "Daytime",
        "next_interval_time": 1_760_600_000.0
      }]
    }))
    .unwrap();

    let lines = summary_lines(&snapshot, 1500.0);
    assert_eq!(
      lines[0],
      "Camera: Active, Interval: 180s, Next: 2025-10-16 07:33:20, Model: Loaded, Last detection: N/A"
    );
    assert_eq!(lines[1], "Weather: Clear, 27.0°C, 5% cloud cover");
    assert!(lines[2].ends_with("50% - Daytime - 8 minutes until sunset"));
    assert_eq!(lines[3], "Sun offset: X: 10.0, Y: -20.0");
    assert_eq!(lines[4], "CPU Usage: 90% (!)");
    assert_eq!(lines[5], "Memory Usage: 40%");
    assert_eq!(lines[6], "Disk Usage: N/A");

    let entries = log_entries(&snapshot);
    assert_eq!(
      entries[0],
      "[模型日志] 2026-10-16 10:00:00 检测数: 1 CPU: 90% 内存: 40% 图像: N/A"
    );
    assert_eq!(
      entries[1],
      "[程序日志] 2026-10-16 10:00:00 Daytime 天气: N/A 下次拍摄: 2025-10-16 07:33:20"
    );
  }

  #[test]
  fn empty_snapshot_has_empty_summary() {
    assert!(summary_lines(&DashboardSnapshot::default(), 1500.0).is_empty());
  }

  #[test]
  fn logs_flag_from_query() {
    let url = Url::parse("log://?logs").unwrap();
    assert!(LogSummaryOutput::from_url(&url).unwrap().with_logs);
    let url = Url::parse("log://").unwrap();
    assert!(!LogSummaryOutput::from_url(&url).unwrap().with_logs);
  }
}
