// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/weather.rs - 天气快照
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

const KELVIN_OFFSET: f64 = 273.15;

/// 一个太阳日的天气快照，每次拉取整体替换
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WeatherSnapshot {
  /// 日出时间（Unix 秒）
  #[serde(default)]
  pub sunrise: Option<i64>,
  /// 日落时间（Unix 秒）
  #[serde(default)]
  pub sunset: Option<i64>,
  #[serde(default)]
  pub weather_condition: Option<String>,
  #[serde(default)]
  pub weather_description: Option<String>,
  /// 开尔文温度
  #[serde(default)]
  pub temperature: Option<f64>,
  /// 云量百分比
  #[serde(default)]
  pub clouds: Option<f64>,
  #[serde(default)]
  pub wind_speed: Option<f64>,
  #[serde(default)]
  pub timestamp: Option<String>,
}

impl WeatherSnapshot {
  pub fn with_solar_bounds(sunrise: i64, sunset: i64) -> Self {
    Self {
      sunrise: Some(sunrise),
      sunset: Some(sunset),
      ..Default::default()
    }
  }

  /// 日出日落均存在且非零时返回 `(sunrise, sunset)`
  pub fn solar_bounds(&self) -> Option<(i64, i64)> {
    match (self.sunrise, self.sunset) {
      (Some(sunrise), Some(sunset)) if sunrise != 0 && sunset != 0 => Some((sunrise, sunset)),
      _ => None,
    }
  }

  pub fn temperature_celsius(&self) -> Option<f64> {
    self.temperature.map(|kelvin| kelvin - KELVIN_OFFSET)
  }

  pub fn condition(&self) -> &str {
    self.weather_condition.as_deref().unwrap_or("Unknown")
  }
}
