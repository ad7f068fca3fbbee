// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/day_progress.rs - 昼夜进度指示
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

use chrono::{DateTime, Local, TimeZone, Utc};
use image::Rgb;

use crate::canvas::{Canvas, Point};
use crate::weather::WeatherSnapshot;

/// 夜间倒计时用今天的日出加上固定 24 小时近似明天的日出
pub const SECONDS_PER_DAY: i64 = 86_400;

const TRACK_COLOR: Rgb<u8> = Rgb([0x37, 0x41, 0x51]);
const DAY_GRADIENT: (Rgb<u8>, Rgb<u8>) = (Rgb([0xFA, 0xCC, 0x15]), Rgb([0xF9, 0x73, 0x16]));
const NIGHT_GRADIENT: (Rgb<u8>, Rgb<u8>) = (Rgb([0x31, 0x2E, 0x81]), Rgb([0x58, 0x1C, 0x87]));

/// 带毫秒精度的 Unix 秒
pub fn unix_seconds(now: DateTime<Utc>) -> f64 {
  now.timestamp_millis() as f64 / 1000.0
}

// 与显示端一致的四舍五入：.5 总是向正无穷进位
fn round_half_up(value: f64) -> i64 {
  (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
  Daytime,
  Nighttime,
}

impl DayPhase {
  pub fn label(&self) -> &'static str {
    match self {
      DayPhase::Daytime => "Daytime",
      DayPhase::Nighttime => "Nighttime",
    }
  }

  fn countdown_target(&self) -> &'static str {
    match self {
      DayPhase::Daytime => "sunset",
      DayPhase::Nighttime => "sunrise",
    }
  }

  fn gradient(&self) -> (Rgb<u8>, Rgb<u8>) {
    match self {
      DayPhase::Daytime => DAY_GRADIENT,
      DayPhase::Nighttime => NIGHT_GRADIENT,
    }
  }
}

impl fmt::Display for DayPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// 日出到日落之间的进度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayProgress {
  pub sunrise: i64,
  pub sunset: i64,
  /// 0.0 - 1.0
  pub fraction: f64,
  pub phase: DayPhase,
  pub minutes_remaining: i64,
}

impl DayProgress {
  /// 日出或日落缺失、为零，或日长不为正时返回 `None`
  ///
  /// 参考看板在 `sunset <= sunrise` 时仍会显示（夜间，进度钳到 0 或 100），
  /// 这里有意不输出；其中只有 `sunset == sunrise` 会得到 NaN 进度。
  /// 时间全部按 `f64` 计算，极大的时间戳不会溢出。
  pub fn compute(sunrise: i64, sunset: i64, now: f64) -> Option<Self> {
    if sunrise == 0 || sunset == 0 || sunset <= sunrise {
      return None;
    }

    let (sunrise_s, sunset_s) = (sunrise as f64, sunset as f64);
    let day_length = sunset_s - sunrise_s;
    // 相差很小的极大时间戳转为 f64 后可能相等
    if day_length <= 0.0 {
      return None;
    }
    let fraction = ((now - sunrise_s) / day_length).clamp(0.0, 1.0);

    let phase = if now > sunrise_s && now < sunset_s {
      DayPhase::Daytime
    } else {
      DayPhase::Nighttime
    };

    let seconds_remaining = match phase {
      DayPhase::Daytime => sunset_s - now,
      DayPhase::Nighttime => sunrise_s + SECONDS_PER_DAY as f64 - now,
    };

    Some(Self {
      sunrise,
      sunset,
      fraction,
      phase,
      minutes_remaining: round_half_up(seconds_remaining / 60.0),
    })
  }

  pub fn from_weather(weather: Option<&WeatherSnapshot>, now: f64) -> Option<Self> {
    let (sunrise, sunset) = weather?.solar_bounds()?;
    Self::compute(sunrise, sunset, now)
  }

  pub fn percent(&self) -> f64 {
    self.fraction * 100.0
  }

  pub fn is_daytime(&self) -> bool {
    self.phase == DayPhase::Daytime
  }

  pub fn countdown(&self) -> String {
    format!(
      "{} minutes until {}",
      self.minutes_remaining,
      self.phase.countdown_target()
    )
  }

  pub fn sunrise_label(&self) -> String {
    local_time_label(self.sunrise)
  }

  pub fn sunset_label(&self) -> String {
    local_time_label(self.sunset)
  }
}

impl fmt::Display for DayProgress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.phase, self.countdown())
  }
}

fn local_time_label(timestamp: i64) -> String {
  Local
    .timestamp_opt(timestamp, 0)
    .single()
    .map(|time| time.format("%H:%M:%S").to_string())
    .unwrap_or_else(|| "N/A".to_string())
}

/// 进度条：深色底槽，按进度填充渐变色
#[derive(Debug, Clone)]
pub struct DayProgressBar {
  pub origin: Point,
  pub width: f32,
  pub height: f32,
  pub track_color: Rgb<u8>,
}

impl DayProgressBar {
  pub fn new(origin: Point, width: f32, height: f32) -> Self {
    Self {
      origin,
      width,
      height,
      track_color: TRACK_COLOR,
    }
  }

  pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, progress: &DayProgress) {
    canvas.fill_rect(self.origin, self.width, self.height, self.track_color);

    let filled = (self.width as f64 * progress.fraction).round() as u32;
    let (start, end) = progress.phase.gradient();
    let last = filled.saturating_sub(1).max(1) as f32;
    for column in 0..filled {
      let color = lerp(start, end, column as f32 / last);
      canvas.fill_rect(self.origin.offset(column as f32, 0.0), 1.0, self.height, color);
    }
  }
}

fn lerp(start: Rgb<u8>, end: Rgb<u8>, t: f32) -> Rgb<u8> {
  let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
  Rgb([
    channel(start[0], end[0]),
    channel(start[1], end[1]),
    channel(start[2], end[2]),
  ])
}
