// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/output/draw.rs - 偏移可视化图像与检测记录
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

use ab_glyph::FontArc;
use image::{Rgb, RgbImage, imageops};
use thiserror::Error;
use url::Url;

use crate::{
  canvas::{FontError, Point, RasterCanvas, load_font},
  day_progress::{DayProgress, DayProgressBar},
  detection::Detection,
  snapshot::DashboardSnapshot,
  visualizer::{DEFAULT_SURFACE_SIZE, OffsetVisualizer},
};

// 图像下方进度条区域
const DAY_BAR_STRIP_HEIGHT: u32 = 24;
const DAY_BAR_MARGIN: f32 = 8.0;
const DAY_BAR_HEIGHT: f32 = 12.0;
const DAY_BAR_BACKGROUND: Rgb<u8> = Rgb([0x1F, 0x29, 0x37]);

#[derive(Error, Debug)]
pub enum DrawError {
  #[error("无效的图像尺寸: {0}")]
  InvalidSize(String),
  #[error("字体错误: {0}")]
  FontError(#[from] FontError),
}

/// 把首个检测目标绘制成正方形图像
///
/// URL 参数：`size`（边长，默认 300），`font`（字体文件路径，缺省时不绘制偏移文本），
/// `day_bar`（在图像下方追加一条昼夜进度条）。
pub struct Draw {
  visualizer: OffsetVisualizer,
  size: u32,
  font: Option<FontArc>,
  day_bar: bool,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      visualizer: OffsetVisualizer::default(),
      size: DEFAULT_SURFACE_SIZE,
      font: None,
      day_bar: false,
    }
  }
}

impl Draw {
  pub fn from_query(url: &Url) -> Result<Self, DrawError> {
    let mut draw = Draw::default();
    for (k, v) in url.query_pairs() {
      match &*k {
        "size" => {
          draw.size = v
            .parse::<u32>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| DrawError::InvalidSize(v.to_string()))?;
        }
        "font" => draw.font = Some(load_font(&*v)?),
        "day_bar" => draw.day_bar = true,
        _ => {}
      }
    }
    Ok(draw)
  }

  pub fn draw_detections(&self, detections: &[Detection]) -> RgbImage {
    let mut canvas = RasterCanvas::new(self.size, self.size).with_font(self.font.clone());
    self.visualizer.render(&mut canvas, detections);
    canvas.into_image()
  }

  /// 绘制整份快照；开启 `day_bar` 时图像高度增加一条进度条区域，
  /// 没有日出日落数据时该区域留空
  pub fn draw_snapshot(&self, snapshot: &DashboardSnapshot, now: f64) -> RgbImage {
    let visual = self.draw_detections(snapshot.primary_detections());
    if !self.day_bar {
      return visual;
    }

    let mut strip =
      RasterCanvas::new(self.size, DAY_BAR_STRIP_HEIGHT).with_background(DAY_BAR_BACKGROUND);
    if let Some(progress) = DayProgress::from_weather(snapshot.weather(), now) {
      let width = (self.size as f32 - 2.0 * DAY_BAR_MARGIN).max(0.0);
      let top = (DAY_BAR_STRIP_HEIGHT as f32 - DAY_BAR_HEIGHT) / 2.0;
      DayProgressBar::new(Point::new(DAY_BAR_MARGIN, top), width, DAY_BAR_HEIGHT)
        .draw(&mut strip, &progress);
    }

    let mut image = RgbImage::new(self.size, self.size + DAY_BAR_STRIP_HEIGHT);
    imageops::replace(&mut image, &visual, 0, 0);
    imageops::replace(&mut image, strip.image(), 0, self.size as i64);
    image
  }
}

/// 把检测结果写成文本，每行一个目标
pub struct Record {
  pub with_bbox: bool,
}

impl Record {
  pub fn lines(&self, detections: &[Detection]) -> Vec<String> {
    detections
      .iter()
      .map(|d| {
        let mut line = format!("{:.4}, {:.4}", d.distance_x, d.distance_y);
        if self.with_bbox {
          let confidence = d.confidence.unwrap_or(0.0);
          let [x_min, y_min, x_max, y_max] = d.bbox.unwrap_or_default();
          line.push_str(&format!(
            ", {:.4}, {:.1}, {:.1}, {:.1}, {:.1}",
            confidence, x_min, y_min, x_max, y_max
          ));
        }
        line
      })
      .collect()
  }

  pub fn record(
    &self,
    detections: &[Detection],
    path: &std::path::Path,
  ) -> Result<(), std::io::Error> {
    std::fs::write(path.with_extension("txt"), self.lines(detections).join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_sets_size() {
    let url = Url::parse("image:///tmp/out.png?size=120").unwrap();
    let draw = Draw::from_query(&url).unwrap();
    let image = draw.draw_detections(&[]);
    assert_eq!(image.dimensions(), (120, 120));
  }

  #[test]
  fn bad_size_is_rejected() {
    for query in ["size=0", "size=big"] {
      let url = Url::parse(&format!("image:///tmp/out.png?{}", query)).unwrap();
      assert!(matches!(Draw::from_query(&url), Err(DrawError::InvalidSize(_))));
    }
  }

  #[test]
  fn missing_font_is_reported() {
    let url = Url::parse("image:///tmp/out.png?font=/nonexistent/xiyang.ttf").unwrap();
    assert!(matches!(Draw::from_query(&url), Err(DrawError::FontError(_))));
  }

  #[test]
  fn day_bar_appends_progress_strip() {
    let url = Url::parse("image:///tmp/out.png?size=100&day_bar").unwrap();
    let draw = Draw::from_query(&url).unwrap();

    let snapshot: DashboardSnapshot = serde_json::from_value(serde_json::json!({
      "status": { "weather_data": { "sunrise": 1000, "sunset": 2000 } }
    }))
    .unwrap();
    let image = draw.draw_snapshot(&snapshot, 1500.0);
    assert_eq!(image.dimensions(), (100, 124));
    // 进度 50%：左侧为日间渐变起点，右侧为底槽
    assert_eq!(*image.get_pixel(8, 112), Rgb([0xFA, 0xCC, 0x15]));
    assert_eq!(*image.get_pixel(85, 112), Rgb([0x37, 0x41, 0x51]));
    assert_eq!(*image.get_pixel(50, 101), DAY_BAR_BACKGROUND);

    // 没有天气数据时只保留空白区域
    let empty = draw.draw_snapshot(&DashboardSnapshot::default(), 1500.0);
    assert_eq!(empty.dimensions(), (100, 124));
    assert_eq!(*empty.get_pixel(8, 112), DAY_BAR_BACKGROUND);
  }

  #[test]
  fn record_lines() {
    let mut detection = Detection::at_offset(10.0, -20.5);
    assert_eq!(
      Record { with_bbox: false }.lines(&[detection]),
      ["10.0000, -20.5000"]
    );

    detection.confidence = Some(0.875);
    detection.bbox = Some([100.0, 50.0, 140.0, 90.0]);
    assert_eq!(
      Record { with_bbox: true }.lines(&[detection]),
      ["10.0000, -20.5000, 0.8750, 100.0, 50.0, 140.0, 90.0"]
    );
  }
}
