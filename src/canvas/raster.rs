// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/canvas/raster.rs - RGB 图像绘图表面
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

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
  draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
  draw_text_mut,
};
use imageproc::rect::Rect;
use thiserror::Error;
use tracing::debug;

use super::{Canvas, Point, Stroke};

const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([0x11, 0x18, 0x27]);

#[derive(Error, Debug)]
pub enum FontError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("字体解析错误: {0}")]
  InvalidFont(#[from] ab_glyph::InvalidFont),
}

/// 从文件加载 TrueType/OpenType 字体
pub fn load_font(path: impl AsRef<Path>) -> Result<FontArc, FontError> {
  let data = std::fs::read(path)?;
  Ok(FontArc::try_from_vec(data)?)
}

/// 基于 `RgbImage` 的绘图表面
///
/// 没有设置字体时 `fill_text` 不绘制任何内容。
pub struct RasterCanvas {
  image: RgbImage,
  background: Rgb<u8>,
  font: Option<FontArc>,
}

impl RasterCanvas {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      image: RgbImage::from_pixel(width, height, DEFAULT_BACKGROUND),
      background: DEFAULT_BACKGROUND,
      font: None,
    }
  }

  /// 设置背景色并立即用它清空表面
  pub fn with_background(mut self, background: Rgb<u8>) -> Self {
    self.background = background;
    self.clear();
    self
  }

  pub fn with_font(mut self, font: Option<FontArc>) -> Self {
    self.font = font;
    self
  }

  pub fn image(&self) -> &RgbImage {
    &self.image
  }

  pub fn into_image(self) -> RgbImage {
    self.image
  }
}

impl Canvas for RasterCanvas {
  fn width(&self) -> u32 {
    self.image.width()
  }

  fn height(&self) -> u32 {
    self.image.height()
  }

  fn clear(&mut self) {
    let background = self.background;
    self
      .image
      .pixels_mut()
      .for_each(|pixel| *pixel = background);
  }

  fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, stroke: Stroke) {
    let (x, y) = (origin.x.round() as i32, origin.y.round() as i32);
    let (w, h) = (width.round() as i32, height.round() as i32);

    // 逐像素向内收缩以得到线宽
    for inset in 0..stroke.width as i32 {
      let (inner_w, inner_h) = (w - 2 * inset, h - 2 * inset);
      if inner_w <= 0 || inner_h <= 0 {
        break;
      }
      let rect = Rect::at(x + inset, y + inset).of_size(inner_w as u32, inner_h as u32);
      draw_hollow_rect_mut(&mut self.image, rect, stroke.color);
    }
  }

  fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgb<u8>) {
    let (w, h) = (width.round() as i32, height.round() as i32);
    if w <= 0 || h <= 0 {
      return;
    }
    let rect = Rect::at(origin.x.round() as i32, origin.y.round() as i32).of_size(w as u32, h as u32);
    draw_filled_rect_mut(&mut self.image, rect, color);
  }

  fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 || !length.is_finite() {
      return;
    }

    // 先裁剪到表面（留出线宽余量），表面外的部分不逐点遍历
    let margin = stroke.width as f32 + 1.0;
    let Some((from, to)) = clip_segment(
      from,
      to,
      Point::new(-margin, -margin),
      Point::new(self.width() as f32 + margin, self.height() as f32 + margin),
    ) else {
      return;
    };

    // 沿法线方向平移若干条单像素线段
    let (nx, ny) = (-dy / length, dx / length);
    let half = (stroke.width / 2) as f32;
    for step in 0..stroke.width {
      let shift = step as f32 - half;
      draw_line_segment_mut(
        &mut self.image,
        (from.x + nx * shift, from.y + ny * shift),
        (to.x + nx * shift, to.y + ny * shift),
        stroke.color,
      );
    }
  }

  fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb<u8>) {
    if !center.x.is_finite() || !center.y.is_finite() {
      return;
    }
    // 完全在表面外的圆心收拢到边界外一格，避免坐标换算溢出
    let reach = radius + 1.0;
    let x = center.x.clamp(-reach, self.width() as f32 + reach);
    let y = center.y.clamp(-reach, self.height() as f32 + reach);
    draw_filled_circle_mut(
      &mut self.image,
      (x.round() as i32, y.round() as i32),
      radius.round() as i32,
      color,
    );
  }

  fn fill_text(&mut self, baseline: Point, size: f32, color: Rgb<u8>, text: &str) {
    let Some(font) = self.font.as_ref() else {
      debug!("未设置字体，跳过文本: {}", text);
      return;
    };

    let top = (baseline.y - size).max(0.0);
    draw_text_mut(
      &mut self.image,
      color,
      baseline.x.round() as i32,
      top.round() as i32,
      PxScale::from(size),
      font,
      text,
    );
  }
}

/// Liang-Barsky 线段裁剪，线段与矩形不相交时返回 `None`
fn clip_segment(from: Point, to: Point, min: Point, max: Point) -> Option<(Point, Point)> {
  let (dx, dy) = (to.x - from.x, to.y - from.y);
  if !dx.is_finite() || !dy.is_finite() {
    return None;
  }

  let (mut enter, mut exit) = (0.0_f32, 1.0_f32);
  for (p, q) in [
    (-dx, from.x - min.x),
    (dx, max.x - from.x),
    (-dy, from.y - min.y),
    (dy, max.y - from.y),
  ] {
    if p == 0.0 {
      if q < 0.0 {
        return None;
      }
    } else {
      let t = q / p;
      if p < 0.0 {
        enter = enter.max(t);
      } else {
        exit = exit.min(t);
      }
    }
  }

  if enter > exit {
    return None;
  }
  Some((
    Point::new(from.x + enter * dx, from.y + enter * dy),
    Point::new(from.x + exit * dx, from.y + exit * dy),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  const RED: Rgb<u8> = Rgb([255, 0, 0]);

  #[test]
  fn clear_restores_background() {
    let mut canvas = RasterCanvas::new(8, 8).with_background(Rgb([1, 2, 3]));
    canvas.fill_rect(Point::new(0.0, 0.0), 8.0, 8.0, RED);
    canvas.clear();

    assert!(canvas.image().pixels().all(|p| *p == Rgb([1, 2, 3])));
  }

  #[test]
  fn shapes_outside_the_surface_are_clipped() {
    let mut canvas = RasterCanvas::new(20, 20);
    canvas.fill_circle(Point::new(-50.0, 400.0), 20.0, RED);
    canvas.stroke_line(
      Point::new(-100.0, 10.0),
      Point::new(200.0, 10.0),
      Stroke::new(RED, 2),
    );

    assert_eq!(*canvas.image().get_pixel(5, 10), RED);
    assert_eq!(*canvas.image().get_pixel(5, 5), DEFAULT_BACKGROUND);
  }

  #[test]
  fn far_away_segments_are_clipped_before_drawing() {
    let mut canvas = RasterCanvas::new(300, 300);
    let started = std::time::Instant::now();
    canvas.stroke_line(
      Point::new(150.0, 150.0),
      Point::new(2.0e9, 2.0e9),
      Stroke::new(RED, 2),
    );
    canvas.fill_circle(Point::new(2.0e9, 2.0e9), 20.0, RED);
    assert!(started.elapsed() < std::time::Duration::from_secs(1));

    assert_eq!(*canvas.image().get_pixel(200, 200), RED);
    assert_eq!(*canvas.image().get_pixel(299, 299), RED);
    assert_eq!(*canvas.image().get_pixel(200, 100), DEFAULT_BACKGROUND);
  }

  #[test]
  fn clip_segment_keeps_inner_part() {
    let min = Point::new(0.0, 0.0);
    let max = Point::new(10.0, 10.0);
    assert_eq!(
      clip_segment(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), min, max),
      Some((Point::new(0.0, 5.0), Point::new(10.0, 5.0)))
    );
    assert_eq!(
      clip_segment(Point::new(-5.0, -5.0), Point::new(-1.0, 20.0), min, max),
      None
    );
  }

  #[test]
  fn text_without_font_is_skipped() {
    let mut canvas = RasterCanvas::new(40, 40);
    canvas.fill_text(Point::new(2.0, 20.0), 12.0, RED, "X: 1.0");

    assert!(canvas.image().pixels().all(|p| *p == DEFAULT_BACKGROUND));
  }

  #[test]
  fn missing_font_file_is_reported() {
    let path = std::env::temp_dir().join("xiyang-no-such-font.ttf");
    assert!(matches!(load_font(&path), Err(FontError::IoError(_))));
  }
}
