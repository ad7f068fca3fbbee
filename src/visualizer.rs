// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/visualizer.rs - 目标偏移可视化
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

use image::Rgb;

use crate::canvas::{Canvas, Point, Stroke};
use crate::detection::Detection;

pub const DEFAULT_SURFACE_SIZE: u32 = 300;

// 绘制常量
const OFFSET_SCALE: f64 = 0.5; // 显示位移为原始偏移的一半
const RETICLE_SIZE: f32 = 50.0;
const MARKER_RADIUS: f32 = 20.0;
const LINE_WIDTH: u32 = 2;
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_ORIGIN: Point = Point::new(10.0, 20.0);

const RETICLE_COLOR: Rgb<u8> = Rgb([0x00, 0xFF, 0x00]); // 绿色
const CROSSHAIR_COLOR: Rgb<u8> = Rgb([0xAA, 0xAA, 0xAA]); // 灰色
const MARKER_COLOR: Rgb<u8> = Rgb([0xFF, 0xCC, 0x00]); // 太阳黄
const VECTOR_COLOR: Rgb<u8> = Rgb([0xFF, 0x00, 0x00]); // 红色
const LABEL_COLOR: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]); // 白色

/// 在画面中心绘制准星，并用标记和向量表示首个检测目标的偏移
///
/// 纯函数式绘制：每次 `render` 都先清空表面再完整重绘，不保留任何帧间状态。
#[derive(Debug, Clone)]
pub struct OffsetVisualizer {
  pub scale: f64,
  pub reticle_size: f32,
  pub marker_radius: f32,
  pub line_width: u32,
  pub label_size: f32,
  pub label_origin: Point,
  pub reticle_color: Rgb<u8>,
  pub crosshair_color: Rgb<u8>,
  pub marker_color: Rgb<u8>,
  pub vector_color: Rgb<u8>,
  pub label_color: Rgb<u8>,
}

impl Default for OffsetVisualizer {
  fn default() -> Self {
    Self {
      scale: OFFSET_SCALE,
      reticle_size: RETICLE_SIZE,
      marker_radius: MARKER_RADIUS,
      line_width: LINE_WIDTH,
      label_size: LABEL_FONT_SIZE,
      label_origin: LABEL_ORIGIN,
      reticle_color: RETICLE_COLOR,
      crosshair_color: CROSSHAIR_COLOR,
      marker_color: MARKER_COLOR,
      vector_color: VECTOR_COLOR,
      label_color: LABEL_COLOR,
    }
  }
}

impl OffsetVisualizer {
  pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, detections: &[Detection]) {
    canvas.clear();

    let center = canvas.center();
    self.draw_reticle(canvas, center);
    self.draw_crosshairs(canvas, center);

    // 只显示首个检测目标
    if let Some(primary) = detections.first() {
      self.draw_primary(canvas, center, primary);
    }
  }

  /// 标记位置 = 表面中心 + 偏移 × 缩放系数
  pub fn marker_position(&self, center: Point, detection: &Detection) -> Point {
    center.offset(
      (detection.distance_x * self.scale) as f32,
      (detection.distance_y * self.scale) as f32,
    )
  }

  fn stroke(&self, color: Rgb<u8>) -> Stroke {
    Stroke::new(color, self.line_width)
  }

  fn draw_reticle<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point) {
    let half = self.reticle_size / 2.0;
    canvas.stroke_rect(
      center.offset(-half, -half),
      self.reticle_size,
      self.reticle_size,
      self.stroke(self.reticle_color),
    );
  }

  fn draw_crosshairs<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point) {
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let stroke = self.stroke(self.crosshair_color);
    canvas.stroke_line(Point::new(0.0, center.y), Point::new(width, center.y), stroke);
    canvas.stroke_line(Point::new(center.x, 0.0), Point::new(center.x, height), stroke);
  }

  fn draw_primary<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Point, detection: &Detection) {
    let marker = self.marker_position(center, detection);
    canvas.fill_circle(marker, self.marker_radius, self.marker_color);
    canvas.stroke_line(center, marker, self.stroke(self.vector_color));
    canvas.fill_text(
      self.label_origin,
      self.label_size,
      self.label_color,
      &detection.offset_label(),
    );
  }
}
