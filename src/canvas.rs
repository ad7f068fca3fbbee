// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/canvas.rs - 即时模式绘图表面
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

mod raster;
mod recording;

pub use self::raster::{FontError, RasterCanvas, load_font};
pub use self::recording::{CommandCanvas, DrawCommand};

/// 表面坐标，原点在左上角
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  pub fn offset(self, dx: f32, dy: f32) -> Self {
    Self::new(self.x + dx, self.y + dy)
  }
}

/// 描边样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
  pub color: Rgb<u8>,
  pub width: u32,
}

impl Stroke {
  pub const fn new(color: Rgb<u8>, width: u32) -> Self {
    Self { color, width }
  }
}

/// 即时模式绘图表面
///
/// 每次重绘都由调用方先 `clear` 再整体绘制，表面不保留任何图元状态。
pub trait Canvas {
  fn width(&self) -> u32;
  fn height(&self) -> u32;

  fn center(&self) -> Point {
    Point::new(self.width() as f32 / 2.0, self.height() as f32 / 2.0)
  }

  /// 清空整个表面
  fn clear(&mut self);
  fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, stroke: Stroke);
  fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgb<u8>);
  fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
  fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb<u8>);
  /// `baseline` 为文本基线左端点
  fn fill_text(&mut self, baseline: Point, size: f32, color: Rgb<u8>, text: &str);
}
