// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/canvas/recording.rs - 绘图指令记录表面
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

use super::{Canvas, Point, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
  Clear,
  StrokeRect {
    origin: Point,
    width: f32,
    height: f32,
    stroke: Stroke,
  },
  FillRect {
    origin: Point,
    width: f32,
    height: f32,
    color: Rgb<u8>,
  },
  StrokeLine {
    from: Point,
    to: Point,
    stroke: Stroke,
  },
  FillCircle {
    center: Point,
    radius: f32,
    color: Rgb<u8>,
  },
  FillText {
    baseline: Point,
    size: f32,
    color: Rgb<u8>,
    text: String,
  },
}

/// 把绘图调用记录成显示列表的表面
///
/// `clear` 会丢弃之前的全部指令，所以列表总是只反映最近一次完整重绘。
#[derive(Debug, Clone)]
pub struct CommandCanvas {
  width: u32,
  height: u32,
  commands: Vec<DrawCommand>,
}

impl CommandCanvas {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      width,
      height,
      commands: Vec::new(),
    }
  }

  pub fn commands(&self) -> &[DrawCommand] {
    &self.commands
  }

  pub fn into_commands(self) -> Vec<DrawCommand> {
    self.commands
  }
}

impl Canvas for CommandCanvas {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn clear(&mut self) {
    self.commands.clear();
    self.commands.push(DrawCommand::Clear);
  }

  fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, stroke: Stroke) {
    self.commands.push(DrawCommand::StrokeRect {
      origin,
      width,
      height,
      stroke,
    });
  }

  fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgb<u8>) {
    self.commands.push(DrawCommand::FillRect {
      origin,
      width,
      height,
      color,
    });
  }

  fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
    self
      .commands
      .push(DrawCommand::StrokeLine { from, to, stroke });
  }

  fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb<u8>) {
    self.commands.push(DrawCommand::FillCircle {
      center,
      radius,
      color,
    });
  }

  fn fill_text(&mut self, baseline: Point, size: f32, color: Rgb<u8>, text: &str) {
    self.commands.push(DrawCommand::FillText {
      baseline,
      size,
      color,
      text: text.to_string(),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clear_discards_previous_frame() {
    let mut canvas = CommandCanvas::new(10, 10);
    canvas.fill_circle(Point::new(1.0, 1.0), 2.0, Rgb([1, 2, 3]));
    canvas.clear();
    canvas.fill_rect(Point::new(0.0, 0.0), 1.0, 1.0, Rgb([0, 0, 0]));

    assert_eq!(canvas.commands().len(), 2);
    assert_eq!(canvas.commands()[0], DrawCommand::Clear);
  }

  #[test]
  fn center_is_half_of_the_surface() {
    let canvas = CommandCanvas::new(300, 200);
    assert_eq!(canvas.center(), Point::new(150.0, 100.0));
  }
}
