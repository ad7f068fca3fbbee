// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/detection.rs - 检测结果
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

/// 单个检测目标相对画面光学中心的偏移
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Detection {
  pub distance_x: f64,
  pub distance_y: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bbox: Option<[f64; 4]>, // [x_min, y_min, x_max, y_max]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub confidence: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class_id: Option<u32>,
}

impl Detection {
  pub fn at_offset(distance_x: f64, distance_y: f64) -> Self {
    Self {
      distance_x,
      distance_y,
      ..Default::default()
    }
  }

  /// 叠加显示的偏移文本，保留一位小数
  pub fn offset_label(&self) -> String {
    format!("X: {:.1}, Y: {:.1}", self.distance_x, self.distance_y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn label_uses_raw_values() {
    let detection = Detection::at_offset(10.0, -20.0);
    assert_eq!(detection.offset_label(), "X: 10.0, Y: -20.0");
  }

  #[test]
  fn backend_extras_are_optional() {
    let bare: Detection = serde_json::from_value(json!({
      "distance_x": 3.25,
      "distance_y": 4
    }))
    .unwrap();
    assert_eq!(bare, Detection::at_offset(3.25, 4.0));

    let full: Detection = serde_json::from_value(json!({
      "bbox": [1.0, 2.0, 3.0, 4.0],
      "confidence": 0.91,
      "class_id": 0,
      "distance_x": -1.5,
      "distance_y": 0.0
    }))
    .unwrap();
    assert_eq!(full.bbox, Some([1.0, 2.0, 3.0, 4.0]));
    assert_eq!(full.class_id, Some(0));
  }
}
