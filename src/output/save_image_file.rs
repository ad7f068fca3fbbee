// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/output/save_image_file.rs - 保存图像文件
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

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  day_progress::unix_seconds,
  output::{
    Render,
    draw::{Draw, DrawError},
  },
  snapshot::DashboardState,
};

/// 每次刷新覆盖写同一个图像文件
pub struct SaveImageFileOutput {
  path: String,
  draw: Draw,
}

#[derive(Error, Debug)]
pub enum SaveImageFileError {
  #[error("I/O 错误: {0}")]
  IoError(std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(image::ImageError),
  #[error("绘制参数错误: {0}")]
  DrawError(#[from] DrawError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for SaveImageFileOutput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(SaveImageFileError::SchemeMismatch(format!(
        "期望保存方式 '{}', 实际保存方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    Ok(SaveImageFileOutput {
      path: uri.path().to_string(),
      draw: Draw::from_query(uri)?,
    })
  }
}

impl SaveImageFileOutput {
  fn save_image(&self, image: image::RgbImage) -> Result<(), SaveImageFileError> {
    if let Some(parent) = Path::new(&self.path).parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(SaveImageFileError::IoError)?;
    }

    image
      .save(&self.path)
      .map_err(SaveImageFileError::ImageError)?;

    warn!("保存图像到文件: {}", self.path);

    Ok(())
  }
}

impl Render for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn render_result(&self, state: &DashboardState, now: DateTime<Utc>) -> Result<(), Self::Error> {
    let image = self.draw.draw_snapshot(state.snapshot(), unix_seconds(now));
    self.save_image(image)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    detection::Detection, logs::ModelDetails, logs::ModelLog, snapshot::DashboardSnapshot,
    status::SystemStatus, weather::WeatherSnapshot,
  };

  #[test]
  fn writes_png_with_marker() {
    let path = std::env::temp_dir()
      .join(format!("xiyang-{}", std::process::id()))
      .join("visualizer.png");
    let url = Url::parse(&format!("image://{}", path.display())).unwrap();
    let output = SaveImageFileOutput::from_url(&url).unwrap();

    let mut state = DashboardState::default();
    state.update::<String>(Ok(DashboardSnapshot {
      model_logs: vec![ModelLog {
        timestamp: Some("2026-10-16T10:00:00".to_string()),
        model_details: Some(ModelDetails {
          detections: Some(vec![Detection::at_offset(10.0, -20.0)]),
        }),
        ..Default::default()
      }],
      ..Default::default()
    }));
    output.render_result(&state, Utc::now()).unwrap();

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (300, 300));
    assert_eq!(*image.get_pixel(170, 140), image::Rgb([0xFF, 0xCC, 0x00]));
    std::fs::remove_file(path).unwrap();
  }

  #[test]
  fn day_bar_is_drawn_below_the_visualizer() {
    let path = std::env::temp_dir()
      .join(format!("xiyang-{}-bar", std::process::id()))
      .join("dashboard.png");
    let url = Url::parse(&format!("image://{}?day_bar", path.display())).unwrap();
    let output = SaveImageFileOutput::from_url(&url).unwrap();

    let now = DateTime::from_timestamp(1_760_600_000, 0).unwrap();
    let mut state = DashboardState::default();
    state.update::<String>(Ok(DashboardSnapshot::from_status(SystemStatus {
      weather_data: Some(WeatherSnapshot::with_solar_bounds(
        1_760_600_000 - 3_600,
        1_760_600_000 + 3_600,
      )),
      ..Default::default()
    })));
    output.render_result(&state, now).unwrap();

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (300, 324));
    // 日间一半进度：条的起点是日间渐变色，末端是底槽
    assert_eq!(*image.get_pixel(8, 312), image::Rgb([0xFA, 0xCC, 0x15]));
    assert_eq!(*image.get_pixel(290, 312), image::Rgb([0x37, 0x41, 0x51]));
    std::fs::remove_file(path).unwrap();
  }

  #[test]
  fn wrong_scheme_is_rejected() {
    let url = Url::parse("folder:///tmp/records").unwrap();
    assert!(matches!(
      SaveImageFileOutput::from_url(&url),
      Err(SaveImageFileError::SchemeMismatch(_))
    ));
  }
}
