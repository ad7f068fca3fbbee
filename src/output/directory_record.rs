// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/output/directory_record.rs - 目录记录输出
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

use std::path::PathBuf;
use std::sync::atomic::{AtomicU16, Ordering};

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
  FromUrl, FromUrlWithScheme,
  day_progress::unix_seconds,
  output::{
    Render,
    draw::{Draw, DrawError, Record},
  },
  snapshot::DashboardState,
};

#[derive(Error, Debug)]
pub enum DirectoryRecordOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("绘制参数错误: {0}")]
  DrawError(#[from] DrawError),
}

/// 按日期目录保存每次刷新的可视化图像
///
/// `folder:///dir?always&record=offset|full&day_bar`：默认只保存有检测目标的刷新，
/// `record` 额外写出同名 `.txt` 检测记录，`day_bar` 同 `image://`。
pub struct DirectoryRecordOutput {
  directory: PathBuf,
  draw: Draw,
  record: Option<Record>,
  frame_counter: AtomicU16,
  always: bool,
}

impl FromUrlWithScheme for DirectoryRecordOutput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn from_url(uri: &url::Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(DirectoryRecordOutputError::SchemeMismatch);
    }

    let record = uri
      .query_pairs()
      .find(|(k, _)| k == "record")
      .map(|(_, v)| Record {
        with_bbox: v == "full",
      });

    let always = uri.query_pairs().any(|(k, _)| k == "always");

    Ok(DirectoryRecordOutput {
      directory: PathBuf::from(uri.path()),
      draw: Draw::from_query(uri)?,
      record,
      frame_counter: AtomicU16::new(0),
      always,
    })
  }
}

impl DirectoryRecordOutput {
  fn frame_id(&self) -> u16 {
    self
      .frame_counter
      .fetch_add(1, Ordering::Relaxed)
      .wrapping_add(1)
  }

  fn frame_path(&self, now: DateTime<Utc>) -> Result<PathBuf, DirectoryRecordOutputError> {
    let directory = self
      .directory
      .join(now.year().to_string())
      .join(format!("{:02}", now.month()))
      .join(format!("{:02}", now.day()));
    std::fs::create_dir_all(&directory)?;

    Ok(directory.join(format!(
      "{}-{:04X}.png",
      now.format("%H-%M-%S"),
      self.frame_id()
    )))
  }
}

impl Render for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn render_result(&self, state: &DashboardState, now: DateTime<Utc>) -> Result<(), Self::Error> {
    if state.warning().is_some() {
      debug!("数据未更新，跳过记录");
      return Ok(());
    }

    let detections = state.snapshot().primary_detections();
    if !self.always && detections.is_empty() {
      return Ok(());
    }

    let path = self.frame_path(now)?;
    self
      .draw
      .draw_snapshot(state.snapshot(), unix_seconds(now))
      .save(&path)?;
    if let Some(record) = &self.record {
      record.record(detections, &path)?;
    }
    Ok(())
  }
}
