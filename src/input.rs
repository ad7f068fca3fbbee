// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/input.rs - 快照输入
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

use thiserror::Error;

use crate::{FromUrl, snapshot::DashboardSnapshot};

/// 每次调用都重新读取一份完整快照
pub trait SnapshotSource {
  type Error;
  fn fetch(&self) -> Result<DashboardSnapshot, Self::Error>;
}

#[cfg(feature = "read_snapshot_file")]
mod read_snapshot_file;
#[cfg(feature = "read_snapshot_file")]
pub use self::read_snapshot_file::{SnapshotFileInput, SnapshotFileInputError};

#[derive(Error, Debug)]
pub enum InputError {
  #[cfg(feature = "read_snapshot_file")]
  #[error("Snapshot file input error: {0}")]
  SnapshotFileInputError(#[from] SnapshotFileInputError),
  #[error("URI scheme mismatch")]
  SchemeMismatch,
}

pub enum InputWrapper {
  #[cfg(feature = "read_snapshot_file")]
  SnapshotFile(SnapshotFileInput),
}

impl FromUrl for InputWrapper {
  type Error = InputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "read_snapshot_file")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == SnapshotFileInput::SCHEME {
        let input = SnapshotFileInput::from_url(url)?;
        return Ok(InputWrapper::SnapshotFile(input));
      }
    }
    Err(InputError::SchemeMismatch)
  }
}

impl SnapshotSource for InputWrapper {
  type Error = InputError;

  fn fetch(&self) -> Result<DashboardSnapshot, Self::Error> {
    match self {
      #[cfg(feature = "read_snapshot_file")]
      InputWrapper::SnapshotFile(input) => input.fetch().map_err(InputError::from),
    }
  }
}
