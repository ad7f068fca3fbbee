// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/control.rs - 控制指令
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
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use url::Url;

use crate::status::SystemStatus;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// 允许设置的拍摄间隔（秒）
pub const INTERVAL_RANGE: RangeInclusive<u32> = 10..=3600;

#[derive(Error, Debug)]
pub enum ControlError {
  #[error("拍摄间隔超出范围: {0} 秒（允许 10 - 3600 秒）")]
  IntervalOutOfRange(u32),
  #[error("URL 错误: {0}")]
  InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
  Get,
  Put,
  Post,
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Method::Get => "GET",
      Method::Put => "PUT",
      Method::Post => "POST",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureAction {
  Start,
  Stop,
}

/// 经过范围校验的拍摄间隔
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntervalSeconds(u32);

impl IntervalSeconds {
  pub fn get(&self) -> u32 {
    self.0
  }
}

impl TryFrom<u32> for IntervalSeconds {
  type Error = ControlError;

  fn try_from(seconds: u32) -> Result<Self, Self::Error> {
    if INTERVAL_RANGE.contains(&seconds) {
      Ok(Self(seconds))
    } else {
      Err(ControlError::IntervalOutOfRange(seconds))
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
  Capture(CaptureAction),
  ChangeInterval(IntervalSeconds),
  TestMode { active: bool },
}

/// 交给外部传输层发送的请求描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRequest {
  pub method: Method,
  pub url: Url,
  pub body: Option<Value>,
}

// 保证 join 追加路径而不是替换最后一段
fn endpoint(base: &Url, path: &str) -> Result<Url, ControlError> {
  let mut base = base.clone();
  if !base.path().ends_with('/') {
    let path = format!("{}/", base.path());
    base.set_path(&path);
  }
  Ok(base.join(path)?)
}

pub fn status_request(base: &Url) -> Result<ControlRequest, ControlError> {
  Ok(ControlRequest {
    method: Method::Get,
    url: endpoint(base, "status")?,
    body: None,
  })
}

impl ControlAction {
  /// 根据当前相机状态选择相反的动作
  pub fn toggle_capture(camera_active: bool) -> Self {
    if camera_active {
      ControlAction::Capture(CaptureAction::Stop)
    } else {
      ControlAction::Capture(CaptureAction::Start)
    }
  }

  /// 根据本地记录的测试模式状态切换
  pub fn toggle_test_mode(test_mode_active: bool) -> Self {
    ControlAction::TestMode {
      active: !test_mode_active,
    }
  }

  pub fn change_interval(seconds: u32) -> Result<Self, ControlError> {
    Ok(ControlAction::ChangeInterval(IntervalSeconds::try_from(seconds)?))
  }

  pub fn request(&self, base: &Url) -> Result<ControlRequest, ControlError> {
    let (method, path, body) = match self {
      ControlAction::Capture(action) => (Method::Put, "start_stop_camera", json!({ "action": action })),
      ControlAction::ChangeInterval(interval) => {
        (Method::Put, "change_interval", json!({ "interval": interval }))
      }
      ControlAction::TestMode { active } => (Method::Post, "test_model", json!({ "active": active })),
    };

    Ok(ControlRequest {
      method,
      url: endpoint(base, path)?,
      body: Some(body),
    })
  }
}

impl SystemStatus {
  /// 指令成功后立即更新本地状态，不等待下一次轮询
  pub fn apply_control(&mut self, action: &ControlAction) {
    match action {
      ControlAction::Capture(CaptureAction::Start) => self.camera_active = true,
      ControlAction::Capture(CaptureAction::Stop) => self.camera_active = false,
      ControlAction::ChangeInterval(interval) => self.interval_time = interval.get(),
      ControlAction::TestMode { active } => self.test_mode_active = *active,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn base() -> Url {
    Url::parse(DEFAULT_API_BASE).unwrap()
  }

  #[test]
  fn interval_bounds_are_inclusive() {
    assert!(ControlAction::change_interval(10).is_ok());
    assert!(ControlAction::change_interval(3600).is_ok());
    assert!(matches!(
      ControlAction::change_interval(9),
      Err(ControlError::IntervalOutOfRange(9))
    ));
    assert!(matches!(
      ControlAction::change_interval(3601),
      Err(ControlError::IntervalOutOfRange(3601))
    ));
  }

  #[test]
  fn toggle_picks_the_opposite_action() {
    let request = ControlAction::toggle_capture(true).request(&base()).unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url.as_str(), "http://localhost:5000/start_stop_camera");
    assert_eq!(request.body, Some(json!({ "action": "stop" })));

    let request = ControlAction::toggle_capture(false).request(&base()).unwrap();
    assert_eq!(request.body, Some(json!({ "action": "start" })));
  }

  #[test]
  fn interval_and_test_mode_bodies() {
    let request = ControlAction::change_interval(300)
      .unwrap()
      .request(&base())
      .unwrap();
    assert_eq!(request.url.path(), "/change_interval");
    assert_eq!(request.body, Some(json!({ "interval": 300 })));

    let request = ControlAction::TestMode { active: true }
      .request(&base())
      .unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url.path(), "/test_model");
    assert_eq!(request.body, Some(json!({ "active": true })));
  }

  #[test]
  fn base_path_is_kept() {
    let base = Url::parse("http://pi.local:5000/api").unwrap();
    let request = status_request(&base).unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url.as_str(), "http://pi.local:5000/api/status");
    assert_eq!(request.body, None);
  }

  #[test]
  fn successful_actions_update_local_status() {
    let mut status = SystemStatus::default();
    status.apply_control(&ControlAction::toggle_capture(status.camera_active));
    assert!(status.camera_active);

    status.apply_control(&ControlAction::change_interval(900).unwrap());
    assert_eq!(status.interval_time, 900);

    status.apply_control(&ControlAction::toggle_test_mode(status.test_mode_active));
    assert!(status.test_mode_active);
    assert!(status.camera_active);
  }

  #[test]
  fn test_mode_toggles_against_tracked_state() {
    let mut status = SystemStatus::default();

    let action = ControlAction::toggle_test_mode(status.test_mode_active);
    assert_eq!(
      action.request(&base()).unwrap().body,
      Some(json!({ "active": true }))
    );
    status.apply_control(&action);

    let action = ControlAction::toggle_test_mode(status.test_mode_active);
    assert_eq!(action, ControlAction::TestMode { active: false });
    status.apply_control(&action);
    assert!(!status.test_mode_active);
  }
}
