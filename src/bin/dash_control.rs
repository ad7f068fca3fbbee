// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/bin/dash_control.rs - 控制指令请求生成
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use anyhow::Result;
use clap::{Parser, Subcommand};
use url::Url;

use tracing::info;
use xiyang::{
  FromUrl,
  control::{CaptureAction, ControlAction, DEFAULT_API_BASE, status_request},
  input::{InputWrapper, SnapshotSource},
};

/// 生成控制接口请求（方法、URL、JSON 请求体），由外部工具发送
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 控制接口地址
  #[arg(long, default_value = DEFAULT_API_BASE, value_name = "URL")]
  pub base_url: Url,
  /// 当前状态快照，用于切换相机并预览指令成功后的本地状态
  #[arg(long, value_name = "SOURCE")]
  pub status: Option<Url>,
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// 查询系统状态
  Status,
  /// 开始拍摄
  Start,
  /// 停止拍摄
  Stop,
  /// 按当前相机状态切换开始/停止（需要 --status）
  Toggle,
  /// 修改拍摄间隔（10 - 3600 秒）
  Interval { seconds: u32 },
  /// 开关持续测试模式，缺省 --active 时按 --status 记录的状态切换
  TestMode {
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    active: Option<bool>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  let mut status = match &args.status {
    Some(url) => InputWrapper::from_url(url)?.fetch()?.status,
    None => None,
  };

  let action = match args.command {
    Command::Status => {
      let request = status_request(&args.base_url)?;
      println!("{}", serde_json::to_string_pretty(&request)?);
      return Ok(());
    }
    Command::Start => ControlAction::Capture(CaptureAction::Start),
    Command::Stop => ControlAction::Capture(CaptureAction::Stop),
    Command::Toggle => {
      let camera_active = status
        .as_ref()
        .map(|s| s.camera_active)
        .ok_or_else(|| anyhow::anyhow!("切换相机需要 --status 提供当前状态"))?;
      ControlAction::toggle_capture(camera_active)
    }
    Command::Interval { seconds } => ControlAction::change_interval(seconds)?,
    Command::TestMode { active: Some(active) } => ControlAction::TestMode { active },
    Command::TestMode { active: None } => {
      let test_mode_active = status
        .as_ref()
        .map(|s| s.test_mode_active)
        .ok_or_else(|| anyhow::anyhow!("切换测试模式需要 --status 或 --active"))?;
      ControlAction::toggle_test_mode(test_mode_active)
    }
  };

  let request = action.request(&args.base_url)?;
  println!("{}", serde_json::to_string_pretty(&request)?);

  if let Some(status) = status.as_mut() {
    status.apply_control(&action);
    info!("指令成功后的本地状态: {}", serde_json::to_string(status)?);
  }

  Ok(())
}
