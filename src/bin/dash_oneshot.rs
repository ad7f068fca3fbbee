// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/bin/dash_oneshot.rs - 单次渲染
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use anyhow::Result;
use clap::Parser;
use url::Url;

use tracing::info;
use xiyang::{
  FromUrl,
  input::InputWrapper,
  output::OutputWrapper,
  task::{OneShotTask, Task},
};

/// Xiyang 单次渲染参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 快照来源，例如 snapshot:///var/lib/xiyang/dashboard.json
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 输出，例如 image:///tmp/offset.png?font=/usr/share/fonts/DejaVuSans.ttf 或 log://
  #[arg(long, value_name = "OUTPUT")]
  pub output: Url,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);

  let input = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;

  OneShotTask.run_task(input, output)?;

  Ok(())
}
