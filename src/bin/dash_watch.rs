// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/bin/dash_watch.rs - 持续刷新渲染
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use url::Url;

use tracing::info;
use xiyang::{
  FromUrl,
  input::InputWrapper,
  output::OutputWrapper,
  task::{ContinuousTask, Task},
};

/// Xiyang 持续刷新参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 快照来源
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 输出路径
  #[arg(long, value_name = "OUTPUT")]
  pub output: Url,
  /// 刷新间隔（毫秒）
  #[arg(long, default_value = "3000", value_name = "MILLIS")]
  pub interval_ms: u64,
  /// 最大刷新次数，缺省时直到 Ctrl-C
  #[arg(long, value_name = "FRAME_NUMBER")]
  pub frame_number: Option<usize>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);
  info!("刷新间隔: {}ms", args.interval_ms);

  let input = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;

  ContinuousTask::default()
    .with_interval(Duration::from_millis(args.interval_ms))
    .with_frame_number(args.frame_number)
    .run_task(input, output)?;

  Ok(())
}
