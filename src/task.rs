// 该文件是 Xiyang （夕阳） 项目的一部分。
// src/task.rs - 刷新任务
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

use std::fmt::Display;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::{input::SnapshotSource, output::Render, snapshot::DashboardState};

/// 默认轮询间隔
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

pub trait Task<I, O>: Sized {
  type Error;
  fn run_task(self, input: I, output: O) -> Result<(), Self::Error>;
}

pub struct OneShotTask;

impl<
  IE: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: SnapshotSource<Error = IE>,
  O: Render<Error = RE>,
> Task<I, O> for OneShotTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    let snapshot = input.fetch()?;
    info!("快照读取成功，开始渲染...");
    let now = std::time::Instant::now();
    let mut state = DashboardState::default();
    state.update::<IE>(Ok(snapshot));
    output.render_result(&state, Utc::now())?;
    info!("渲染完成，耗时: {:.2?}", now.elapsed());

    Ok(())
  }
}

/// 按固定间隔重复读取并渲染，读取失败时沿用上一次的数据
#[derive(Debug)]
pub struct ContinuousTask {
  interval: Duration,
  frame_number: Option<usize>,
  stop: Option<Receiver<()>>,
}

impl Default for ContinuousTask {
  fn default() -> Self {
    Self {
      interval: DEFAULT_REFRESH_INTERVAL,
      frame_number: None,
      stop: None,
    }
  }
}

impl ContinuousTask {
  pub fn with_interval(mut self, interval: Duration) -> Self {
    self.interval = interval;
    self
  }

  pub fn with_frame_number(mut self, frame_number: Option<usize>) -> Self {
    self.frame_number = frame_number;
    self
  }

  /// 使用外部提供的停止信号，不再安装 Ctrl-C 处理
  pub fn with_stop_signal(mut self, stop: Receiver<()>) -> Self {
    self.stop = Some(stop);
    self
  }

  fn install_ctrlc() -> Result<Receiver<()>, ctrlc::Error> {
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
      info!("收到中断信号，准备退出...");
      let _ = tx.send(());
    })?;
    Ok(rx)
  }
}

impl<
  IE: Display,
  RE: std::error::Error + Sync + Send + 'static,
  I: SnapshotSource<Error = IE>,
  O: Render<Error = RE>,
> Task<I, O> for ContinuousTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    let stop = match self.stop {
      Some(stop) => stop,
      None => Self::install_ctrlc()?,
    };

    let mut state = DashboardState::default();
    let mut refresh_index: usize = 0;
    loop {
      refresh_index = refresh_index.wrapping_add(1);
      let fresh = state.update(input.fetch());
      output.render_result(&state, Utc::now())?;
      info!("第 {} 次刷新完成（{}）", refresh_index, if fresh { "新数据" } else { "旧数据" });

      if self.frame_number.map(|n| refresh_index >= n).unwrap_or(false) {
        info!("达到指定刷新次数 {}, 退出任务循环", refresh_index);
        break;
      }

      match stop.recv_timeout(self.interval) {
        Ok(()) => {
          warn!("中断信号接收，退出任务循环");
          break;
        }
        Err(RecvTimeoutError::Timeout) => {}
        Err(RecvTimeoutError::Disconnected) => {
          warn!("停止信号通道已关闭，退出任务循环");
          break;
        }
      }
    }

    info!("任务完成，退出");
    Ok(())
  }
}
