// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/task.rs - 任务执行循环
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

use std::time::Instant;

use tracing::{error, info};

use crate::{model::Model, output::Render};

/// 把输入、模型与输出串起来的执行循环。
pub trait Task<I, M, O>: Sized {
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<(), Self::Error>;
}

/// 只取第一帧的任务。
///
/// 分类失败不会让任务提前退出，失败结果同样交给输出端渲染。
pub struct OneShotTask;

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Model<Input = F, Output = D, Error = ME>,
  O: Render<F, Result<D, ME>, Error = RE>,
> Task<I, M, O> for OneShotTask
{
  type Error = anyhow::Error;

  fn run_task(self, mut input: I, model: M, output: O) -> Result<(), Self::Error> {
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;

    let now = Instant::now();
    let result = model.infer(&frame);
    info!("推理完成，耗时: {:.2?}", now.elapsed());

    if let Err(err) = &result {
      error!("分类失败: {}", err);
    }
    output.render_result(&frame, &result)?;

    Ok(())
  }
}

/// 遍历输入里每一帧的任务。
pub struct BatchTask;

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Model<Input = F, Output = D, Error = ME>,
  O: Render<F, Result<D, ME>, Error = RE>,
> Task<I, M, O> for BatchTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, model: M, output: O) -> Result<(), Self::Error> {
    let now = Instant::now();
    let mut frames = 0u32;
    let mut failures = 0u32;

    for frame in input {
      frames += 1;
      let result = model.infer(&frame);
      if let Err(err) = &result {
        failures += 1;
        error!("第 {} 帧分类失败: {}", frames, err);
      }
      output.render_result(&frame, &result)?;
    }

    if frames == 0 {
      anyhow::bail!("没有输入帧");
    }
    info!("共处理 {} 帧, 失败 {} 帧", frames, failures);
    info!("总耗时: {:.2?}", now.elapsed());
    Ok(())
  }
}
