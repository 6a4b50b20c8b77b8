// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/output/console.rs - 控制台输出
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

use image::RgbImage;
use thiserror::Error;
use tracing::{error, info};

use crate::model::ClassifyOutcome;
use crate::output::Render;
use crate::{FromUrl, FromUrlWithScheme};

#[derive(Error, Debug)]
pub enum ConsoleOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

/// 把分类结果打到日志里，适合交互式排查。
pub struct ConsoleOutput;

impl FromUrlWithScheme for ConsoleOutput {
  const SCHEME: &'static str = "console";
}

impl FromUrl for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ConsoleOutputError::SchemeMismatch);
    }
    Ok(ConsoleOutput)
  }
}

impl Render<RgbImage, ClassifyOutcome> for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn render_result(&self, _frame: &RgbImage, result: &ClassifyOutcome) -> Result<(), Self::Error> {
    match result {
      Ok(classification) => {
        info!(
          "类别: {} ({})",
          classification.profile.name,
          classification.category.id()
        );
        info!("置信度: {:.2}", classification.confidence);
        info!("处理方式: {}", classification.profile.disposal_instructions);
        info!("回收代码: {}", classification.profile.recycling_code);
        for tip in &classification.tips {
          info!("环保建议: {}", tip);
        }
      }
      Err(err) => error!("分类失败: {}", err),
    }
    Ok(())
  }
}
