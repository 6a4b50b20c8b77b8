// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/output/json_file.rs - JSON 文件输出
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
use std::sync::Mutex;

use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::model::ClassifyOutcome;
use crate::output::{Render, classification_document};
use crate::{FromUrl, FromUrlWithScheme};

#[derive(Error, Debug)]
pub enum JsonFileOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  Io(#[from] std::io::Error),
  #[error("JSON 序列化错误: {0}")]
  Json(#[from] serde_json::Error),
}

/// 把分类结果写进 JSON 文件。
///
/// 第一帧写到 URI 给出的路径，后续帧在文件名后追加帧号，避免互相覆盖。
pub struct JsonFileOutput {
  path: PathBuf,
  frame_counters: Mutex<u16>,
}

impl FromUrlWithScheme for JsonFileOutput {
  const SCHEME: &'static str = "json";
}

impl FromUrl for JsonFileOutput {
  type Error = JsonFileOutputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(JsonFileOutputError::SchemeMismatch);
    }

    Ok(JsonFileOutput {
      path: PathBuf::from(url.path()),
      frame_counters: Mutex::new(0),
    })
  }
}

impl JsonFileOutput {
  fn frame_id(&self) -> u16 {
    let mut counter = self.frame_counters.lock().unwrap();
    let id = *counter + 1;
    *counter = id;
    id
  }

  fn frame_path(&self, frame_id: u16) -> PathBuf {
    if frame_id == 1 {
      return self.path.clone();
    }

    let stem = self
      .path
      .file_stem()
      .and_then(|stem| stem.to_str())
      .unwrap_or("frame");
    let extension = self
      .path
      .extension()
      .and_then(|extension| extension.to_str())
      .unwrap_or("json");
    self
      .path
      .with_file_name(format!("{}-{}.{}", stem, frame_id, extension))
  }
}

impl Render<RgbImage, ClassifyOutcome> for JsonFileOutput {
  type Error = JsonFileOutputError;

  fn render_result(&self, _frame: &RgbImage, result: &ClassifyOutcome) -> Result<(), Self::Error> {
    let path = self.frame_path(self.frame_id());
    let document = classification_document(result);
    std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;
    info!("分类结果已写入 {}", path.display());
    Ok(())
  }
}
